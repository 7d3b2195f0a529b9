//! Outlay CLI - Personal expense tracker
//!
//! Usage:
//!   outlay init                               Initialize database
//!   outlay add -d DATE -a AMT -c CAT -p PAY   Record an expense
//!   outlay budget set 2025-01 5000            Set a monthly budget
//!   outlay progress 2025-01                   Spend vs budget, with alert
//!   outlay report category                    Spending breakdown
//!   outlay export --from D --to D -f json     Date-range export

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use outlay_core::AggregateCache;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .compact()
                .with_writer(std::io::stderr),
        )
        .init();

    let config = commands::load_config(cli.config.as_deref(), cli.db, cli.out_dir)?;

    if let Commands::Init = cli.command {
        return commands::cmd_init(&config);
    }

    let db = commands::open_db(&config)?;

    match cli.command {
        Commands::Init => Ok(()),
        Commands::Add { fields } => commands::cmd_add(&db, &fields).map(|_| ()),
        Commands::Update { id, fields } => commands::cmd_update(&db, id, &fields),
        Commands::Delete { id } => commands::cmd_delete(&db, id),
        Commands::Show { id } => commands::cmd_show(&db, id),
        Commands::List { limit, month } => commands::cmd_list(&db, limit, month.as_deref()),
        Commands::Budget { action } => match action {
            BudgetAction::Set {
                month,
                budget,
                savings,
            } => commands::cmd_budget_set(&db, &month, budget, savings),
            BudgetAction::Show { month } => commands::cmd_budget_show(&db, &month),
            BudgetAction::List => commands::cmd_budget_list(&db),
        },
        Commands::Threshold { value } => commands::cmd_threshold(&db, value),
        Commands::Progress { month } => commands::cmd_progress(&db, &month),
        Commands::Report { report_type } => {
            let mut cache = AggregateCache::new(config.cache_entries);
            match report_type {
                ReportType::Category { month } => {
                    commands::cmd_report_category(&db, &config, &mut cache, month.as_deref())
                }
                ReportType::Daily { month } => {
                    commands::cmd_report_daily(&db, &config, &mut cache, month.as_deref())
                }
                ReportType::Monthly => commands::cmd_report_monthly(&db, &config, &mut cache),
            }
        }
        Commands::Export {
            from,
            to,
            format,
            output,
        } => commands::cmd_export(&db, &from, &to, &format, output.as_deref()).map(|_| ()),
    }
}
