//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Outlay - Track expenses and stay inside your budget
#[derive(Parser)]
#[command(name = "outlay")]
#[command(about = "Personal expense tracker with budget analytics", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path (overrides the config file)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Config file (defaults to ~/.local/share/outlay/config.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory for JSON report artifacts (overrides the config file)
    #[arg(long, global = true)]
    pub out_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Add an expense
    Add {
        #[command(flatten)]
        fields: ExpenseFields,
    },

    /// Replace every field of an existing expense
    Update {
        /// Expense ID
        id: i64,

        #[command(flatten)]
        fields: ExpenseFields,
    },

    /// Delete an expense
    Delete {
        /// Expense ID
        id: i64,
    },

    /// Show a single expense
    Show {
        /// Expense ID
        id: i64,
    },

    /// List expenses, newest first
    List {
        /// Maximum number of expenses to show
        #[arg(short, long, default_value = "20")]
        limit: usize,

        /// Only show this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Manage monthly budgets
    Budget {
        #[command(subcommand)]
        action: BudgetAction,
    },

    /// Show or set the alert threshold (fraction of budget, e.g. 0.8)
    Threshold {
        /// New threshold value
        value: Option<f64>,
    },

    /// Show spend vs budget for a month
    Progress {
        /// Month (YYYY-MM)
        month: String,
    },

    /// Generate spending reports
    Report {
        #[command(subcommand)]
        report_type: ReportType,
    },

    /// Export expenses in a date range
    Export {
        /// Start date, inclusive (YYYY-MM-DD)
        #[arg(long)]
        from: String,

        /// End date, inclusive (YYYY-MM-DD)
        #[arg(long)]
        to: String,

        /// Output format: csv, json
        #[arg(short, long, default_value = "csv")]
        format: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Fields shared by `add` and `update`
#[derive(clap::Args, Debug, Clone)]
pub struct ExpenseFields {
    /// Date (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: String,

    /// Amount spent
    #[arg(short, long)]
    pub amount: f64,

    /// Category: Food, Transport, Shopping, Bills, Entertainment, Health, Education, Travel, Other
    #[arg(short, long)]
    pub category: String,

    /// Payment method: Cash, Card, UPI, "Net Banking", Wallet
    #[arg(short, long)]
    pub payment: String,

    /// Free-form notes
    #[arg(short, long, default_value = "")]
    pub notes: String,
}

#[derive(Subcommand)]
pub enum BudgetAction {
    /// Set the budget and savings goal for a month
    Set {
        /// Month (YYYY-MM)
        month: String,

        /// Budget amount
        budget: f64,

        /// Savings goal
        #[arg(short, long, default_value = "0")]
        savings: f64,
    },

    /// Show the budget for a month
    Show {
        /// Month (YYYY-MM)
        month: String,
    },

    /// List all budgets
    List,
}

#[derive(Subcommand)]
pub enum ReportType {
    /// Spending by category, largest first
    Category {
        /// Restrict to a month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Spending per day
    Daily {
        /// Restrict to a month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Spending per month
    Monthly,
}
