//! Budget, threshold and progress command implementations

use anyhow::Result;
use outlay_core::{BudgetProgress, BudgetTracker, Database, Month, Snapshot};

use super::parse_month;

pub fn cmd_budget_set(db: &Database, month: &str, budget: f64, savings: f64) -> Result<()> {
    let month = parse_month(month)?;
    BudgetTracker::new(db).set_budget(month, budget, savings)?;
    println!(
        "✅ Budget for {}: {:.2} (savings goal {:.2})",
        month, budget, savings
    );
    Ok(())
}

pub fn cmd_budget_show(db: &Database, month: &str) -> Result<()> {
    let month = parse_month(month)?;
    match BudgetTracker::new(db).get_budget(month)? {
        Some(entry) => {
            println!("💰 Budget for {}", entry.month);
            println!("   Budget:       {:.2}", entry.budget);
            println!("   Savings goal: {:.2}", entry.savings_goal);
        }
        None => println!("   No budget set for {}", month),
    }
    Ok(())
}

pub fn cmd_budget_list(db: &Database) -> Result<()> {
    let budgets = BudgetTracker::new(db).list_budgets()?;

    println!();
    println!("💰 Budgets");
    println!("   ─────────────────────────────────────");
    if budgets.is_empty() {
        println!("   No budgets set.");
        return Ok(());
    }

    println!("   {:8} │ {:>10} │ {:>10}", "Month", "Budget", "Savings");
    println!("   ─────────┼────────────┼────────────");
    for b in &budgets {
        println!(
            "   {:8} │ {:>10.2} │ {:>10.2}",
            b.month.to_string(),
            b.budget,
            b.savings_goal
        );
    }
    Ok(())
}

pub fn cmd_threshold(db: &Database, value: Option<f64>) -> Result<()> {
    let tracker = BudgetTracker::new(db);
    if let Some(v) = value {
        tracker.set_alert_threshold(v)?;
        println!("✅ Alert threshold set to {:.0}% of budget", v * 100.0);
    } else {
        let current = tracker.alert_threshold()?;
        println!(
            "   Alert threshold: {} ({:.0}% of budget)",
            current,
            current * 100.0
        );
    }
    Ok(())
}

pub fn cmd_progress(db: &Database, month: &str) -> Result<()> {
    let month = parse_month(month)?;
    let tracker = BudgetTracker::new(db);
    let snapshot = Snapshot::load(db)?;
    let progress = tracker.monthly_progress(&snapshot, month)?;

    println!();
    println!("📊 Budget Progress for {}", month);
    println!("   ─────────────────────────────────────");
    println!("   Spent:        {:>10.2}", progress.spent);
    println!("   Budget:       {:>10.2}", progress.budget);
    println!("   Remaining:    {:>10.2}", progress.remaining);
    println!("   Savings goal: {:>10.2}", progress.savings_goal);

    if let Some(note) = progress_note(&tracker, month, &progress)? {
        println!();
        println!("   {}", note);
    }
    Ok(())
}

/// Footer for a progress report: a hint when no budget exists, else the alert
///
/// A budget explicitly set to zero counts as set.
pub fn progress_note(
    tracker: &BudgetTracker<'_, Database>,
    month: Month,
    progress: &BudgetProgress,
) -> Result<Option<String>> {
    if tracker.get_budget(month)?.is_none() {
        return Ok(Some(format!(
            "💡 No budget set. Use: outlay budget set {} <amount>",
            month
        )));
    }
    let alert = tracker.spending_alert(progress.spent, progress.budget)?;
    Ok(alert.map(|a| format!("⚠️  {}", a)))
}
