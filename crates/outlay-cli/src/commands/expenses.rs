//! Expense command implementations

use anyhow::{bail, Result};
use outlay_core::analytics::monthly_summary;
use outlay_core::{Category, Database, Error, ExpenseRecord, NewExpense, PaymentMethod, Snapshot};

use super::{parse_date, parse_month, truncate};
use crate::cli::ExpenseFields;

/// Comma-separated labels, for "valid values" hints
pub fn valid_labels<T: std::fmt::Display>(all: &[T]) -> String {
    all.iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse CLI fields into a validated expense
pub fn build_expense(fields: &ExpenseFields) -> Result<NewExpense> {
    let category: Category = match fields.category.parse() {
        Ok(c) => c,
        Err(e) => bail!("{} (valid: {})", e, valid_labels(Category::all())),
    };
    let payment_method: PaymentMethod = match fields.payment.parse() {
        Ok(p) => p,
        Err(e) => bail!("{} (valid: {})", e, valid_labels(PaymentMethod::all())),
    };

    let expense = NewExpense::new(
        parse_date(&fields.date)?,
        fields.amount,
        category,
        payment_method,
    )
    .with_notes(fields.notes.trim());
    expense.validate()?;
    Ok(expense)
}

pub fn cmd_add(db: &Database, fields: &ExpenseFields) -> Result<i64> {
    let expense = build_expense(fields)?;
    let id = db.insert_expense(&expense)?;
    println!(
        "✅ Added expense #{}: {:.2} on {} ({})",
        id, expense.amount, expense.date, expense.category
    );
    Ok(id)
}

pub fn cmd_update(db: &Database, id: i64, fields: &ExpenseFields) -> Result<()> {
    let expense = build_expense(fields)?;
    if !db.update_expense(id, &expense)? {
        return Err(Error::NotFound(format!("expense #{}", id)).into());
    }
    println!("✅ Updated expense #{}", id);
    Ok(())
}

pub fn cmd_delete(db: &Database, id: i64) -> Result<()> {
    if db.delete_expense(id)? {
        println!("🗑️  Deleted expense #{}", id);
    } else {
        println!("   Expense #{} not found, nothing deleted", id);
    }
    Ok(())
}

pub fn cmd_show(db: &Database, id: i64) -> Result<()> {
    let expense = db
        .get_expense(id)?
        .ok_or_else(|| Error::NotFound(format!("expense #{}", id)))?;

    println!();
    println!("🧾 Expense #{}", expense.id);
    println!("   Date:     {}", expense.date);
    println!("   Amount:   {:.2}", expense.amount);
    println!("   Category: {}", expense.category);
    println!("   Payment:  {}", expense.payment_method);
    if !expense.notes.is_empty() {
        println!("   Notes:    {}", expense.notes);
    }
    Ok(())
}

pub fn cmd_list(db: &Database, limit: usize, month: Option<&str>) -> Result<()> {
    let mut snapshot = Snapshot::load(db)?;
    if let Some(m) = month {
        snapshot = monthly_summary(&snapshot, parse_month(m)?);
    }

    println!();
    println!("📋 Expenses ({} total)", snapshot.len());
    if let Some((earliest, latest)) = snapshot.date_span() {
        println!("   {} to {}", earliest, latest);
    }
    println!("   ─────────────────────────────────────────────────────────────");

    if snapshot.is_empty() {
        println!("   No expenses found.");
        return Ok(());
    }

    print_expense_table(&snapshot.records()[..limit.min(snapshot.len())]);

    if snapshot.len() > limit {
        println!("   ... {} more (use --limit)", snapshot.len() - limit);
    }
    Ok(())
}

fn print_expense_table(rows: &[ExpenseRecord]) {
    println!(
        "   {:>5} │ {:10} │ {:>10} │ {:13} │ {:11} │ {}",
        "ID", "Date", "Amount", "Category", "Payment", "Notes"
    );
    println!("   ──────┼────────────┼────────────┼───────────────┼─────────────┼──────────");
    for e in rows {
        println!(
            "   {:>5} │ {:10} │ {:>10.2} │ {:13} │ {:11} │ {}",
            e.id,
            e.date,
            e.amount,
            e.category.as_str(),
            e.payment_method.as_str(),
            truncate(&e.notes, 30)
        );
    }
}
