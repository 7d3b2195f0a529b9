//! Expense record operations

use rusqlite::{params, OptionalExtension, Row};
use tracing::{debug, info};

use super::{parse_date, Database};
use crate::error::{Error, Result};
use crate::models::{Category, ExpenseRecord, NewExpense, PaymentMethod};

/// Raw column values of an `expenses` row, before label parsing
struct ExpenseRow {
    id: i64,
    date: String,
    amount: f64,
    category: String,
    payment_method: String,
    notes: String,
}

impl ExpenseRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            date: row.get(1)?,
            amount: row.get(2)?,
            category: row.get(3)?,
            payment_method: row.get(4)?,
            notes: row.get(5)?,
        })
    }

    fn into_record(self) -> Result<ExpenseRecord> {
        let category: Category = self
            .category
            .parse()
            .map_err(|e: String| Error::InvalidData(format!("expense {}: {}", self.id, e)))?;
        let payment_method: PaymentMethod = self
            .payment_method
            .parse()
            .map_err(|e: String| Error::InvalidData(format!("expense {}: {}", self.id, e)))?;

        Ok(ExpenseRecord {
            id: self.id,
            date: parse_date(&self.date)?,
            amount: self.amount,
            category,
            payment_method,
            notes: self.notes,
        })
    }
}

const SELECT_EXPENSE: &str =
    "SELECT id, date, amount, category, payment_method, notes FROM expenses";

impl Database {
    /// Insert an expense (validated) and return its id
    pub fn insert_expense(&self, expense: &NewExpense) -> Result<i64> {
        expense.validate()?;
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO expenses (date, amount, category, payment_method, notes)
            VALUES (?, ?, ?, ?, ?)
            "#,
            params![
                expense.date.to_string(),
                expense.amount,
                expense.category.as_str(),
                expense.payment_method.as_str(),
                expense.notes,
            ],
        )?;

        let id = conn.last_insert_rowid();
        info!(id, amount = expense.amount, category = %expense.category, "Expense added");
        Ok(id)
    }

    /// Replace every field of an expense except its id
    ///
    /// Returns false (and changes nothing) if the id does not exist.
    pub fn update_expense(&self, id: i64, expense: &NewExpense) -> Result<bool> {
        expense.validate()?;
        let conn = self.conn()?;

        let changed = conn.execute(
            r#"
            UPDATE expenses
            SET date = ?, amount = ?, category = ?, payment_method = ?, notes = ?
            WHERE id = ?
            "#,
            params![
                expense.date.to_string(),
                expense.amount,
                expense.category.as_str(),
                expense.payment_method.as_str(),
                expense.notes,
                id,
            ],
        )?;

        if changed > 0 {
            info!(id, "Expense updated");
        } else {
            debug!(id, "Update skipped, no such expense");
        }
        Ok(changed > 0)
    }

    /// Delete an expense, returns false if it did not exist
    pub fn delete_expense(&self, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let changed = conn.execute("DELETE FROM expenses WHERE id = ?", params![id])?;
        if changed > 0 {
            info!(id, "Expense deleted");
        }
        Ok(changed > 0)
    }

    /// List all expenses, newest first
    pub fn list_expenses(&self) -> Result<Vec<ExpenseRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!("{} ORDER BY date DESC, id DESC", SELECT_EXPENSE))?;

        let rows = stmt
            .query_map([], ExpenseRow::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter().map(ExpenseRow::into_record).collect()
    }

    /// Get a single expense by id
    pub fn get_expense(&self, id: i64) -> Result<Option<ExpenseRecord>> {
        let conn = self.conn()?;
        let row = conn
            .query_row(
                &format!("{} WHERE id = ?", SELECT_EXPENSE),
                params![id],
                ExpenseRow::from_row,
            )
            .optional()?;

        row.map(ExpenseRow::into_record).transpose()
    }

    /// Count stored expenses
    pub fn count_expenses(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM expenses", [], |row| row.get(0))?;
        Ok(count)
    }
}
