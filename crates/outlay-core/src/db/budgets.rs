//! Monthly budget and settings operations

use rusqlite::{params, OptionalExtension};
use tracing::info;

use super::Database;
use crate::error::Result;
use crate::models::{BudgetEntry, Month};

impl Database {
    /// Insert or replace the budget for a month
    pub fn upsert_budget(&self, entry: &BudgetEntry) -> Result<()> {
        entry.validate()?;
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO budgets (month, budget, savings_goal) VALUES (?, ?, ?)
            ON CONFLICT(month) DO UPDATE SET
                budget = excluded.budget,
                savings_goal = excluded.savings_goal
            "#,
            params![entry.month.to_string(), entry.budget, entry.savings_goal],
        )?;

        info!(
            month = %entry.month,
            budget = entry.budget,
            savings_goal = entry.savings_goal,
            "Budget set"
        );
        Ok(())
    }

    /// Get the budget for a month, None if never set
    pub fn get_budget(&self, month: Month) -> Result<Option<BudgetEntry>> {
        let conn = self.conn()?;
        let entry = conn
            .query_row(
                "SELECT budget, savings_goal FROM budgets WHERE month = ?",
                params![month.to_string()],
                |row| {
                    Ok(BudgetEntry {
                        month,
                        budget: row.get(0)?,
                        savings_goal: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(entry)
    }

    /// List all budgets ordered by month
    pub fn list_budgets(&self) -> Result<Vec<BudgetEntry>> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare("SELECT month, budget, savings_goal FROM budgets ORDER BY month")?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, f64>(1)?,
                    row.get::<_, f64>(2)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(month, budget, savings_goal)| {
                Ok(BudgetEntry {
                    month: month.parse()?,
                    budget,
                    savings_goal,
                })
            })
            .collect()
    }

    /// Insert or replace a raw setting value
    pub fn upsert_setting(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO settings (key, value) VALUES (?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
            params![key, value],
        )?;
        info!(key, value, "Setting saved");
        Ok(())
    }

    /// Get a raw setting value, None if never set
    pub fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }
}
