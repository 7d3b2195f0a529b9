//! Ledger storage interface
//!
//! The analytics and budget layers only ever talk to storage through
//! `LedgerGateway`. `Database` is the SQLite-backed implementation.
//!
//! Missing ids and months are reported as `None`/`false`, never as errors.

use crate::error::Result;
use crate::models::{BudgetEntry, ExpenseRecord, Month, NewExpense};

/// Durable store for expenses, budgets and settings
pub trait LedgerGateway {
    /// Insert an expense and return its new id
    fn insert_expense(&self, expense: &NewExpense) -> Result<i64>;

    /// Replace every field of an expense except its id.
    /// Returns false if no expense has that id.
    fn update_expense(&self, id: i64, expense: &NewExpense) -> Result<bool>;

    /// Remove an expense. Returns false if it did not exist.
    fn delete_expense(&self, id: i64) -> Result<bool>;

    /// All expenses, in a stable but unspecified order
    fn list_expenses(&self) -> Result<Vec<ExpenseRecord>>;

    fn get_expense(&self, id: i64) -> Result<Option<ExpenseRecord>>;

    /// Insert or replace the budget for `entry.month`
    fn upsert_budget(&self, entry: &BudgetEntry) -> Result<()>;

    fn get_budget(&self, month: Month) -> Result<Option<BudgetEntry>>;

    /// All budgets ordered by month
    fn list_budgets(&self) -> Result<Vec<BudgetEntry>>;

    fn upsert_setting(&self, key: &str, value: &str) -> Result<()>;

    fn get_setting(&self, key: &str) -> Result<Option<String>>;
}
