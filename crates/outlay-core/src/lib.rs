//! Outlay Core Library
//!
//! Expense ledger and budget analytics:
//! - Ledger storage (SQLite) behind the `LedgerGateway` trait
//! - Immutable, content-hashable snapshots of the ledger
//! - Category, daily and monthly spending aggregates
//! - Monthly budgets, savings goals and threshold alerts
//! - Inclusive date-range extracts with CSV/JSON export
//! - Content-keyed aggregate cache for presentation layers

pub mod analytics;
pub mod budget;
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod ledger;
pub mod models;
pub mod snapshot;

pub use budget::{BudgetTracker, ALERT_THRESHOLD_KEY, DEFAULT_ALERT_THRESHOLD};
pub use cache::{AggregateCache, Aggregates};
pub use config::Config;
pub use db::Database;
pub use error::{Error, Result};
pub use export::ExportFormat;
pub use ledger::LedgerGateway;
pub use models::{
    BudgetEntry, BudgetProgress, Category, CategoryTotal, DailyTotal, ExpenseRecord, Month,
    MonthlyTotal, NewExpense, PaymentMethod,
};
pub use snapshot::Snapshot;
