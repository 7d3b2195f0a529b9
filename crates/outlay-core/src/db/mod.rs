//! Database access layer with connection pooling and migrations
//!
//! This module is organized by domain:
//! - `expenses` - Expense record CRUD
//! - `budgets` - Monthly budgets and key/value settings
//!
//! `Database` implements [`LedgerGateway`](crate::ledger::LedgerGateway) by
//! delegating to the inherent methods defined in those modules.

use chrono::NaiveDate;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use tracing::info;

use crate::error::{Error, Result};
use crate::ledger::LedgerGateway;
use crate::models::{BudgetEntry, ExpenseRecord, Month, NewExpense};

mod budgets;
mod expenses;

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConn = PooledConnection<SqliteConnectionManager>;

/// Default connection pool size
pub const DEFAULT_POOL_SIZE: u32 = 4;

/// Parse a stored `YYYY-MM-DD` date column
pub(crate) fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| Error::InvalidData(format!("Invalid stored date '{}': {}", s, e)))
}

/// Database wrapper with connection pooling
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
    /// Path to the database file
    db_path: String,
}

impl Database {
    /// Open (or create) a database file and run migrations
    pub fn new(path: &str) -> Result<Self> {
        Self::with_pool_size(path, DEFAULT_POOL_SIZE)
    }

    /// Open a database with an explicit connection pool size
    pub fn with_pool_size(path: &str, pool_size: u32) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path).with_init(|conn| {
            conn.execute_batch("PRAGMA foreign_keys = ON;")?;
            Ok(())
        });
        let pool = Pool::builder().max_size(pool_size.max(1)).build(manager)?;

        let db = Self {
            pool,
            db_path: path.to_string(),
        };
        db.run_migrations()?;

        Ok(db)
    }

    /// Get the path to the database file
    pub fn path(&self) -> &str {
        &self.db_path
    }

    /// Create an isolated throwaway database (for testing)
    ///
    /// Note: Uses a temporary file rather than `:memory:` because every pooled
    /// connection to `:memory:` would see its own empty database.
    pub fn in_memory() -> Result<Self> {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);

        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        let name = format!("outlay_test_{}_{}.db", std::process::id(), id);
        let path = std::env::temp_dir().join(name);

        // Remove any existing file
        let _ = std::fs::remove_file(&path);

        Self::new(&path.to_string_lossy())
    }

    /// Get a connection from the pool
    pub fn conn(&self) -> Result<DbConn> {
        Ok(self.pool.get()?)
    }

    /// Run database migrations
    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            -- WAL mode: readers don't block the single writer
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;

            -- Expense ledger
            CREATE TABLE IF NOT EXISTS expenses (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date DATE NOT NULL,                 -- YYYY-MM-DD
                amount REAL NOT NULL,
                category TEXT NOT NULL,             -- Category label
                payment_method TEXT NOT NULL,       -- PaymentMethod label
                notes TEXT NOT NULL DEFAULT ''
            );

            CREATE INDEX IF NOT EXISTS idx_expenses_date ON expenses(date);

            -- One budget per calendar month
            CREATE TABLE IF NOT EXISTS budgets (
                month TEXT PRIMARY KEY,             -- YYYY-MM
                budget REAL NOT NULL,
                savings_goal REAL NOT NULL
            );

            -- Generic key/value settings (alert_threshold, ...)
            CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )?;

        info!("Database schema initialized");
        Ok(())
    }
}

impl LedgerGateway for Database {
    fn insert_expense(&self, expense: &NewExpense) -> Result<i64> {
        Database::insert_expense(self, expense)
    }

    fn update_expense(&self, id: i64, expense: &NewExpense) -> Result<bool> {
        Database::update_expense(self, id, expense)
    }

    fn delete_expense(&self, id: i64) -> Result<bool> {
        Database::delete_expense(self, id)
    }

    fn list_expenses(&self) -> Result<Vec<ExpenseRecord>> {
        Database::list_expenses(self)
    }

    fn get_expense(&self, id: i64) -> Result<Option<ExpenseRecord>> {
        Database::get_expense(self, id)
    }

    fn upsert_budget(&self, entry: &BudgetEntry) -> Result<()> {
        Database::upsert_budget(self, entry)
    }

    fn get_budget(&self, month: Month) -> Result<Option<BudgetEntry>> {
        Database::get_budget(self, month)
    }

    fn list_budgets(&self) -> Result<Vec<BudgetEntry>> {
        Database::list_budgets(self)
    }

    fn upsert_setting(&self, key: &str, value: &str) -> Result<()> {
        Database::upsert_setting(self, key, value)
    }

    fn get_setting(&self, key: &str) -> Result<Option<String>> {
        Database::get_setting(self, key)
    }
}
