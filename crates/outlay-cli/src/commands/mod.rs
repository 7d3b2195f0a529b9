//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (open_db, date/month parsing) and init
//! - `expenses` - Expense commands (add, update, delete, show, list)
//! - `budgets` - Budget, threshold and progress commands
//! - `reports` - Report generation commands
//! - `export` - Date-range export command

pub mod budgets;
pub mod core;
pub mod expenses;
pub mod export;
pub mod reports;

// Re-export command functions for main.rs
pub use budgets::*;
pub use core::*;
pub use expenses::*;
pub use export::*;
pub use reports::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
