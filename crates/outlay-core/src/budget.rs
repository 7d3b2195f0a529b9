//! Monthly budgets, the alert threshold, and spend-vs-budget progress
//!
//! Reads come from a [`Snapshot`] plus budget/setting lookups; writes go
//! straight to the [`LedgerGateway`].

use tracing::{debug, info};

use crate::analytics::monthly_summary;
use crate::error::{Error, Result};
use crate::ledger::LedgerGateway;
use crate::models::{BudgetEntry, BudgetProgress, Month};
use crate::snapshot::Snapshot;

/// Settings key holding the alert threshold fraction
pub const ALERT_THRESHOLD_KEY: &str = "alert_threshold";

/// Alert once this fraction of the budget is spent, unless overridden
pub const DEFAULT_ALERT_THRESHOLD: f64 = 0.8;

/// Budget and settings operations on top of a ledger
pub struct BudgetTracker<'a, G: LedgerGateway + ?Sized> {
    ledger: &'a G,
}

impl<'a, G: LedgerGateway + ?Sized> BudgetTracker<'a, G> {
    pub fn new(ledger: &'a G) -> Self {
        Self { ledger }
    }

    /// Insert or replace the budget and savings goal for a month
    pub fn set_budget(&self, month: Month, budget: f64, savings_goal: f64) -> Result<()> {
        self.ledger
            .upsert_budget(&BudgetEntry::new(month, budget, savings_goal))
    }

    /// The budget for a month, None if never set
    pub fn get_budget(&self, month: Month) -> Result<Option<BudgetEntry>> {
        self.ledger.get_budget(month)
    }

    pub fn list_budgets(&self) -> Result<Vec<BudgetEntry>> {
        self.ledger.list_budgets()
    }

    /// Raw setting value, or `default` if the key was never set
    pub fn get_setting(&self, key: &str, default: &str) -> Result<String> {
        Ok(self
            .ledger
            .get_setting(key)?
            .unwrap_or_else(|| default.to_string()))
    }

    /// Store a raw setting value
    ///
    /// Known numeric keys are validated before they are written.
    pub fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        if key == ALERT_THRESHOLD_KEY {
            let threshold = value.trim().parse::<f64>().map_err(|_| {
                Error::Validation(format!("{} must be a number, got {:?}", key, value))
            })?;
            return self.set_alert_threshold(threshold);
        }
        self.ledger.upsert_setting(key, value)
    }

    /// Current alert threshold fraction
    ///
    /// Fails with `MalformedSetting` if the stored value is not a number.
    pub fn alert_threshold(&self) -> Result<f64> {
        match self.ledger.get_setting(ALERT_THRESHOLD_KEY)? {
            None => Ok(DEFAULT_ALERT_THRESHOLD),
            Some(raw) => match raw.trim().parse::<f64>() {
                Ok(threshold) if threshold.is_finite() => Ok(threshold),
                _ => Err(Error::MalformedSetting {
                    key: ALERT_THRESHOLD_KEY.to_string(),
                    value: raw,
                }),
            },
        }
    }

    /// Set the alert threshold; must be finite and greater than zero
    pub fn set_alert_threshold(&self, threshold: f64) -> Result<()> {
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(Error::Validation(format!(
                "{} must be a positive number, got {}",
                ALERT_THRESHOLD_KEY, threshold
            )));
        }
        self.ledger
            .upsert_setting(ALERT_THRESHOLD_KEY, &threshold.to_string())?;
        info!(threshold, "Alert threshold updated");
        Ok(())
    }

    /// Warning message once `spent` reaches the threshold share of `budget`
    ///
    /// Returns None for a non-positive budget.
    pub fn spending_alert(&self, spent: f64, budget: f64) -> Result<Option<String>> {
        if budget <= 0.0 {
            return Ok(None);
        }
        let threshold = self.alert_threshold()?;
        if spent >= budget * threshold {
            let pct = spent / budget * 100.0;
            debug!(spent, budget, threshold, "Spending alert triggered");
            return Ok(Some(format!(
                "Alert: You have used {:.1}% of your budget for the month.",
                pct
            )));
        }
        Ok(None)
    }

    /// Spend vs budget for a month
    ///
    /// Always fully populated: a month with no expenses has `spent = 0`, and
    /// a month with no budget set has `budget = savings_goal = 0`.
    pub fn monthly_progress(&self, snapshot: &Snapshot, month: Month) -> Result<BudgetProgress> {
        let spent = monthly_summary(snapshot, month).total();
        let (budget, savings_goal) = match self.ledger.get_budget(month)? {
            Some(entry) => (entry.budget, entry.savings_goal),
            None => (0.0, 0.0),
        };

        Ok(BudgetProgress {
            spent,
            budget,
            savings_goal,
            remaining: (budget - spent).max(0.0),
        })
    }

    /// Alert message for a month's progress, if any
    pub fn monthly_alert(&self, snapshot: &Snapshot, month: Month) -> Result<Option<String>> {
        let progress = self.monthly_progress(snapshot, month)?;
        self.spending_alert(progress.spent, progress.budget)
    }
}
