//! Domain models for Outlay

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Spending category (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transport,
    Shopping,
    Bills,
    Entertainment,
    Health,
    Education,
    Travel,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transport => "Transport",
            Self::Shopping => "Shopping",
            Self::Bills => "Bills",
            Self::Entertainment => "Entertainment",
            Self::Health => "Health",
            Self::Education => "Education",
            Self::Travel => "Travel",
            Self::Other => "Other",
        }
    }

    /// Get all categories
    pub fn all() -> &'static [Category] {
        &[
            Self::Food,
            Self::Transport,
            Self::Shopping,
            Self::Bills,
            Self::Entertainment,
            Self::Health,
            Self::Education,
            Self::Travel,
            Self::Other,
        ]
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "food" => Ok(Self::Food),
            "transport" => Ok(Self::Transport),
            "shopping" => Ok(Self::Shopping),
            "bills" => Ok(Self::Bills),
            "entertainment" => Ok(Self::Entertainment),
            "health" => Ok(Self::Health),
            "education" => Ok(Self::Education),
            "travel" => Ok(Self::Travel),
            "other" => Ok(Self::Other),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How an expense was paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    Cash,
    Card,
    #[serde(rename = "UPI")]
    Upi,
    #[serde(rename = "Net Banking")]
    NetBanking,
    Wallet,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::Card => "Card",
            Self::Upi => "UPI",
            Self::NetBanking => "Net Banking",
            Self::Wallet => "Wallet",
        }
    }

    /// Get all payment methods
    pub fn all() -> &'static [PaymentMethod] {
        &[
            Self::Cash,
            Self::Card,
            Self::Upi,
            Self::NetBanking,
            Self::Wallet,
        ]
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Ok(Self::Cash),
            "card" => Ok(Self::Card),
            "upi" => Ok(Self::Upi),
            "net banking" | "net_banking" | "netbanking" => Ok(Self::NetBanking),
            "wallet" => Ok(Self::Wallet),
            _ => Err(format!("Unknown payment method: {}", s)),
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Largest year a [`Month`] can hold; keys are always four digits
const MAX_YEAR: i32 = 9999;

/// A calendar month, keyed as "YYYY-MM"
///
/// Ordering is chronological (year first, then month).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    /// Create a month, returning None unless the year is in 0..=9999 and
    /// `month` in 1..=12
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (0..=MAX_YEAR).contains(&year) && (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// The month a date falls in (day ignored)
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Whether `date` falls in this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl std::str::FromStr for Month {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let invalid = || Error::InvalidData(format!("Invalid month '{}' (use YYYY-MM)", s));
        let date = NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
            .map_err(|_| invalid())?;
        Self::new(date.year(), date.month()).ok_or_else(invalid)
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl TryFrom<String> for Month {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Month> for String {
    fn from(month: Month) -> Self {
        month.to_string()
    }
}

/// A stored expense record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: i64,
    pub date: NaiveDate,
    pub amount: f64,
    pub category: Category,
    pub payment_method: PaymentMethod,
    pub notes: String,
}

/// Expense fields for insert or full-replace update (everything except the id)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpense {
    pub date: NaiveDate,
    pub amount: f64,
    pub category: Category,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub notes: String,
}

impl NewExpense {
    pub fn new(
        date: NaiveDate,
        amount: f64,
        category: Category,
        payment_method: PaymentMethod,
    ) -> Self {
        Self {
            date,
            amount,
            category,
            payment_method,
            notes: String::new(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Reject amounts that are negative, NaN or infinite
    pub fn validate(&self) -> Result<()> {
        if !self.amount.is_finite() {
            return Err(Error::Validation(format!(
                "amount must be a finite number, got {}",
                self.amount
            )));
        }
        if self.amount < 0.0 {
            return Err(Error::Validation(format!(
                "amount must not be negative, got {}",
                self.amount
            )));
        }
        Ok(())
    }
}

/// Budget and savings goal for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetEntry {
    pub month: Month,
    pub budget: f64,
    pub savings_goal: f64,
}

impl BudgetEntry {
    pub fn new(month: Month, budget: f64, savings_goal: f64) -> Self {
        Self {
            month,
            budget,
            savings_goal,
        }
    }

    /// Reject negative or non-finite budget and savings goal
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("budget", self.budget), ("savings goal", self.savings_goal)] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::Validation(format!(
                    "{} for {} must be a non-negative number, got {}",
                    name, self.month, value
                )));
            }
        }
        Ok(())
    }
}

/// Total spend for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub amount: f64,
    /// Share of the breakdown total (0-100)
    pub percentage: f64,
    pub count: usize,
}

/// Total spend on one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub amount: f64,
    pub count: usize,
}

/// Total spend in one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    pub month: Month,
    pub amount: f64,
    pub count: usize,
}

/// Spend vs budget for a month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetProgress {
    pub spent: f64,
    pub budget: f64,
    pub savings_goal: f64,
    /// max(budget - spent, 0)
    pub remaining: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trip_labels() {
        for cat in Category::all() {
            let parsed: Category = cat.as_str().parse().unwrap();
            assert_eq!(parsed, *cat);
        }
        assert_eq!("  food ".parse::<Category>().unwrap(), Category::Food);
        assert!("Groceries".parse::<Category>().is_err());
    }

    #[test]
    fn test_payment_method_aliases() {
        assert_eq!(
            "net_banking".parse::<PaymentMethod>().unwrap(),
            PaymentMethod::NetBanking
        );
        assert_eq!("upi".parse::<PaymentMethod>().unwrap(), PaymentMethod::Upi);
        assert_eq!(PaymentMethod::Upi.to_string(), "UPI");
        assert!("cheque".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_month_parse_and_display() {
        let m: Month = "2025-01".parse().unwrap();
        assert_eq!(m.year(), 2025);
        assert_eq!(m.month(), 1);
        assert_eq!(m.to_string(), "2025-01");

        assert!("2025-13".parse::<Month>().is_err());
        assert!("2025-01-15".parse::<Month>().is_err());
        assert!("january".parse::<Month>().is_err());
    }

    #[test]
    fn test_month_keys_stay_four_digit() {
        // Single-digit months are normalized
        assert_eq!("2025-1".parse::<Month>().unwrap().to_string(), "2025-01");

        assert!("-0001-05".parse::<Month>().is_err());
        assert!("10000-01".parse::<Month>().is_err());
        assert!(Month::new(-1, 5).is_none());
        assert!(Month::new(10_000, 1).is_none());
        assert_eq!(Month::new(0, 1).unwrap().to_string(), "0000-01");
    }

    #[test]
    fn test_month_ordering_and_contains() {
        let dec: Month = "2024-12".parse().unwrap();
        let jan: Month = "2025-01".parse().unwrap();
        assert!(dec < jan);

        let d = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        assert!(jan.contains(d));
        assert!(!dec.contains(d));
        assert_eq!(Month::of(d), jan);
    }

    #[test]
    fn test_month_serde_as_string() {
        let m = Month::new(2025, 3).unwrap();
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "\"2025-03\"");
        let back: Month = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
        assert!(serde_json::from_str::<Month>("\"2025-00\"").is_err());
    }

    #[test]
    fn test_new_expense_validation() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let expense = |amount| NewExpense::new(date, amount, Category::Food, PaymentMethod::Cash);
        assert!(expense(0.0).validate().is_ok());
        assert!(expense(-1.0).validate().is_err());
        assert!(expense(f64::NAN).validate().is_err());
    }
}
