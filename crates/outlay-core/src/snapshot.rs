//! In-memory snapshot of the expense ledger
//!
//! A `Snapshot` is the only input the analytics, budget and export layers
//! read from. It is loaded fresh from a [`LedgerGateway`] on demand and never
//! changes afterwards; mutations go to the ledger and a new snapshot is loaded.

use std::cmp::Reverse;

use chrono::NaiveDate;
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::Result;
use crate::ledger::LedgerGateway;
use crate::models::ExpenseRecord;

/// Immutable expense records ordered newest first (date desc, then id desc)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Snapshot {
    records: Vec<ExpenseRecord>,
}

impl Snapshot {
    /// Load every expense from the ledger
    pub fn load<G: LedgerGateway + ?Sized>(ledger: &G) -> Result<Self> {
        let snapshot = Self::from_records(ledger.list_expenses()?);
        debug!(records = snapshot.len(), "Snapshot loaded");
        Ok(snapshot)
    }

    /// Build a snapshot from records in any order
    pub fn from_records(mut records: Vec<ExpenseRecord>) -> Self {
        records.sort_by_key(|r| Reverse((r.date, r.id)));
        Self { records }
    }

    /// Keep the records matching `predicate`, preserving order
    pub fn filter<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&ExpenseRecord) -> bool,
    {
        Self {
            records: self
                .records
                .iter()
                .filter(|r| predicate(*r))
                .cloned()
                .collect(),
        }
    }

    pub fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ExpenseRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of `amount` over every record
    pub fn total(&self) -> f64 {
        self.records.iter().map(|r| r.amount).sum()
    }

    /// Earliest and latest dates present, None when empty
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        // Sorted newest first
        let latest = self.records.first()?.date;
        let earliest = self.records.last()?.date;
        Some((earliest, latest))
    }

    /// SHA-256 over the full record content, hex encoded
    ///
    /// Two snapshots with equal records always hash equal, regardless of
    /// when or how they were loaded.
    pub fn content_hash(&self) -> String {
        let mut hasher = Sha256::new();
        for r in &self.records {
            hasher.update(r.id.to_be_bytes());
            hasher.update(r.date.to_string().as_bytes());
            hasher.update(r.amount.to_be_bytes());
            hasher.update(r.category.as_str().as_bytes());
            hasher.update([0u8]);
            hasher.update(r.payment_method.as_str().as_bytes());
            hasher.update([0u8]);
            hasher.update((r.notes.len() as u64).to_be_bytes());
            hasher.update(r.notes.as_bytes());
        }
        hex::encode(hasher.finalize())
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a ExpenseRecord;
    type IntoIter = std::slice::Iter<'a, ExpenseRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl From<Vec<ExpenseRecord>> for Snapshot {
    fn from(records: Vec<ExpenseRecord>) -> Self {
        Self::from_records(records)
    }
}
