//! Memoized aggregates keyed by snapshot content
//!
//! Snapshots are reloaded fresh for every view, so the key is the snapshot's
//! content hash rather than any pointer or load time. Call
//! [`AggregateCache::invalidate`] after writing to the ledger to drop
//! entries that can no longer be hit.
//!
//! The cache only pays off in a long-lived presentation layer (a dashboard
//! or server that renders many views per process). A one-shot CLI command
//! builds a fresh cache and computes each snapshot once.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::analytics::{category_distribution, daily_trend, monthly_comparison};
use crate::models::{CategoryTotal, DailyTotal, MonthlyTotal};
use crate::snapshot::Snapshot;

/// Default number of snapshots kept
pub const DEFAULT_CACHE_ENTRIES: usize = 16;

/// All snapshot-wide aggregates, computed together
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregates {
    pub categories: Vec<CategoryTotal>,
    pub daily: Vec<DailyTotal>,
    pub monthly: Vec<MonthlyTotal>,
}

impl Aggregates {
    pub fn compute(snapshot: &Snapshot) -> Self {
        Self {
            categories: category_distribution(snapshot),
            daily: daily_trend(snapshot),
            monthly: monthly_comparison(snapshot),
        }
    }
}

/// Bounded content-addressed cache of [`Aggregates`]
///
/// When full, the oldest inserted entry is evicted.
#[derive(Debug)]
pub struct AggregateCache {
    entries: HashMap<String, Arc<Aggregates>>,
    order: VecDeque<String>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl AggregateCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
            hits: 0,
            misses: 0,
        }
    }

    /// Cached aggregates for this snapshot's content, computing on a miss
    pub fn get_or_compute(&mut self, snapshot: &Snapshot) -> Arc<Aggregates> {
        let key = snapshot.content_hash();
        if let Some(found) = self.entries.get(&key) {
            self.hits += 1;
            debug!(key = %&key[..12], "Aggregate cache hit");
            return Arc::clone(found);
        }

        self.misses += 1;
        debug!(key = %&key[..12], "Aggregate cache miss");
        let computed = Arc::new(Aggregates::compute(snapshot));

        while self.order.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
        self.order.push_back(key.clone());
        self.entries.insert(key, Arc::clone(&computed));
        computed
    }

    /// Drop every entry (call after any ledger write)
    pub fn invalidate(&mut self) {
        if !self.entries.is_empty() {
            debug!(entries = self.entries.len(), "Aggregate cache invalidated");
        }
        self.entries.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// (hits, misses) since creation
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}

impl Default for AggregateCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_ENTRIES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, ExpenseRecord, PaymentMethod};
    use chrono::NaiveDate;

    fn snapshot(amounts: &[f64]) -> Snapshot {
        Snapshot::from_records(
            amounts
                .iter()
                .enumerate()
                .map(|(i, &amount)| ExpenseRecord {
                    id: i as i64 + 1,
                    date: NaiveDate::from_ymd_opt(2025, 1, 1 + i as u32).unwrap(),
                    amount,
                    category: Category::Food,
                    payment_method: PaymentMethod::Cash,
                    notes: String::new(),
                })
                .collect(),
        )
    }

    #[test]
    fn test_hit_on_equal_content_from_separate_loads() {
        let mut cache = AggregateCache::new(4);
        let first = cache.get_or_compute(&snapshot(&[10.0, 20.0]));
        // A distinct but equal snapshot, as after a reload
        let second = cache.get_or_compute(&snapshot(&[10.0, 20.0]));

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.stats(), (1, 1));
        assert_eq!(first.monthly[0].amount, 30.0);
    }

    #[test]
    fn test_changed_content_misses() {
        let mut cache = AggregateCache::new(4);
        cache.get_or_compute(&snapshot(&[10.0]));
        let changed = cache.get_or_compute(&snapshot(&[11.0]));
        assert_eq!(changed.daily[0].amount, 11.0);
        assert_eq!(cache.stats(), (0, 2));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut cache = AggregateCache::new(2);
        cache.get_or_compute(&snapshot(&[1.0]));
        cache.get_or_compute(&snapshot(&[2.0]));
        cache.get_or_compute(&snapshot(&[3.0]));
        assert_eq!(cache.len(), 2);

        // [1.0] was evicted
        cache.get_or_compute(&snapshot(&[1.0]));
        assert_eq!(cache.stats(), (0, 4));
    }

    #[test]
    fn test_invalidate_clears() {
        let mut cache = AggregateCache::default();
        cache.get_or_compute(&snapshot(&[5.0]));
        cache.invalidate();
        assert!(cache.is_empty());
        cache.get_or_compute(&snapshot(&[5.0]));
        assert_eq!(cache.stats(), (0, 2));
    }

    #[test]
    fn test_empty_snapshot_cached() {
        let mut cache = AggregateCache::default();
        let aggregates = cache.get_or_compute(&Snapshot::default());
        assert!(aggregates.categories.is_empty());
        assert!(aggregates.daily.is_empty());
        assert!(aggregates.monthly.is_empty());
    }
}
