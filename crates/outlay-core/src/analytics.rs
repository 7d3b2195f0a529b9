//! Spending aggregates over a snapshot
//!
//! Every function here is pure: it reads a [`Snapshot`] and returns a typed
//! result. Each total is the sum of `amount` over exactly the records that
//! match the aggregate's key, so the totals of any aggregate add up to
//! `snapshot.total()` up to floating-point rounding (amounts are `f64` and
//! each aggregate sums in its own order). An empty snapshot yields an empty
//! result.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use crate::models::{Category, CategoryTotal, DailyTotal, Month, MonthlyTotal};
use crate::snapshot::Snapshot;

/// Records whose date falls in `month` (day ignored), in snapshot order
pub fn monthly_summary(snapshot: &Snapshot, month: Month) -> Snapshot {
    snapshot.filter(|r| month.contains(r.date))
}

/// Total spend per category, largest first
///
/// Equal totals are ordered by ascending category label so the legend
/// order is stable across reloads.
pub fn category_distribution(snapshot: &Snapshot) -> Vec<CategoryTotal> {
    let mut groups: HashMap<Category, (f64, usize)> = HashMap::new();
    for r in snapshot {
        let entry = groups.entry(r.category).or_insert((0.0, 0));
        entry.0 += r.amount;
        entry.1 += 1;
    }

    let total: f64 = groups.values().map(|(amount, _)| amount).sum();

    let mut breakdown: Vec<CategoryTotal> = groups
        .into_iter()
        .map(|(category, (amount, count))| CategoryTotal {
            category,
            amount,
            percentage: if total > 0.0 {
                (amount / total) * 100.0
            } else {
                0.0
            },
            count,
        })
        .collect();

    breakdown.sort_by(|a, b| {
        b.amount
            .total_cmp(&a.amount)
            .then_with(|| a.category.as_str().cmp(b.category.as_str()))
    });
    breakdown
}

/// Total spend per day, oldest first; days without records are omitted
pub fn daily_trend(snapshot: &Snapshot) -> Vec<DailyTotal> {
    let mut days: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for r in snapshot {
        let entry = days.entry(r.date).or_insert((0.0, 0));
        entry.0 += r.amount;
        entry.1 += 1;
    }

    days.into_iter()
        .map(|(date, (amount, count))| DailyTotal {
            date,
            amount,
            count,
        })
        .collect()
}

/// Total spend per calendar month, oldest first
pub fn monthly_comparison(snapshot: &Snapshot) -> Vec<MonthlyTotal> {
    let mut months: BTreeMap<Month, (f64, usize)> = BTreeMap::new();
    for r in snapshot {
        let entry = months.entry(Month::of(r.date)).or_insert((0.0, 0));
        entry.0 += r.amount;
        entry.1 += 1;
    }

    months
        .into_iter()
        .map(|(month, (amount, count))| MonthlyTotal {
            month,
            amount,
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseRecord, PaymentMethod};

    fn record(id: i64, date: &str, amount: f64, category: Category) -> ExpenseRecord {
        ExpenseRecord {
            id,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            amount,
            category,
            payment_method: PaymentMethod::Card,
            notes: String::new(),
        }
    }

    fn sample() -> Snapshot {
        Snapshot::from_records(vec![
            record(1, "2025-01-05", 120.0, Category::Food),
            record(2, "2025-01-05", 80.0, Category::Transport),
            record(3, "2025-01-20", 300.0, Category::Bills),
            record(4, "2025-02-01", 50.0, Category::Food),
            record(5, "2025-02-14", 250.0, Category::Entertainment),
            record(6, "2024-12-31", 30.0, Category::Transport),
        ])
    }

    #[test]
    fn test_monthly_summary_filters_by_year_and_month() {
        let snap = sample();
        let jan = monthly_summary(&snap, "2025-01".parse().unwrap());
        let ids: Vec<i64> = jan.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);

        // Same month number, different year
        let jan_2024 = monthly_summary(&snap, "2024-01".parse().unwrap());
        assert!(jan_2024.is_empty());
    }

    #[test]
    fn test_monthly_summary_empty_inputs() {
        let empty = Snapshot::default();
        assert!(monthly_summary(&empty, "2025-01".parse().unwrap()).is_empty());
        assert!(monthly_summary(&sample(), "2030-06".parse().unwrap()).is_empty());
    }

    #[test]
    fn test_category_distribution_sorted_desc() {
        let breakdown = category_distribution(&sample());
        let order: Vec<Category> = breakdown.iter().map(|c| c.category).collect();
        assert_eq!(
            order,
            vec![
                Category::Bills,
                Category::Entertainment,
                Category::Food,
                Category::Transport
            ]
        );
        assert_eq!(breakdown[2].amount, 170.0);
        assert_eq!(breakdown[2].count, 2);
        assert_eq!(breakdown[3].amount, 110.0);
    }

    #[test]
    fn test_category_distribution_tie_break_by_label() {
        let snap = Snapshot::from_records(vec![
            record(1, "2025-01-01", 100.0, Category::Transport),
            record(2, "2025-01-02", 100.0, Category::Bills),
            record(3, "2025-01-03", 100.0, Category::Health),
            record(4, "2025-01-04", 500.0, Category::Travel),
        ]);
        let order: Vec<&str> = category_distribution(&snap)
            .iter()
            .map(|c| c.category.as_str())
            .collect();
        assert_eq!(order, vec!["Travel", "Bills", "Health", "Transport"]);
    }

    #[test]
    fn test_category_distribution_percentages() {
        let snap = Snapshot::from_records(vec![
            record(1, "2025-01-01", 75.0, Category::Food),
            record(2, "2025-01-02", 25.0, Category::Other),
        ]);
        let breakdown = category_distribution(&snap);
        assert_eq!(breakdown[0].percentage, 75.0);
        assert_eq!(breakdown[1].percentage, 25.0);

        // All-zero amounts do not divide by zero
        let zeros = Snapshot::from_records(vec![record(1, "2025-01-01", 0.0, Category::Food)]);
        assert_eq!(category_distribution(&zeros)[0].percentage, 0.0);
    }

    #[test]
    fn test_daily_trend_groups_and_orders() {
        let trend = daily_trend(&sample());
        let dates: Vec<String> = trend.iter().map(|d| d.date.to_string()).collect();
        assert_eq!(
            dates,
            vec![
                "2024-12-31",
                "2025-01-05",
                "2025-01-20",
                "2025-02-01",
                "2025-02-14"
            ]
        );
        assert_eq!(trend[1].amount, 200.0);
        assert_eq!(trend[1].count, 2);
    }

    #[test]
    fn test_monthly_comparison_labels_and_order() {
        let months = monthly_comparison(&sample());
        let labels: Vec<String> = months.iter().map(|m| m.month.to_string()).collect();
        assert_eq!(labels, vec!["2024-12", "2025-01", "2025-02"]);
        assert_eq!(months[1].amount, 500.0);
        assert_eq!(months[2].amount, 300.0);
    }

    #[test]
    fn test_sums_are_conserved() {
        let mut records = sample().records().to_vec();
        records.push(record(90, "2025-01-05", 0.1, Category::Food));
        records.push(record(91, "2025-01-05", 0.2, Category::Health));
        records.push(record(92, "2025-02-14", 0.3, Category::Food));
        records.push(record(93, "2024-12-31", 0.7, Category::Other));
        let snap = Snapshot::from_records(records);
        let total = snap.total();

        let by_category: f64 = category_distribution(&snap).iter().map(|c| c.amount).sum();
        let by_day: f64 = daily_trend(&snap).iter().map(|d| d.amount).sum();
        let by_month: f64 = monthly_comparison(&snap).iter().map(|m| m.amount).sum();
        // Summation order differs per aggregate
        for sum in [by_category, by_day, by_month] {
            assert!((sum - total).abs() < 1e-9, "{} vs {}", sum, total);
        }

        let counted: usize = daily_trend(&snap).iter().map(|d| d.count).sum();
        assert_eq!(counted, snap.len());
    }

    #[test]
    fn test_empty_snapshot_aggregates() {
        let empty = Snapshot::default();
        assert!(category_distribution(&empty).is_empty());
        assert!(daily_trend(&empty).is_empty());
        assert!(monthly_comparison(&empty).is_empty());
    }
}
