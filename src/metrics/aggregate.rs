//! Grouped reductions over sales records.
//!
//! Every grouping produces an [`Aggregate`] in *natural key order*: ascending
//! for text keys, bucket order for age groups, Monday→Sunday for weekdays.
//! Sorting by value is stable over that order, so ties always resolve to the
//! entry that comes first naturally.

use std::collections::BTreeMap;
use std::fmt::Display;

use chrono::{Duration, NaiveDate};

use crate::domain::{AgeGroup, SalesRecord, TimeSeries};

/// How each group's values are reduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduce {
    Sum,
    Count,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AggregateEntry {
    pub key: String,
    pub value: f64,
}

/// An ordered mapping from category key to a reduced value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregate {
    entries: Vec<AggregateEntry>,
}

impl Aggregate {
    pub fn from_entries(entries: Vec<AggregateEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[AggregateEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries.iter().find(|e| e.key == key).map(|e| e.value)
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|e| e.value).sum()
    }

    /// Largest value first; ties keep natural order.
    pub fn sorted_desc(&self) -> Aggregate {
        let mut entries = self.entries.clone();
        entries.sort_by(|a, b| b.value.total_cmp(&a.value));
        Aggregate { entries }
    }

    /// Smallest value first; ties keep natural order.
    pub fn sorted_asc(&self) -> Aggregate {
        let mut entries = self.entries.clone();
        entries.sort_by(|a, b| a.value.total_cmp(&b.value));
        Aggregate { entries }
    }

    /// The `n` largest entries, descending.
    pub fn top(&self, n: usize) -> Aggregate {
        let mut sorted = self.sorted_desc();
        sorted.entries.truncate(n);
        sorted
    }

    /// The first entry holding the maximum value, in natural order.
    pub fn max_entry(&self) -> Option<&AggregateEntry> {
        self.entries.iter().fold(None, |best: Option<&AggregateEntry>, e| match best {
            Some(b) if b.value >= e.value => Some(b),
            _ => Some(e),
        })
    }
}

/// Group records by `key` and reduce `value` per group.
///
/// Records whose key is `None` are excluded from the result.
pub fn group_by<K, KF, VF>(records: &[SalesRecord], key: KF, value: VF, reduce: Reduce) -> Aggregate
where
    K: Ord + Display,
    KF: Fn(&SalesRecord) -> Option<K>,
    VF: Fn(&SalesRecord) -> f64,
{
    let mut groups: BTreeMap<K, (f64, usize)> = BTreeMap::new();
    for r in records {
        let Some(k) = key(r) else { continue };
        let slot = groups.entry(k).or_insert((0.0, 0));
        slot.0 += value(r);
        slot.1 += 1;
    }

    let entries = groups
        .into_iter()
        .map(|(k, (sum, count))| AggregateEntry {
            key: k.to_string(),
            value: match reduce {
                Reduce::Sum => sum,
                Reduce::Count => count as f64,
            },
        })
        .collect();

    Aggregate { entries }
}

pub fn group_sum<K, KF, VF>(records: &[SalesRecord], key: KF, value: VF) -> Aggregate
where
    K: Ord + Display,
    KF: Fn(&SalesRecord) -> Option<K>,
    VF: Fn(&SalesRecord) -> f64,
{
    group_by(records, key, value, Reduce::Sum)
}

/// Row counts per key.
pub fn value_counts<K, KF>(records: &[SalesRecord], key: KF) -> Aggregate
where
    K: Ord + Display,
    KF: Fn(&SalesRecord) -> Option<K>,
{
    group_by(records, key, |_| 0.0, Reduce::Count)
}

/// Mean of the values that are present.
pub fn mean_of<F>(records: &[SalesRecord], value: F) -> Option<f64>
where
    F: Fn(&SalesRecord) -> Option<f64>,
{
    let (sum, n) = records
        .iter()
        .filter_map(value)
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 { None } else { Some(sum / n as f64) }
}

/// Sum `value` per calendar date, dates ascending.
pub fn daily_totals<F>(records: &[SalesRecord], value: F) -> TimeSeries
where
    F: Fn(&SalesRecord) -> f64,
{
    let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for r in records {
        *by_date.entry(r.date).or_insert(0.0) += value(r);
    }
    TimeSeries {
        points: by_date.into_iter().collect(),
    }
}

/// Revenue of rows dated strictly after `latest - days`, where `latest` is the
/// most recent date in `records`.
pub fn recent_revenue(records: &[SalesRecord], days: i64) -> f64 {
    let Some(latest) = records.iter().map(|r| r.date).max() else {
        return 0.0;
    };
    let cutoff = latest - Duration::days(days);
    records
        .iter()
        .filter(|r| r.date > cutoff)
        .map(|r| r.revenue)
        .sum()
}

/// Revenue by age group plus the number of ages that fell outside `[0, 100]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgeBreakdown {
    pub revenue: Aggregate,
    pub out_of_range: usize,
}

pub fn age_breakdown(records: &[SalesRecord]) -> AgeBreakdown {
    let revenue = group_sum(records, |r| r.age_group(), |r| r.revenue);
    let out_of_range = records
        .iter()
        .filter(|r| matches!(r.age, Some(age) if AgeGroup::from_age(age).is_none()))
        .count();
    AgeBreakdown { revenue, out_of_range }
}
