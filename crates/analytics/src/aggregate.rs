//! Field-generic aggregations over record collections.
//!
//! Each function takes accessors for the fields it groups or sums, so the same
//! logic serves orders and shipments alike.

use crate::predicate::DelayedPredicate;
use crate::report::{DateCount, GroupPerformance, RankedGroup, StatusCount};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Counts records per value of a status-like field.
///
/// Rows are ordered by descending count, then by status. The counts always sum to
/// `records.len()`.
pub fn distribution<'a, T, F>(records: &'a [T], status: F) -> Vec<StatusCount>
where
    F: Fn(&'a T) -> &'a str,
{
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in records {
        *counts.entry(status(record)).or_default() += 1;
    }

    let mut rows: Vec<StatusCount> = counts
        .into_iter()
        .map(|(status, count)| StatusCount {
            status: status.to_string(),
            count,
        })
        .collect();
    // BTreeMap iteration already orders by status; a stable sort keeps it as the tie-break.
    rows.sort_by(|a, b| b.count.cmp(&a.count));
    rows
}

/// Counts records per calendar date, ascending. Dates without records are absent.
pub fn counts_by_date<T, F>(records: &[T], date: F) -> Vec<DateCount>
where
    F: Fn(&T) -> DateTime<Utc>,
{
    let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for record in records {
        *counts.entry(date(record).date_naive()).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(date, count)| DateCount { date, count })
        .collect()
}

/// Groups records, sums a value per group, and keeps the `limit` largest totals.
///
/// Equal totals are ordered by group name ascending so the ranking is reproducible.
/// A total that would exceed `Decimal::MAX` saturates there.
pub fn top_groups<'a, T, G, V>(records: &'a [T], group: G, value: V, limit: usize) -> Vec<RankedGroup>
where
    G: Fn(&'a T) -> &'a str,
    V: Fn(&'a T) -> Decimal,
{
    let mut totals: BTreeMap<&str, (usize, Decimal)> = BTreeMap::new();
    for record in records {
        let entry = totals.entry(group(record)).or_insert((0, Decimal::ZERO));
        entry.0 += 1;
        entry.1 = entry.1.checked_add(value(record)).unwrap_or_else(|| {
            tracing::warn!(group = group(record), "Group total saturated at Decimal::MAX.");
            Decimal::MAX
        });
    }

    let mut ranked: Vec<RankedGroup> = totals
        .into_iter()
        .map(|(group, (order_count, total_value))| RankedGroup {
            group: group.to_string(),
            order_count,
            total_value,
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.total_value
            .cmp(&a.total_value)
            .then_with(|| a.group.cmp(&b.group))
    });
    ranked.truncate(limit);
    ranked
}

/// Computes the on-time percentage for each group of records.
///
/// Groups come out in ascending name order.
pub fn group_performance<'a, T, G, S>(
    records: &'a [T],
    group: G,
    status: S,
    delayed: &DelayedPredicate,
) -> Vec<GroupPerformance>
where
    G: Fn(&'a T) -> &'a str,
    S: Fn(&'a T) -> &'a str,
{
    let mut tallies: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for record in records {
        let entry = tallies.entry(group(record)).or_default();
        entry.0 += 1;
        if delayed.is_delayed(status(record)) {
            entry.1 += 1;
        }
    }

    tallies
        .into_iter()
        .map(|(group, (total_count, delayed_count))| GroupPerformance {
            group: group.to_string(),
            total_count,
            delayed_count,
            on_time_pct: on_time_pct(total_count, delayed_count),
        })
        .collect()
}

/// `(1 - delayed / total) * 100`, clamped to `[0, 100]`.
///
/// Returns `None` when `total` is zero: there is no data to rate.
pub fn on_time_pct(total: usize, delayed: usize) -> Option<Decimal> {
    if total == 0 {
        tracing::warn!(delayed, "On-time percentage requested for an empty group.");
        return None;
    }

    let hundred = Decimal::ONE_HUNDRED;
    let pct = (Decimal::ONE - Decimal::from(delayed) / Decimal::from(total)) * hundred;
    Some(pct.clamp(Decimal::ZERO, hundred))
}
