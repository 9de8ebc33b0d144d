use crate::error::AnalyticsError;
use chrono::{Duration, NaiveDate};
use core_types::{Order, Shipment};
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

/// A membership constraint on one string field.
///
/// `Unrestricted` lets every record through. `RestrictedTo` keeps only records whose
/// value is in the set, so an explicitly empty set matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub enum Restriction {
    #[default]
    Unrestricted,
    RestrictedTo(BTreeSet<String>),
}

impl Restriction {
    /// Builds a restriction from a caller's multi-select.
    ///
    /// An empty selection means the caller picked nothing to narrow by, which is
    /// treated as `Unrestricted`.
    pub fn from_selection<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: BTreeSet<String> = values.into_iter().map(Into::into).collect();
        if set.is_empty() {
            Restriction::Unrestricted
        } else {
            Restriction::RestrictedTo(set)
        }
    }

    pub fn allows(&self, value: &str) -> bool {
        match self {
            Restriction::Unrestricted => true,
            Restriction::RestrictedTo(set) => set.contains(value),
        }
    }
}

/// An inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, AnalyticsError> {
        if start > end {
            return Err(AnalyticsError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// The span of order dates present in `orders`.
    ///
    /// With no orders the range falls back to the thirty days ending on `today`.
    pub fn spanning(orders: &[Order], today: NaiveDate) -> Self {
        let dates = orders.iter().map(|o| o.order_date().date_naive());
        match (dates.clone().min(), dates.max()) {
            (Some(start), Some(end)) => Self { start, end },
            _ => Self {
                start: today - Duration::days(30),
                end: today,
            },
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Criteria applied to the order collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrderCriteria {
    pub status: Restriction,
    /// `None` applies no date constraint.
    pub date_range: Option<DateRange>,
}

/// Criteria applied to the shipment collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShipmentCriteria {
    pub status: Restriction,
    pub carrier: Restriction,
}

/// Applies caller-selected predicates to record collections.
///
/// Every method returns a new collection in the input's order; the input is
/// never touched.
#[derive(Debug, Default, Clone, Copy)]
pub struct FilterEngine;

impl FilterEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn filter_orders(&self, orders: &[Order], criteria: &OrderCriteria) -> Vec<Order> {
        let filtered: Vec<Order> = orders
            .iter()
            .filter(|o| criteria.status.allows(o.status()))
            .filter(|o| {
                criteria
                    .date_range
                    .is_none_or(|range| range.contains(o.order_date().date_naive()))
            })
            .cloned()
            .collect();

        tracing::debug!(
            input = orders.len(),
            kept = filtered.len(),
            "Orders filtered."
        );
        filtered
    }

    pub fn filter_shipments(
        &self,
        shipments: &[Shipment],
        criteria: &ShipmentCriteria,
    ) -> Vec<Shipment> {
        let filtered: Vec<Shipment> = shipments
            .iter()
            .filter(|s| criteria.status.allows(s.status()))
            .filter(|s| criteria.carrier.allows(s.carrier()))
            .cloned()
            .collect();

        tracing::debug!(
            input = shipments.len(),
            kept = filtered.len(),
            "Shipments filtered."
        );
        filtered
    }
}

/// The distinct values of a field, in the order they first appear.
///
/// This is the default selection a caller offers for a multi-select filter.
pub fn observed_values<'a, T, F>(records: &'a [T], field: F) -> Vec<String>
where
    F: Fn(&'a T) -> &'a str,
{
    let mut seen = HashSet::new();
    records
        .iter()
        .map(field)
        .filter(|value| seen.insert(*value))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap()
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn orders() -> Vec<Order> {
        vec![
            Order::new("O1", "Acme", "Shipped", at(1, 8), dec!(100)).unwrap(),
            Order::new("O2", "Globex", "Pending", at(2, 23), dec!(50)).unwrap(),
            Order::new("O3", "Acme", "Cancelled", at(3, 0), dec!(75)).unwrap(),
            Order::new("O4", "Initech", "Shipped", at(5, 12), dec!(20)).unwrap(),
        ]
    }

    fn shipments() -> Vec<Shipment> {
        vec![
            Shipment::new("S1", "X", "Delayed", None, None).unwrap(),
            Shipment::new("S2", "Y", "Delivered", None, None).unwrap(),
            Shipment::new("S3", "X", "In Transit", None, None).unwrap(),
        ]
    }

    fn ids(orders: &[Order]) -> Vec<&str> {
        orders.iter().map(Order::order_id).collect()
    }

    #[test]
    fn unrestricted_criteria_is_identity() {
        let input = orders();
        let output = FilterEngine::new().filter_orders(&input, &OrderCriteria::default());
        assert_eq!(output, input);
    }

    #[test]
    fn full_observed_selection_is_identity() {
        let input = orders();
        let criteria = OrderCriteria {
            status: Restriction::from_selection(observed_values(&input, Order::status)),
            date_range: Some(DateRange::spanning(&input, date(31))),
        };
        assert_eq!(FilterEngine::new().filter_orders(&input, &criteria), input);
    }

    #[test]
    fn empty_selection_means_unrestricted() {
        assert_eq!(
            Restriction::from_selection(Vec::<String>::new()),
            Restriction::Unrestricted
        );
    }

    #[test]
    fn explicit_empty_set_matches_nothing() {
        let criteria = ShipmentCriteria {
            status: Restriction::RestrictedTo(BTreeSet::new()),
            carrier: Restriction::Unrestricted,
        };
        assert!(FilterEngine::new().filter_shipments(&shipments(), &criteria).is_empty());
    }

    #[test]
    fn status_filter_narrows_and_preserves_order() {
        let criteria = OrderCriteria {
            status: Restriction::from_selection(["Shipped"]),
            date_range: None,
        };
        let output = FilterEngine::new().filter_orders(&orders(), &criteria);
        assert_eq!(ids(&output), vec!["O1", "O4"]);
        assert!(output.iter().all(|o| o.status() == "Shipped"));
    }

    #[test]
    fn date_range_is_inclusive_and_ignores_time_of_day() {
        let criteria = OrderCriteria {
            status: Restriction::Unrestricted,
            date_range: Some(DateRange::new(date(2), date(3)).unwrap()),
        };
        let output = FilterEngine::new().filter_orders(&orders(), &criteria);
        assert_eq!(ids(&output), vec!["O2", "O3"]);
    }

    #[test]
    fn inverted_date_range_is_rejected() {
        let err = DateRange::new(date(5), date(1)).unwrap_err();
        assert_eq!(
            err,
            AnalyticsError::InvalidDateRange {
                start: date(5),
                end: date(1)
            }
        );
    }

    #[test]
    fn shipment_filters_combine() {
        let criteria = ShipmentCriteria {
            status: Restriction::from_selection(["Delayed", "In Transit", "Delivered"]),
            carrier: Restriction::from_selection(["X"]),
        };
        let output = FilterEngine::new().filter_shipments(&shipments(), &criteria);
        let ids: Vec<&str> = output.iter().map(Shipment::shipment_id).collect();
        assert_eq!(ids, vec!["S1", "S3"]);
    }

    #[test]
    fn unknown_filter_value_yields_no_matches() {
        let criteria = ShipmentCriteria {
            status: Restriction::Unrestricted,
            carrier: Restriction::from_selection(["Nonexistent"]),
        };
        assert!(FilterEngine::new().filter_shipments(&shipments(), &criteria).is_empty());
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let criteria = OrderCriteria {
            status: Restriction::from_selection(observed_values(&[] as &[Order], Order::status)),
            date_range: Some(DateRange::spanning(&[], date(31))),
        };
        assert_eq!(criteria.status, Restriction::Unrestricted);
        assert!(FilterEngine::new().filter_orders(&[], &criteria).is_empty());
    }

    #[test]
    fn spanning_falls_back_to_last_thirty_days() {
        let range = DateRange::spanning(&[], date(31));
        assert_eq!(range.start(), date(1));
        assert_eq!(range.end(), date(31));
    }

    #[test]
    fn observed_values_keep_first_appearance_order() {
        assert_eq!(
            observed_values(&orders(), Order::status),
            vec!["Shipped", "Pending", "Cancelled"]
        );
    }
}
