use chrono::{DateTime, NaiveDate, Utc};
use core_types::{Order, Shipment};
use rust_decimal::Decimal;
use serde::Serialize;

/// One slice of a status partition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: usize,
}

/// Number of records falling on one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateCount {
    pub date: NaiveDate,
    pub count: usize,
}

/// A group's order count and summed value, as ranked by total value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedGroup {
    pub group: String,
    pub order_count: usize,
    pub total_value: Decimal,
}

/// On-time delivery figures for one group of shipments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupPerformance {
    pub group: String,
    pub total_count: usize,
    pub delayed_count: usize,
    pub on_time_pct: Option<Decimal>, // None when the group has no shipments
}

/// One shipment's transit interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    pub label: String,
    pub start: DateTime<Utc>,
    pub finish: DateTime<Utc>,
    pub status: String,
}

/// The views derived from the order collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrderViews {
    pub status_distribution: Vec<StatusCount>,
    pub orders_over_time: Vec<DateCount>,
    pub top_customers: Vec<RankedGroup>,
}

/// The views derived from the shipment collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShipmentViews {
    pub status_distribution: Vec<StatusCount>,
    pub carrier_performance: Vec<GroupPerformance>,
    pub timeline: Vec<TimelineEntry>,
}

/// Everything a rendering layer needs for the order and shipment tracking page.
///
/// This struct is the final output of `AnalyticsEngine::build_dashboard`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardReport {
    pub filtered_orders: Vec<Order>,
    pub filtered_shipments: Vec<Shipment>,
    pub orders: OrderViews,
    pub shipments: ShipmentViews,
}
