use crate::aggregate;
use crate::error::AnalyticsError;
use crate::filter::{FilterEngine, OrderCriteria, ShipmentCriteria};
use crate::predicate::DelayedPredicate;
use crate::report::{
    DashboardReport, DateCount, GroupPerformance, OrderViews, RankedGroup, ShipmentViews,
    StatusCount, TimelineEntry,
};
use crate::timeline::{LabelPolicy, TimelineBuilder};
use configuration::{AnalyticsScope, ViewSettings};
use core_types::{Order, Shipment, Snapshot};

/// Filter criteria for both collections of a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardCriteria {
    pub orders: OrderCriteria,
    pub shipments: ShipmentCriteria,
}

/// A stateless calculator for deriving the tracking views from orders and shipments.
///
/// The engine only carries parameters; every view is a pure function of the
/// records passed in.
#[derive(Debug, Clone)]
pub struct AnalyticsEngine {
    top_customers_limit: usize,
    delayed: DelayedPredicate,
    timeline: TimelineBuilder,
    scope: AnalyticsScope,
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self {
            top_customers_limit: Self::DEFAULT_TOP_CUSTOMERS,
            delayed: DelayedPredicate::default(),
            timeline: TimelineBuilder::default(),
            scope: AnalyticsScope::default(),
        }
    }
}

impl AnalyticsEngine {
    pub const DEFAULT_TOP_CUSTOMERS: usize = 5;

    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an engine from the `[views]` section of the configuration.
    pub fn from_settings(settings: &ViewSettings) -> Result<Self, AnalyticsError> {
        let delayed = DelayedPredicate::new(settings.delayed_statuses.iter().cloned())?;
        tracing::debug!(
            top_customers_limit = settings.top_customers_limit,
            delayed_statuses = ?delayed.statuses().collect::<Vec<_>>(),
            scope = ?settings.analytics_scope,
            "Analytics engine configured."
        );

        Ok(Self {
            top_customers_limit: settings.top_customers_limit,
            delayed,
            timeline: TimelineBuilder::new(LabelPolicy::new(
                settings.timeline_label_prefix.clone(),
                settings.timeline_label_suffix_len,
            )?),
            scope: settings.analytics_scope,
        })
    }

    pub fn with_scope(mut self, scope: AnalyticsScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn scope(&self) -> AnalyticsScope {
        self.scope
    }

    pub fn order_status_distribution(&self, orders: &[Order]) -> Vec<StatusCount> {
        aggregate::distribution(orders, Order::status)
    }

    pub fn shipment_status_distribution(&self, shipments: &[Shipment]) -> Vec<StatusCount> {
        aggregate::distribution(shipments, Shipment::status)
    }

    pub fn orders_over_time(&self, orders: &[Order]) -> Vec<DateCount> {
        aggregate::counts_by_date(orders, Order::order_date)
    }

    /// The configured number of customers with the highest summed order value.
    pub fn top_customers(&self, orders: &[Order]) -> Vec<RankedGroup> {
        aggregate::top_groups(
            orders,
            Order::customer,
            Order::total_value,
            self.top_customers_limit,
        )
    }

    pub fn carrier_performance(&self, shipments: &[Shipment]) -> Vec<GroupPerformance> {
        aggregate::group_performance(shipments, Shipment::carrier, Shipment::status, &self.delayed)
    }

    pub fn build_timeline(&self, shipments: &[Shipment]) -> Vec<TimelineEntry> {
        self.timeline.build(shipments)
    }

    /// The main entry point: filters both collections and computes every view.
    ///
    /// Under `AnalyticsScope::AllRecords` the aggregate views summarize the whole
    /// snapshot; under `Filtered` they summarize only what passed the filters. The
    /// timeline always reads the filtered shipments.
    pub fn build_dashboard(
        &self,
        snapshot: &Snapshot,
        criteria: &DashboardCriteria,
    ) -> DashboardReport {
        let filters = FilterEngine::new();
        let filtered_orders = filters.filter_orders(snapshot.orders(), &criteria.orders);
        let filtered_shipments =
            filters.filter_shipments(snapshot.shipments(), &criteria.shipments);

        let (order_base, shipment_base) = match self.scope {
            AnalyticsScope::AllRecords => (snapshot.orders(), snapshot.shipments()),
            AnalyticsScope::Filtered => (filtered_orders.as_slice(), filtered_shipments.as_slice()),
        };

        let orders = OrderViews {
            status_distribution: self.order_status_distribution(order_base),
            orders_over_time: self.orders_over_time(order_base),
            top_customers: self.top_customers(order_base),
        };
        let shipments = ShipmentViews {
            status_distribution: self.shipment_status_distribution(shipment_base),
            carrier_performance: self.carrier_performance(shipment_base),
            timeline: self.build_timeline(&filtered_shipments),
        };

        tracing::info!(
            scope = ?self.scope,
            orders = filtered_orders.len(),
            shipments = filtered_shipments.len(),
            timeline = shipments.timeline.len(),
            "Dashboard views computed."
        );

        DashboardReport {
            filtered_orders,
            filtered_shipments,
            orders,
            shipments,
        }
    }
}
