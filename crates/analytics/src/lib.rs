//! # Freightlens Analytics Engine
//!
//! This crate turns order and shipment snapshots into the summary views shown on the
//! tracking dashboard: status partitions, orders per day, top customers, carrier
//! on-time performance, and the shipment timeline.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of storage or
//!   rendering. It depends only on `core-types` and `configuration`.
//! - **Stateless Calculation:** `FilterEngine` and `AnalyticsEngine` hold parameters
//!   only. They take record slices as input and return new collections, never
//!   mutating what they were given.
//!
//! ## Public API
//!
//! - `FilterEngine`, `OrderCriteria`, `ShipmentCriteria`, `Restriction`, `DateRange`:
//!   predicate filtering.
//! - `AnalyticsEngine`: the per-view calculations and `build_dashboard`.
//! - `aggregate`: the field-generic grouping functions behind each view.
//! - `DashboardReport` and the view row types.
//! - `AnalyticsError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod aggregate;
pub mod engine;
pub mod error;
pub mod filter;
pub mod predicate;
pub mod report;
pub mod timeline;

// Re-export the key components to create a clean, public-facing API.
pub use engine::{AnalyticsEngine, DashboardCriteria};
pub use error::AnalyticsError;
pub use filter::{DateRange, FilterEngine, OrderCriteria, Restriction, ShipmentCriteria, observed_values};
pub use predicate::DelayedPredicate;
pub use report::{
    DashboardReport, DateCount, GroupPerformance, OrderViews, RankedGroup, ShipmentViews,
    StatusCount, TimelineEntry,
};
pub use timeline::{LabelPolicy, TimelineBuilder};
