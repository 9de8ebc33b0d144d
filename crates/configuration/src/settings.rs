use serde::Deserialize;

/// The root configuration structure for the dashboard pipeline.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub views: ViewSettings,
}

/// Selects which base collection the aggregate views are computed from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum AnalyticsScope {
    /// Charts summarize the whole snapshot regardless of the active filters.
    #[default]
    #[cfg_attr(feature = "clap", value(name = "all_records"))]
    AllRecords,
    /// Charts summarize only the records that passed the filters.
    Filtered,
}

/// Parameters that shape the analytic views.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    /// How many customers the top-customer ranking keeps.
    pub top_customers_limit: usize,
    /// Shipment statuses counted as "not on time" in carrier performance.
    pub delayed_statuses: Vec<String>,
    /// Prepended to every timeline label (e.g. "SHP-").
    pub timeline_label_prefix: String,
    /// Number of trailing shipment-id characters kept in a timeline label.
    pub timeline_label_suffix_len: usize,
    pub analytics_scope: AnalyticsScope,
}

// --- Default Implementations ---
// This allows a user to omit the `[views]` section (or any key in it)
// and still have it work with sensible defaults.

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            top_customers_limit: 5,
            delayed_statuses: vec!["Delayed".to_string()],
            timeline_label_prefix: "SHP-".to_string(),
            timeline_label_suffix_len: 4,
            analytics_scope: AnalyticsScope::default(),
        }
    }
}
