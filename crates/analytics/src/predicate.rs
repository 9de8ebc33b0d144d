use crate::error::AnalyticsError;
use std::collections::BTreeSet;

/// Decides which shipment statuses count against on-time delivery.
///
/// Defaults to the single status `"Delayed"`; other terminal-failure statuses
/// (e.g. `"Lost"`) can be added through configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelayedPredicate {
    statuses: BTreeSet<String>,
}

impl DelayedPredicate {
    pub const DEFAULT_STATUS: &'static str = "Delayed";

    pub fn new<I, S>(statuses: I) -> Result<Self, AnalyticsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let statuses: BTreeSet<String> = statuses
            .into_iter()
            .map(Into::into)
            .filter(|s| !s.trim().is_empty())
            .collect();

        if statuses.is_empty() {
            return Err(AnalyticsError::InvalidParameters(
                "at least one delayed status is required".to_string(),
            ));
        }
        Ok(Self { statuses })
    }

    pub fn is_delayed(&self, status: &str) -> bool {
        self.statuses.contains(status)
    }

    pub fn statuses(&self) -> impl Iterator<Item = &str> {
        self.statuses.iter().map(String::as_str)
    }
}

impl Default for DelayedPredicate {
    fn default() -> Self {
        Self {
            statuses: BTreeSet::from([Self::DEFAULT_STATUS.to_string()]),
        }
    }
}
