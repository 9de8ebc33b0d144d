use crate::error::AnalyticsError;
use crate::report::TimelineEntry;
use core_types::Shipment;

/// Derives a display label from a shipment id: a fixed prefix plus the id's last
/// `suffix_len` characters. Ids shorter than that are used whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelPolicy {
    prefix: String,
    suffix_len: usize,
}

impl LabelPolicy {
    pub fn new(prefix: impl Into<String>, suffix_len: usize) -> Result<Self, AnalyticsError> {
        if suffix_len == 0 {
            return Err(AnalyticsError::InvalidParameters(
                "timeline label suffix length must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            prefix: prefix.into(),
            suffix_len,
        })
    }

    pub fn label(&self, shipment_id: &str) -> String {
        let skip = shipment_id.chars().count().saturating_sub(self.suffix_len);
        let suffix: String = shipment_id.chars().skip(skip).collect();
        format!("{}{}", self.prefix, suffix)
    }
}

impl Default for LabelPolicy {
    fn default() -> Self {
        Self {
            prefix: "SHP-".to_string(),
            suffix_len: 4,
        }
    }
}

/// Extracts transit intervals from shipments.
#[derive(Debug, Clone, Default)]
pub struct TimelineBuilder {
    labels: LabelPolicy,
}

impl TimelineBuilder {
    pub fn new(labels: LabelPolicy) -> Self {
        Self { labels }
    }

    /// One entry per shipment that has both a ship date and an estimated arrival,
    /// in collection order. Shipments missing either date are skipped.
    ///
    /// Labels are not deduplicated and `start <= finish` is not checked.
    pub fn build(&self, shipments: &[Shipment]) -> Vec<TimelineEntry> {
        let entries: Vec<TimelineEntry> = shipments
            .iter()
            .filter_map(|s| {
                let (start, finish) = (s.ship_date()?, s.estimated_arrival()?);
                Some(TimelineEntry {
                    label: self.labels.label(s.shipment_id()),
                    start,
                    finish,
                    status: s.status().to_string(),
                })
            })
            .collect();

        tracing::debug!(
            shipments = shipments.len(),
            entries = entries.len(),
            skipped = shipments.len() - entries.len(),
            "Timeline built."
        );
        entries
    }
}
