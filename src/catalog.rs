use crate::models::{ChannelCategory, Granularity, MetricGroup, MetricRecord, TOTAL_INTERACTIONS_GROUP};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The generated, read-only set of metric records for one granularity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricCatalog {
    seed: u64,
    granularity: Granularity,
    generated_at: DateTime<Utc>,
    records: Vec<MetricRecord>,
}

impl MetricCatalog {
    pub fn new(seed: u64, granularity: Granularity, records: Vec<MetricRecord>) -> Self {
        Self {
            seed,
            granularity,
            generated_at: Utc::now(),
            records,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    pub fn records(&self) -> &[MetricRecord] {
        &self.records
    }

    pub fn find(&self, metric_name: &str) -> Option<&MetricRecord> {
        self.records.iter().find(|record| record.metric_name == metric_name)
    }

    /// The total group followed by one group per end-channel category.
    /// Built fresh on each call.
    pub fn groups(&self) -> Vec<MetricGroup> {
        let mut groups = Vec::with_capacity(1 + ChannelCategory::GROUP_ORDER.len());
        groups.push(MetricGroup {
            name: TOTAL_INTERACTIONS_GROUP.to_string(),
            metrics: self.records.clone(),
        });

        for category in ChannelCategory::GROUP_ORDER {
            groups.push(MetricGroup {
                name: category.group_name().to_string(),
                metrics: self
                    .records
                    .iter()
                    .filter(|record| record.end_category() == category)
                    .cloned()
                    .collect(),
            });
        }

        groups
    }
}
