use crate::catalog::MetricCatalog;
use crate::errors::{AppError, AppResult};
use crate::filter::MetricFilterEngine;
use crate::generator::MetricGenerator;
use crate::matrix::ChannelMatrix;
use crate::models::{
    Channel, ChannelInfo, ChannelSelector, ExportResponse, Granularity, MetricFilter, MetricGroup, MetricRecord,
};
use crate::settings::DashboardSettings;
use crate::summary::{summarize, MetricSummary};
use crate::state::DashboardState;
use chrono::Utc;
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportDocument<'a> {
    seed: u64,
    granularity: Granularity,
    filter: &'a MetricFilter,
    groups: &'a [MetricGroup],
}

pub struct DashboardCore {
    settings: DashboardSettings,
    matrix: ChannelMatrix,
    filter_engine: MetricFilterEngine,
    weekly: MetricCatalog,
    monthly: MetricCatalog,
}

impl DashboardCore {
    pub fn new(settings: DashboardSettings) -> AppResult<Self> {
        settings.validate()?;
        let matrix = ChannelMatrix::new();
        let generator = MetricGenerator::new(settings.clone(), matrix);
        Ok(Self {
            weekly: generator.generate(Granularity::Weekly),
            monthly: generator.generate(Granularity::Monthly),
            filter_engine: MetricFilterEngine::new(matrix),
            settings,
            matrix,
        })
    }

    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    pub fn default_granularity(&self) -> Granularity {
        self.settings.granularity
    }

    /// Fresh view state opened on the configured granularity.
    pub fn initial_state(&self) -> DashboardState {
        DashboardState::new(self.default_granularity())
    }

    pub fn catalog(&self, granularity: Granularity) -> &MetricCatalog {
        match granularity {
            Granularity::Weekly => &self.weekly,
            Granularity::Monthly => &self.monthly,
        }
    }

    pub fn list_channels(&self) -> Vec<ChannelInfo> {
        Channel::ALL
            .into_iter()
            .map(|channel| ChannelInfo {
                channel,
                label: channel.label().to_string(),
                category: channel.category(),
            })
            .collect()
    }

    pub fn is_valid_combination(&self, start: &str, end: &str) -> bool {
        self.matrix.is_valid_label_combination(start, end)
    }

    pub fn valid_end_channels(&self, start: &str) -> Vec<Channel> {
        self.matrix.valid_end_channels(&ChannelSelector::parse(start))
    }

    pub fn valid_start_channels(&self, end: &str) -> Vec<Channel> {
        self.matrix.valid_start_channels(&ChannelSelector::parse(end))
    }

    pub fn list_groups(&self, granularity: Granularity) -> Vec<MetricGroup> {
        self.catalog(granularity).groups()
    }

    pub fn filter_metrics(&self, granularity: Granularity, filter: &MetricFilter) -> Vec<MetricGroup> {
        self.filter_engine.apply(self.catalog(granularity), filter)
    }

    pub fn get_metric(&self, granularity: Granularity, metric_name: &str) -> AppResult<MetricRecord> {
        self.catalog(granularity)
            .find(metric_name)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Metric '{}' does not exist", metric_name)))
    }

    /// Matching records, each once. The total group repeats every record of
    /// the category groups.
    pub fn filtered_records(&self, granularity: Granularity, filter: &MetricFilter) -> Vec<MetricRecord> {
        let mut seen = HashSet::new();
        self.filter_metrics(granularity, filter)
            .into_iter()
            .flat_map(|group| group.metrics)
            .filter(|record| seen.insert(record.metric_name.clone()))
            .collect()
    }

    pub fn summarize_metrics(&self, granularity: Granularity, filter: &MetricFilter) -> Vec<MetricSummary> {
        summarize(&self.filtered_records(granularity, filter))
    }

    pub fn export_metrics(&self, granularity: Granularity, filter: &MetricFilter) -> AppResult<ExportResponse> {
        let groups = self.filter_metrics(granularity, filter);
        let metric_count = groups
            .iter()
            .flat_map(|group| &group.metrics)
            .map(|record| record.metric_name.as_str())
            .collect::<HashSet<_>>()
            .len();
        let document = ExportDocument {
            seed: self.settings.seed,
            granularity,
            filter,
            groups: &groups,
        };
        let content = serde_json::to_string_pretty(&document)?;
        let exported_at = Utc::now();

        tracing::info!(metric_count, granularity = granularity.as_str(), "exported metrics");

        Ok(ExportResponse {
            file_name: format!(
                "channel-metrics-{}-{}.json",
                granularity.as_str(),
                exported_at.format("%Y%m%d%H%M%S")
            ),
            content,
            metric_count,
            exported_at,
        })
    }

    /// Replaces both catalogs with a fresh draw from `seed`.
    pub fn regenerate(&mut self, seed: u64) {
        self.settings.seed = seed;
        let generator = MetricGenerator::new(self.settings.clone(), self.matrix);
        self.weekly = generator.generate(Granularity::Weekly);
        self.monthly = generator.generate(Granularity::Monthly);
    }
}
