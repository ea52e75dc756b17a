pub mod catalog;
pub mod dashboard;
pub mod errors;
pub mod filter;
pub mod generator;
pub mod matrix;
pub mod models;
pub mod settings;
pub mod state;
pub mod summary;

pub use crate::catalog::MetricCatalog;
pub use crate::dashboard::DashboardCore;
pub use crate::errors::{AppError, AppResult};
pub use crate::filter::MetricFilterEngine;
pub use crate::generator::MetricGenerator;
pub use crate::matrix::ChannelMatrix;
pub use crate::settings::DashboardSettings;
pub use crate::state::{DashboardState, DashboardView};

use crate::models::{
    BooleanResponse, Channel, ChannelInfo, ExportResponse, Granularity, MetricFilter, MetricGroup, MetricRecord,
};
use crate::summary::MetricSummary;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;

static LOG_GUARD: std::sync::OnceLock<WorkerGuard> = std::sync::OnceLock::new();

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricQueryPayload {
    /// Falls back to the configured granularity when absent.
    #[serde(default)]
    pub granularity: Option<Granularity>,
    #[serde(default)]
    pub filter: MetricFilter,
}

impl MetricQueryPayload {
    fn granularity_or(&self, core: &DashboardCore) -> Granularity {
        self.granularity.unwrap_or_else(|| core.default_granularity())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelPairPayload {
    pub start_channel: String,
    pub end_channel: String,
}

// Presentation-facing commands. Errors cross the boundary as plain strings.

pub fn list_channels(core: &DashboardCore) -> Vec<ChannelInfo> {
    core.list_channels()
}

pub fn valid_end_channels(core: &DashboardCore, start_channel: String) -> Vec<Channel> {
    core.valid_end_channels(&start_channel)
}

pub fn valid_start_channels(core: &DashboardCore, end_channel: String) -> Vec<Channel> {
    core.valid_start_channels(&end_channel)
}

pub fn validate_channel_pair(core: &DashboardCore, payload: ChannelPairPayload) -> BooleanResponse {
    BooleanResponse {
        success: core.is_valid_combination(&payload.start_channel, &payload.end_channel),
    }
}

pub fn list_metric_groups(core: &DashboardCore, granularity: Option<Granularity>) -> Vec<MetricGroup> {
    core.list_groups(granularity.unwrap_or_else(|| core.default_granularity()))
}

pub fn filter_metrics(core: &DashboardCore, payload: MetricQueryPayload) -> Vec<MetricGroup> {
    core.filter_metrics(payload.granularity_or(core), &payload.filter)
}

pub fn get_metric(
    core: &DashboardCore,
    granularity: Option<Granularity>,
    metric_name: String,
) -> Result<MetricRecord, String> {
    core.get_metric(granularity.unwrap_or_else(|| core.default_granularity()), &metric_name)
        .map_err(to_client_error)
}

pub fn summarize_metrics(core: &DashboardCore, payload: MetricQueryPayload) -> Vec<MetricSummary> {
    core.summarize_metrics(payload.granularity_or(core), &payload.filter)
}

pub fn export_metrics(core: &DashboardCore, payload: MetricQueryPayload) -> Result<ExportResponse, String> {
    core.export_metrics(payload.granularity_or(core), &payload.filter)
        .map_err(to_client_error)
}

/// Loads settings, starts file logging, and builds the dashboard core.
pub fn bootstrap(settings_path: &Path, log_dir: Option<&Path>) -> Result<DashboardCore, String> {
    if let Some(log_dir) = log_dir {
        init_tracing(log_dir)?;
    }

    let settings = DashboardSettings::load(settings_path).map_err(to_client_error)?;
    let core = DashboardCore::new(settings).map_err(to_client_error)?;
    tracing::info!(
        seed = core.settings().seed,
        granularity = core.settings().granularity.as_str(),
        "dashboard core ready"
    );
    Ok(core)
}

pub fn init_tracing(log_dir: &Path) -> Result<(), String> {
    std::fs::create_dir_all(log_dir).map_err(|error| error.to_string())?;
    let file_appender = tracing_appender::rolling::daily(log_dir, "dashboard.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let _ = LOG_GUARD.set(guard);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .json()
        .with_writer(non_blocking)
        .try_init()
        .map_err(|error| error.to_string())
}

fn to_client_error(error: impl std::fmt::Display) -> String {
    error.to_string()
}
