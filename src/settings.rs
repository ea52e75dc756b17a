use crate::errors::{AppError, AppResult};
use crate::models::Granularity;
use serde::{Deserialize, Serialize};
use std::path::Path;

const MAX_VARIANCE: f64 = 2.0;
/// Keeps a 52-point series total of `max × 1.1 × 2` well inside u64.
pub const MAX_MAGNITUDE: u64 = 1_000_000_000_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardSettings {
    pub seed: u64,
    pub granularity: Granularity,
    pub variance: f64,
    pub base_min: u64,
    pub base_max: u64,
    pub share_min: u64,
    pub share_max: u64,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            seed: 2025,
            granularity: Granularity::Weekly,
            variance: 0.2,
            base_min: 500,
            base_max: 5_000,
            share_min: 1,
            share_max: 10,
        }
    }
}

impl DashboardSettings {
    /// Reads YAML settings. A missing file yields the defaults.
    pub fn load(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            tracing::warn!(path = %path.display(), "settings file not found, using defaults");
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        let settings = Self::from_yaml(&raw)?;
        tracing::info!(path = %path.display(), seed = settings.seed, "loaded dashboard settings");
        Ok(settings)
    }

    pub fn from_yaml(raw: &str) -> AppResult<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let settings: Self = serde_yaml::from_str(raw)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> AppResult<()> {
        if !self.variance.is_finite() || !(0.0..=MAX_VARIANCE).contains(&self.variance) {
            return Err(AppError::Config(format!(
                "Variance {} is out of allowed range (0..={})",
                self.variance, MAX_VARIANCE
            )));
        }

        if self.base_min > self.base_max {
            return Err(AppError::Config(format!(
                "baseMin {} exceeds baseMax {}",
                self.base_min, self.base_max
            )));
        }

        if self.base_max > MAX_MAGNITUDE || self.share_max > MAX_MAGNITUDE {
            return Err(AppError::Config(format!(
                "baseMax {} / shareMax {} exceed the allowed maximum {}",
                self.base_max, self.share_max, MAX_MAGNITUDE
            )));
        }

        if self.share_min > self.share_max {
            return Err(AppError::Config(format!(
                "shareMin {} exceeds shareMax {}",
                self.share_min, self.share_max
            )));
        }

        Ok(())
    }
}
