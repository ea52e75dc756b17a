use crate::catalog::MetricCatalog;
use crate::matrix::ChannelMatrix;
use crate::models::{ChannelTransition, Granularity, MetricKind, MetricRecord};
use crate::settings::DashboardSettings;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::f64::consts::PI;

const SEASONAL_AMPLITUDE: f64 = 0.1;
const REPEAT_PRIOR_YEAR_SKEW: f64 = 1.10;
const NO_REPEAT_BASE_RATIO: f64 = 0.70;
const NO_REPEAT_PRIOR_YEAR_SKEW: f64 = 1.14;

pub const CURRENT_YEAR: u32 = 2025;
pub const PRIOR_YEAR: u32 = 2024;

/// `1 + 0.1 × sin(2π × period / periods)`; `period` is 1-based.
pub fn seasonal(period: usize, periods: usize) -> f64 {
    1.0 + SEASONAL_AMPLITUDE * (2.0 * PI * period as f64 / periods as f64).sin()
}

/// Draws a multiplicative factor in `[1 - variance/2, 1 + variance/2]`.
pub fn random_factor<R: Rng>(rng: &mut R, variance: f64) -> f64 {
    let half = (variance / 2.0).max(0.0);
    rng.random_range((1.0 - half)..=(1.0 + half))
}

pub fn generate_series<R: Rng>(rng: &mut R, base: f64, granularity: Granularity, variance: f64) -> Vec<u64> {
    let periods = granularity.points();
    (1..=periods)
        .map(|period| {
            let value = base * seasonal(period, periods) * random_factor(rng, variance);
            value.round().max(0.0) as u64
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct MetricGenerator {
    settings: DashboardSettings,
    matrix: ChannelMatrix,
}

impl MetricGenerator {
    pub fn new(settings: DashboardSettings, matrix: ChannelMatrix) -> Self {
        Self { settings, matrix }
    }

    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    /// Materializes five records per valid transition, in matrix order.
    pub fn generate(&self, granularity: Granularity) -> MetricCatalog {
        let records = self
            .matrix
            .transitions()
            .iter()
            .flat_map(|transition| self.records_for(*transition, granularity))
            .collect::<Vec<_>>();

        tracing::info!(
            seed = self.settings.seed,
            granularity = granularity.as_str(),
            records = records.len(),
            "generated metric catalog"
        );

        MetricCatalog::new(self.settings.seed, granularity, records)
    }

    pub fn records_for(&self, transition: ChannelTransition, granularity: Granularity) -> Vec<MetricRecord> {
        let base = self.base_magnitude(transition);
        MetricKind::ALL
            .into_iter()
            .map(|kind| self.record(kind, transition, granularity, base))
            .collect()
    }

    fn record(&self, kind: MetricKind, transition: ChannelTransition, granularity: Granularity, base: f64) -> MetricRecord {
        let metric_name = kind.metric_name(transition);
        let variance = self.settings.variance;

        let (current_base, prior_base) = match kind {
            MetricKind::RepeatCount => (base, base * REPEAT_PRIOR_YEAR_SKEW),
            MetricKind::NoRepeatCount => {
                let no_repeat = base * NO_REPEAT_BASE_RATIO;
                (no_repeat, no_repeat * NO_REPEAT_PRIOR_YEAR_SKEW)
            }
            // Placeholder shares, drawn independently of the counts.
            MetricKind::ShareOfRepeat | MetricKind::ShareOfNoRepeat | MetricKind::ShareOfTotal => (
                self.share_magnitude(&metric_name, CURRENT_YEAR),
                self.share_magnitude(&metric_name, PRIOR_YEAR),
            ),
        };

        let mut current_rng = self.rng_for(&metric_name, CURRENT_YEAR, granularity.as_str());
        let mut prior_rng = self.rng_for(&metric_name, PRIOR_YEAR, granularity.as_str());

        MetricRecord {
            question: kind.question(transition),
            definition: kind.definition(transition),
            data2025: generate_series(&mut current_rng, current_base, granularity, variance),
            data2024: generate_series(&mut prior_rng, prior_base, granularity, variance),
            metric_name,
            kind,
            transition,
            granularity,
        }
    }

    fn base_magnitude(&self, transition: ChannelTransition) -> f64 {
        let mut rng = self.rng_for(&transition.to_string(), 0, "base");
        rng.random_range(self.settings.base_min..=self.settings.base_max) as f64
    }

    fn share_magnitude(&self, metric_name: &str, year: u32) -> f64 {
        let mut rng = self.rng_for(metric_name, year, "share");
        rng.random_range(self.settings.share_min..=self.settings.share_max) as f64
    }

    fn rng_for(&self, key: &str, year: u32, stream: &str) -> ChaCha8Rng {
        let key_hash = fxhash::hash64(&(key, year, stream));
        ChaCha8Rng::seed_from_u64(self.settings.seed ^ key_hash)
    }
}
