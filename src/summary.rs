use crate::models::{MetricKind, MetricRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSummary {
    pub metric_name: String,
    pub kind: MetricKind,
    pub total2025: u64,
    pub total2024: u64,
    pub yoy_change_pct: Option<f64>,
    /// Rank of the 2025 total among records of the same kind, 0..=100.
    pub percentile: f64,
}

/// Saturates instead of overflowing on extreme values.
pub fn series_total(series: &[u64]) -> u64 {
    series.iter().fold(0u64, |total, value| total.saturating_add(*value))
}

/// Percent change from `prior` to `current`; `None` when `prior` is zero.
pub fn yoy_change_pct(current: u64, prior: u64) -> Option<f64> {
    if prior == 0 {
        return None;
    }
    Some((current as f64 - prior as f64) / prior as f64 * 100.0)
}

/// Nearest-rank percentile, `p` in 0..=100.
pub fn percentile(values: &[u64], p: f64) -> Option<u64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let p = p.clamp(0.0, 100.0);
    let rank = ((p / 100.0) * sorted.len() as f64).ceil() as usize;
    sorted.get(rank.saturating_sub(1)).copied()
}

/// Share of `population` at or below `value`, as a percentage.
pub fn percentile_rank(value: u64, population: &[u64]) -> f64 {
    if population.is_empty() {
        return 0.0;
    }
    let at_or_below = population.iter().filter(|other| **other <= value).count();
    at_or_below as f64 / population.len() as f64 * 100.0
}

pub fn summarize(records: &[MetricRecord]) -> Vec<MetricSummary> {
    let mut populations: HashMap<MetricKind, Vec<u64>> = HashMap::new();
    for record in records {
        populations
            .entry(record.kind)
            .or_default()
            .push(series_total(&record.data2025));
    }

    records
        .iter()
        .map(|record| {
            let total2025 = series_total(&record.data2025);
            let total2024 = series_total(&record.data2024);
            let population = populations.get(&record.kind).map(Vec::as_slice).unwrap_or(&[]);
            MetricSummary {
                metric_name: record.metric_name.clone(),
                kind: record.kind,
                total2025,
                total2024,
                yoy_change_pct: yoy_change_pct(total2025, total2024),
                percentile: percentile_rank(total2025, population),
            }
        })
        .collect()
}
