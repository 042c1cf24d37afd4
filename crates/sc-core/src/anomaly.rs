//! Anomaly detection over a timestamped series.
//!
//! Four independent scores per point — global z-score, MAD score, a
//! contextual score over a ±12-sample window, and a deviation from the
//! hour-of-day baseline — combined with OR: one triggered dimension is
//! enough. Stateless; safe to call concurrently from multiple readers.

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use sc_common::{Error, Result};
use sc_stats::{extended_statistics, mad, mean, std_dev};

/// A flagged point with its component scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnomalyRecord {
    pub value: f64,
    pub timestamp: DateTime<Utc>,
    /// `|v - mean| / sd` over the whole series.
    pub zscore: f64,
    /// `|v - median| / MAD`.
    pub mad_score: f64,
    /// Z-score against the local ±window slice.
    pub contextual_score: f64,
    /// `|v - hourly baseline| / sd`.
    pub seasonality_score: f64,
}

/// Thresholds and window for anomaly detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnomalyConfig {
    pub zscore_threshold: f64,
    pub mad_threshold: f64,
    pub contextual_threshold: f64,
    pub seasonal_threshold: f64,
    /// Half-width of the local window in samples.
    pub context_window: usize,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            zscore_threshold: 3.0,
            mad_threshold: 3.5,
            contextual_threshold: 3.0,
            seasonal_threshold: 3.0,
            context_window: 12,
        }
    }
}

/// Average value per hour of day; 0 for hours with no samples.
fn hourly_baseline(values: &[f64], timestamps: &[DateTime<Utc>]) -> [f64; 24] {
    let mut sums = [0.0f64; 24];
    let mut counts = [0usize; 24];
    for (v, ts) in values.iter().zip(timestamps) {
        let hour = ts.hour() as usize;
        sums[hour] += v;
        counts[hour] += 1;
    }
    let mut baseline = [0.0f64; 24];
    for hour in 0..24 {
        if counts[hour] > 0 {
            baseline[hour] = sums[hour] / counts[hour] as f64;
        }
    }
    baseline
}

/// Ratio with a zero-divisor guard: degenerate spread contributes no
/// evidence rather than an infinite score.
fn guarded_score(deviation: f64, divisor: f64) -> f64 {
    if divisor < 1e-15 {
        0.0
    } else {
        deviation.abs() / divisor
    }
}

/// Scan a series for anomalous points.
///
/// `values` and `timestamps` are parallel arrays; a length mismatch is an
/// input error, as is an empty series. Output preserves input order, one
/// record per flagged index.
pub fn detect_anomalies(
    values: &[f64],
    timestamps: &[DateTime<Utc>],
    config: &AnomalyConfig,
) -> Result<Vec<AnomalyRecord>> {
    if values.len() != timestamps.len() {
        return Err(Error::LengthMismatch {
            left: values.len(),
            right: timestamps.len(),
        });
    }

    let stats = extended_statistics(values)?;
    let mad_value = mad(values, stats.median)?;
    let baseline = hourly_baseline(values, timestamps);

    let mut anomalies = Vec::new();
    for (i, &value) in values.iter().enumerate() {
        let zscore = guarded_score(value - stats.mean, stats.std_dev);
        let mad_score = guarded_score(value - stats.median, mad_value);

        let start = i.saturating_sub(config.context_window);
        let end = (i + config.context_window).min(values.len());
        let local = &values[start..end];
        let local_mean = mean(local)?;
        let local_sd = std_dev(local)?;
        let contextual_score = guarded_score(value - local_mean, local_sd);

        let hour = timestamps[i].hour() as usize;
        let seasonality_score = guarded_score(value - baseline[hour], stats.std_dev);

        if zscore > config.zscore_threshold
            || mad_score > config.mad_threshold
            || contextual_score > config.contextual_threshold
            || seasonality_score > config.seasonal_threshold
        {
            anomalies.push(AnomalyRecord {
                value,
                timestamp: timestamps[i],
                zscore,
                mad_score,
                contextual_score,
                seasonality_score,
            });
        }
    }

    Ok(anomalies)
}
