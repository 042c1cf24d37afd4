//! Trend detection via first-difference counting, with a cyclical probe
//! and a short-horizon extrapolation.
//!
//! The cyclical check runs before directional classification: the mean
//! squared difference between the series and itself shifted by n/4 samples
//! is compared to a raw threshold. The threshold is scale-dependent (it is
//! not normalized by series variance), so low-amplitude monotonic series
//! can classify as cyclical; see `TrendConfig::cyclical_msd_threshold`.

use serde::{Deserialize, Serialize};

/// Classification of a metric trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendKind {
    Increasing,
    Decreasing,
    Stable,
    Cyclical,
}

impl std::fmt::Display for TrendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrendKind::Increasing => write!(f, "increasing"),
            TrendKind::Decreasing => write!(f, "decreasing"),
            TrendKind::Stable => write!(f, "stable"),
            TrendKind::Cyclical => write!(f, "cyclical"),
        }
    }
}

/// Trend analysis for a single metric. One per metric, overwritten each
/// cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendAnalysis {
    pub metric: String,
    pub trend: TrendKind,
    /// `|increasing - decreasing| / diffs` over the first differences.
    pub confidence: f64,
    /// Probe lag at which the series looked self-similar; set only for
    /// cyclical series.
    pub period: Option<usize>,
    /// 3-step linear extrapolation from the trailing moving average.
    pub prediction: Option<Vec<f64>>,
}

/// Configuration for trend detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendConfig {
    /// Minimum points to attempt classification.
    pub min_points: usize,
    /// Cyclical probe threshold on the mean squared lagged difference.
    /// Compared raw, not normalized by series variance, so the right value
    /// depends on the scale of the metric.
    pub cyclical_msd_threshold: f64,
    /// Trailing window for the moving-average prediction.
    pub prediction_window: usize,
    /// Number of extrapolated steps.
    pub prediction_steps: usize,
    /// Minimum confidence for the scheduler to store and announce a trend.
    pub store_confidence: f64,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            min_points: 10,
            cyclical_msd_threshold: 0.1,
            prediction_window: 5,
            prediction_steps: 3,
            store_confidence: 0.7,
        }
    }
}

/// Classify a series and produce a trend analysis.
///
/// Series shorter than `min_points` classify as stable with confidence 0
/// and no prediction.
pub fn detect_trend(metric: &str, values: &[f64], config: &TrendConfig) -> TrendAnalysis {
    if values.len() < config.min_points {
        return TrendAnalysis {
            metric: metric.to_string(),
            trend: TrendKind::Stable,
            confidence: 0.0,
            period: None,
            prediction: None,
        };
    }

    let diffs: Vec<f64> = values.windows(2).map(|w| w[1] - w[0]).collect();
    let increasing = diffs.iter().filter(|&&d| d > 0.0).count();
    let decreasing = diffs.iter().filter(|&&d| d < 0.0).count();

    let cyclical_lag = cyclical_probe(values, config.cyclical_msd_threshold);
    let (trend, period) = match cyclical_lag {
        Some(lag) => (TrendKind::Cyclical, Some(lag)),
        None => {
            let kind = if increasing > decreasing * 2 {
                TrendKind::Increasing
            } else if decreasing > increasing * 2 {
                TrendKind::Decreasing
            } else {
                TrendKind::Stable
            };
            (kind, None)
        }
    };

    let confidence = (increasing as f64 - decreasing as f64).abs() / diffs.len() as f64;

    TrendAnalysis {
        metric: metric.to_string(),
        trend,
        confidence,
        period,
        prediction: Some(predict_next(values, config)),
    }
}

/// Mean squared difference between the series and itself at lag n/4. A
/// small value means the series roughly repeats at that lag.
fn cyclical_probe(values: &[f64], threshold: f64) -> Option<usize> {
    let lag = values.len() / 4;
    if lag == 0 {
        return None;
    }
    let msd = values[..values.len() - lag]
        .iter()
        .zip(&values[lag..])
        .map(|(a, b)| (a - b).powi(2))
        .sum::<f64>()
        / (values.len() - lag) as f64;

    (msd < threshold).then_some(lag)
}

/// Extrapolate from the trailing moving average and the slope between the
/// last point and the point `window` steps back.
fn predict_next(values: &[f64], config: &TrendConfig) -> Vec<f64> {
    let window = config.prediction_window.min(values.len());
    let ma = values[values.len() - window..].iter().sum::<f64>() / window as f64;
    let slope = (values[values.len() - 1] - values[values.len() - window]) / window as f64;

    (0..config.prediction_steps)
        .map(|i| ma + slope * (i + 1) as f64)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_series_is_stable_zero() {
        let t = detect_trend("cpu_usage", &[1.0, 2.0, 3.0], &TrendConfig::default());
        assert_eq!(t.trend, TrendKind::Stable);
        assert_eq!(t.confidence, 0.0);
        assert!(t.prediction.is_none());
    }

    #[test]
    fn test_monotonic_increasing_full_confidence() {
        let values: Vec<f64> = (0..20).map(|i| i as f64).collect();
        let t = detect_trend("api_rate", &values, &TrendConfig::default());
        assert_eq!(t.trend, TrendKind::Increasing);
        assert_eq!(t.confidence, 1.0);
    }

    #[test]
    fn test_monotonic_decreasing() {
        let values: Vec<f64> = (0..20).map(|i| 100.0 - i as f64).collect();
        let t = detect_trend("error_rate", &values, &TrendConfig::default());
        assert_eq!(t.trend, TrendKind::Decreasing);
        assert_eq!(t.confidence, 1.0);
    }

    #[test]
    fn test_balanced_series_is_stable() {
        // Large alternating swings: up/down counts balance and the lagged
        // difference stays well above the cyclical threshold.
        let values: Vec<f64> = (0..21)
            .map(|i| if i % 2 == 0 { 0.0 } else { 10.0 })
            .collect();
        let t = detect_trend("memory_usage", &values, &TrendConfig::default());
        assert_eq!(t.trend, TrendKind::Stable);
        assert!(t.confidence < 0.1);
    }

    #[test]
    fn test_low_amplitude_oscillation_is_cyclical() {
        // ±0.1 around a constant: msd at any lag is at most 0.04 < 0.1.
        let values: Vec<f64> = (0..20)
            .map(|i| 50.0 + if i % 2 == 0 { 0.1 } else { -0.1 })
            .collect();
        let t = detect_trend("demand_pattern_strength", &values, &TrendConfig::default());
        assert_eq!(t.trend, TrendKind::Cyclical);
        assert_eq!(t.period, Some(5));
    }

    #[test]
    fn test_cyclical_overrides_direction() {
        // Documented quirk: a low-amplitude monotonic ramp classifies as
        // cyclical because the probe threshold is not scale-normalized.
        let values: Vec<f64> = (0..20).map(|i| i as f64 * 0.01).collect();
        let t = detect_trend("m", &values, &TrendConfig::default());
        assert_eq!(t.trend, TrendKind::Cyclical);
    }

    #[test]
    fn test_prediction_linear_extrapolation() {
        // x[i] = i, n = 10: ma = 7, slope = (9 - 5)/5 = 0.8.
        let values: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let t = detect_trend("m", &values, &TrendConfig::default());
        let pred = t.prediction.unwrap();
        assert_eq!(pred.len(), 3);
        assert!((pred[0] - 7.8).abs() < 1e-12);
        assert!((pred[1] - 8.6).abs() < 1e-12);
        assert!((pred[2] - 9.4).abs() < 1e-12);
    }

    #[test]
    fn test_deterministic_output() {
        let values: Vec<f64> = (0..30).map(|i| (i as f64 * 0.7).sin() * 10.0).collect();
        let a = detect_trend("m", &values, &TrendConfig::default());
        let b = detect_trend("m", &values, &TrendConfig::default());
        assert_eq!(a.trend, b.trend);
        assert_eq!(a.confidence, b.confidence);
        assert_eq!(a.prediction, b.prediction);
    }
}
