//! Descriptive statistics over f64 slices.
//!
//! All moments use the population convention (divide by n). Quantiles use
//! floor indexing on the ascending sort, matching the rest of the engine;
//! `median` is the only place that averages the two middle values.
//!
//! Skewness and kurtosis are computed from standardized third/fourth
//! moments and return NaN for a zero-variance series. Callers that cannot
//! tolerate NaN must check `std_dev` first.

use serde::{Deserialize, Serialize};

/// Error from a statistics primitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatsError {
    /// The operation was invoked on an empty slice.
    EmptyInput { op: &'static str },
}

impl std::fmt::Display for StatsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsError::EmptyInput { op } => write!(f, "empty input passed to {}", op),
        }
    }
}

impl std::error::Error for StatsError {}

/// Result type for statistics primitives.
pub type Result<T> = std::result::Result<T, StatsError>;

/// Summary statistics used by the anomaly detector and confidence factors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtendedStatistics {
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    /// Standardized third moment. NaN when `std_dev == 0`.
    pub skewness: f64,
    /// Excess kurtosis (standardized fourth moment minus 3). NaN when
    /// `std_dev == 0`.
    pub kurtosis: f64,
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
}

/// Arithmetic mean.
pub fn mean(xs: &[f64]) -> Result<f64> {
    if xs.is_empty() {
        return Err(StatsError::EmptyInput { op: "mean" });
    }
    Ok(xs.iter().sum::<f64>() / xs.len() as f64)
}

/// Population variance (divide by n).
pub fn variance(xs: &[f64]) -> Result<f64> {
    let m = mean(xs).map_err(|_| StatsError::EmptyInput { op: "variance" })?;
    Ok(xs.iter().map(|v| (v - m).powi(2)).sum::<f64>() / xs.len() as f64)
}

/// Population standard deviation.
pub fn std_dev(xs: &[f64]) -> Result<f64> {
    Ok(variance(xs)?.sqrt())
}

/// Quantile by floor indexing: `sorted[floor(n * q)]`, clamped to the last
/// element so `q = 1.0` is well-defined.
pub fn quantile(xs: &[f64], q: f64) -> Result<f64> {
    if xs.is_empty() {
        return Err(StatsError::EmptyInput { op: "quantile" });
    }
    let mut sorted = xs.to_vec();
    sorted.sort_by(f64::total_cmp);
    let idx = ((sorted.len() as f64 * q).floor() as usize).min(sorted.len() - 1);
    Ok(sorted[idx])
}

/// Median: midpoint average for even n, middle element for odd n.
pub fn median(xs: &[f64]) -> Result<f64> {
    if xs.is_empty() {
        return Err(StatsError::EmptyInput { op: "median" });
    }
    let mut sorted = xs.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();
    if n % 2 == 0 {
        Ok((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0)
    } else {
        Ok(sorted[n / 2])
    }
}

/// Standardized third moment. NaN when the series has zero variance.
pub fn skewness(xs: &[f64]) -> Result<f64> {
    if xs.is_empty() {
        return Err(StatsError::EmptyInput { op: "skewness" });
    }
    let m = mean(xs)?;
    let sd = std_dev(xs)?;
    let n = xs.len() as f64;
    Ok(xs.iter().map(|v| ((v - m) / sd).powi(3)).sum::<f64>() / n)
}

/// Excess kurtosis (standardized fourth moment minus 3). NaN when the
/// series has zero variance.
pub fn kurtosis(xs: &[f64]) -> Result<f64> {
    if xs.is_empty() {
        return Err(StatsError::EmptyInput { op: "kurtosis" });
    }
    let m = mean(xs)?;
    let sd = std_dev(xs)?;
    let n = xs.len() as f64;
    Ok(xs.iter().map(|v| ((v - m) / sd).powi(4)).sum::<f64>() / n - 3.0)
}

/// Median absolute deviation from the given center (usually the median of
/// the same series).
pub fn mad(xs: &[f64], center: f64) -> Result<f64> {
    if xs.is_empty() {
        return Err(StatsError::EmptyInput { op: "mad" });
    }
    let deviations: Vec<f64> = xs.iter().map(|v| (v - center).abs()).collect();
    median(&deviations)
}

/// Compute the full summary used by the anomaly detector.
pub fn extended_statistics(xs: &[f64]) -> Result<ExtendedStatistics> {
    if xs.is_empty() {
        return Err(StatsError::EmptyInput {
            op: "extended_statistics",
        });
    }
    let m = mean(xs)?;
    let med = median(xs)?;
    let sd = std_dev(xs)?;
    let n = xs.len() as f64;

    let skew = xs.iter().map(|v| ((v - m) / sd).powi(3)).sum::<f64>() / n;
    let kurt = xs.iter().map(|v| ((v - m) / sd).powi(4)).sum::<f64>() / n - 3.0;

    let q1 = quantile(xs, 0.25)?;
    let q3 = quantile(xs, 0.75)?;

    Ok(ExtendedStatistics {
        mean: m,
        median: med,
        std_dev: sd,
        skewness: skew,
        kurtosis: kurt,
        q1,
        q3,
        iqr: q3 - q1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_variance() {
        let xs = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((mean(&xs).unwrap() - 5.0).abs() < 1e-12);
        assert!((variance(&xs).unwrap() - 4.0).abs() < 1e-12);
        assert!((std_dev(&xs).unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_input_errors() {
        assert!(matches!(
            mean(&[]),
            Err(StatsError::EmptyInput { op: "mean" })
        ));
        assert!(variance(&[]).is_err());
        assert!(quantile(&[], 0.5).is_err());
        assert!(median(&[]).is_err());
        assert!(mad(&[], 0.0).is_err());
        assert!(extended_statistics(&[]).is_err());
    }

    #[test]
    fn test_quantile_floor_indexing() {
        // n = 4: q1 index = floor(4 * 0.25) = 1, q3 index = floor(4 * 0.75) = 3.
        let xs = [10.0, 20.0, 30.0, 40.0];
        assert_eq!(quantile(&xs, 0.25).unwrap(), 20.0);
        assert_eq!(quantile(&xs, 0.75).unwrap(), 40.0);
        // q = 1.0 clamps to the last element.
        assert_eq!(quantile(&xs, 1.0).unwrap(), 40.0);
    }

    #[test]
    fn test_median_even_and_odd() {
        assert_eq!(median(&[1.0, 3.0, 2.0]).unwrap(), 2.0);
        assert_eq!(median(&[1.0, 2.0, 3.0, 4.0]).unwrap(), 2.5);
    }

    #[test]
    fn test_skewness_symmetric_near_zero() {
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert!(skewness(&xs).unwrap().abs() < 1e-12);
    }

    #[test]
    fn test_skewness_constant_is_nan() {
        let xs = [5.0; 10];
        assert!(skewness(&xs).unwrap().is_nan());
        assert!(kurtosis(&xs).unwrap().is_nan());
    }

    #[test]
    fn test_mad() {
        let xs = [1.0, 1.0, 2.0, 2.0, 4.0, 6.0, 9.0];
        let med = median(&xs).unwrap();
        assert_eq!(med, 2.0);
        // Deviations: [1, 1, 0, 0, 2, 4, 7]; median = 1.
        assert_eq!(mad(&xs, med).unwrap(), 1.0);
    }

    #[test]
    fn test_extended_statistics_bundle() {
        let xs = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let stats = extended_statistics(&xs).unwrap();
        assert!((stats.mean - 5.0).abs() < 1e-12);
        assert!((stats.std_dev - 2.0).abs() < 1e-12);
        assert_eq!(stats.median, 4.5);
        assert_eq!(stats.q1, 4.0);
        assert_eq!(stats.q3, 7.0);
        assert_eq!(stats.iqr, 3.0);
    }
}

#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn variance_is_non_negative(xs in proptest::collection::vec(-1e6f64..1e6, 1..200)) {
            prop_assert!(variance(&xs).unwrap() >= 0.0);
        }

        #[test]
        fn quantile_within_range(
            xs in proptest::collection::vec(-1e6f64..1e6, 1..200),
            q in 0.0f64..=1.0,
        ) {
            let v = quantile(&xs, q).unwrap();
            let min = xs.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = xs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(v >= min && v <= max);
        }

        #[test]
        fn mean_within_range(xs in proptest::collection::vec(-1e6f64..1e6, 1..200)) {
            let m = mean(&xs).unwrap();
            let min = xs.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = xs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(m >= min - 1e-9 && m <= max + 1e-9);
        }
    }
}
