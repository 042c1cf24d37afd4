//! Multi-source lag correlation with five-factor confidence weighting.
//!
//! Two source series are truncated to a common length and correlated at
//! lag 0, then at every lag in `1..=n/4` (series 1 shifted forward, series
//! 2 backward). Each candidate carries an adjusted confidence built from
//! five per-series factors — sample-size adequacy, variability, outlier
//! impact (1.5·IQR fences), signal-to-noise ratio, and noise level —
//! averaged across the pair and scaled by a configurable weight map.
//!
//! A lag displaces the running best only when it improves **both**
//! |correlation| and adjusted confidence. The conjunctive condition is
//! deliberate; relaxing it to OR changes which lag wins.

use serde::{Deserialize, Serialize};

use sc_common::Result;
use sc_stats::{mean, quantile, variance};

use super::{pairwise::pearson, CorrelationOutcome};

/// Per-series reliability factors, each in [0, 1] except `variability`,
/// which can exceed 1 for a negative-mean series (kept as-is).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfidenceFactors {
    /// Sample-size adequacy: `min(1, n/100)`.
    pub sample_size: f64,
    /// `max(0, 1 - sd/mean)`; 0 for a zero-mean series.
    pub variability: f64,
    /// Fraction of points inside the 1.5·IQR fences.
    pub outlier_impact: f64,
    /// Signal-to-noise: `min(1, mean²/variance)`; 1 for zero variance.
    pub signal_strength: f64,
    /// `max(0, 1 - variance/mean²)`; 0 for a zero-mean series.
    pub noise_level: f64,
}

impl ConfidenceFactors {
    fn zero() -> Self {
        Self {
            sample_size: 0.0,
            variability: 0.0,
            outlier_impact: 0.0,
            signal_strength: 0.0,
            noise_level: 0.0,
        }
    }
}

/// Weight map applied to the averaged confidence factors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorWeights {
    pub sample_size: f64,
    pub variability: f64,
    pub outlier_impact: f64,
    pub signal_strength: f64,
    pub noise_level: f64,
}

impl Default for FactorWeights {
    fn default() -> Self {
        Self {
            sample_size: 2.0,
            variability: 1.5,
            outlier_impact: 1.8,
            signal_strength: 2.0,
            noise_level: 1.7,
        }
    }
}

impl FactorWeights {
    fn total(&self) -> f64 {
        self.sample_size
            + self.variability
            + self.outlier_impact
            + self.signal_strength
            + self.noise_level
    }
}

/// Configuration for the multi-source correlation scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiSourceConfig {
    /// Minimum common length for a source pair to be analyzed.
    pub min_samples: usize,
    /// Minimum adjusted confidence for a result to be retained and
    /// announced.
    pub retain_confidence: f64,
    /// Factor weights for the adjusted confidence.
    pub weights: FactorWeights,
}

impl Default for MultiSourceConfig {
    fn default() -> Self {
        Self {
            min_samples: 24,
            retain_confidence: 0.7,
            weights: FactorWeights::default(),
        }
    }
}

/// Direction of an inferred cross-source relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Causality {
    Direct,
    Inverse,
    Unknown,
}

impl std::fmt::Display for Causality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Causality::Direct => write!(f, "direct"),
            Causality::Inverse => write!(f, "inverse"),
            Causality::Unknown => write!(f, "unknown"),
        }
    }
}

/// A cross-source correlation with its winning lag. Appended per source
/// pair; history is preserved across cycles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiSourceCorrelation {
    /// The two source names, in scan order.
    pub sources: [String; 2],
    /// Best weighted correlation coefficient found.
    pub correlation: f64,
    /// Adjusted confidence at the winning lag.
    pub confidence: f64,
    /// Winning lag in samples; 0 when no lag improved on the base.
    pub lag: usize,
    pub causality: Causality,
}

impl MultiSourceCorrelation {
    /// Storage key for this pair, `"source1_source2"`.
    pub fn key(&self) -> String {
        format!("{}_{}", self.sources[0], self.sources[1])
    }
}

/// A correlation candidate with its weighting breakdown.
#[derive(Debug, Clone)]
pub struct WeightedCorrelation {
    pub outcome: CorrelationOutcome,
    pub adjusted_confidence: f64,
    pub factors: ConfidenceFactors,
}

/// Compute the reliability factors for one series.
///
/// Divisions by zero take the limit values of the factor formulas:
/// zero mean gives variability and noise level 0, zero variance gives
/// signal strength 1.
pub fn confidence_factors(xs: &[f64]) -> ConfidenceFactors {
    if xs.len() < 2 {
        return ConfidenceFactors::zero();
    }

    // Inputs are non-empty here, so the stats primitives cannot fail.
    let m = mean(xs).unwrap_or(0.0);
    let var = variance(xs).unwrap_or(0.0);
    let sd = var.sqrt();

    let variability = if m.abs() < 1e-15 {
        0.0
    } else {
        (1.0 - sd / m).max(0.0)
    };

    let q1 = quantile(xs, 0.25).unwrap_or(0.0);
    let q3 = quantile(xs, 0.75).unwrap_or(0.0);
    let iqr = q3 - q1;
    let lower = q1 - 1.5 * iqr;
    let upper = q3 + 1.5 * iqr;
    let outliers = xs.iter().filter(|&&v| v < lower || v > upper).count();

    let signal_power = m * m;
    let signal_strength = if var < 1e-15 {
        1.0
    } else {
        (signal_power / var).min(1.0)
    };
    let noise_level = if signal_power < 1e-15 {
        0.0
    } else {
        (1.0 - var / signal_power).max(0.0)
    };

    ConfidenceFactors {
        sample_size: (xs.len() as f64 / 100.0).min(1.0),
        variability,
        outlier_impact: 1.0 - outliers as f64 / xs.len() as f64,
        signal_strength,
        noise_level,
    }
}

/// Pearson on equal-length slices plus the weighted confidence of the pair.
fn weighted_correlation(
    xs: &[f64],
    ys: &[f64],
    weights: &FactorWeights,
) -> Result<WeightedCorrelation> {
    let outcome = pearson(xs, ys)?;

    let fx = confidence_factors(xs);
    let fy = confidence_factors(ys);

    let factors = ConfidenceFactors {
        sample_size: (fx.sample_size + fy.sample_size) / 2.0 * weights.sample_size,
        variability: (fx.variability + fy.variability) / 2.0 * weights.variability,
        outlier_impact: (fx.outlier_impact + fy.outlier_impact) / 2.0 * weights.outlier_impact,
        signal_strength: (fx.signal_strength + fy.signal_strength) / 2.0 * weights.signal_strength,
        noise_level: (fx.noise_level + fy.noise_level) / 2.0 * weights.noise_level,
    };

    let adjusted_confidence = (factors.sample_size
        + factors.variability
        + factors.outlier_impact
        + factors.signal_strength
        + factors.noise_level)
        / weights.total();

    Ok(WeightedCorrelation {
        outcome,
        adjusted_confidence,
        factors,
    })
}

/// Correlate two source series with a lag search over `1..=n/4`.
///
/// Series are truncated to their common length first. Returns `None` when
/// the base correlation is undefined (degenerate source data); a lag whose
/// correlation is undefined is skipped. The winning lag must improve both
/// |correlation| and adjusted confidence over the running best.
pub fn multi_source_correlation(
    source_a: &str,
    source_b: &str,
    xs: &[f64],
    ys: &[f64],
    config: &MultiSourceConfig,
) -> Result<Option<MultiSourceCorrelation>> {
    let n = xs.len().min(ys.len());
    if n < config.min_samples {
        return Ok(None);
    }
    let xs = &xs[..n];
    let ys = &ys[..n];

    let base = weighted_correlation(xs, ys, &config.weights)?;
    let (mut best_corr, mut best_conf) = match base.outcome {
        CorrelationOutcome::Value { coefficient, .. } => (coefficient, base.adjusted_confidence),
        CorrelationOutcome::Undefined(_) => return Ok(None),
    };
    let mut best_lag = 0usize;

    let max_lag = n / 4;
    for lag in 1..=max_lag {
        let lagged = weighted_correlation(&xs[lag..], &ys[..n - lag], &config.weights)?;
        let coefficient = match lagged.outcome {
            CorrelationOutcome::Value { coefficient, .. } => coefficient,
            CorrelationOutcome::Undefined(_) => continue,
        };

        // Both conditions required; a lag that improves only one loses.
        if coefficient.abs() > best_corr.abs() && lagged.adjusted_confidence > best_conf {
            best_corr = coefficient;
            best_conf = lagged.adjusted_confidence;
            best_lag = lag;
        }
    }

    let causality = if best_corr > 0.0 {
        Causality::Direct
    } else if best_corr < 0.0 {
        Causality::Inverse
    } else {
        Causality::Unknown
    };

    Ok(Some(MultiSourceCorrelation {
        sources: [source_a.to_string(), source_b.to_string()],
        correlation: best_corr,
        confidence: best_conf,
        lag: best_lag,
        causality,
    }))
}
