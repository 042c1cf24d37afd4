//! Temporal pattern decomposition: daily, weekly, and seasonal profiles.
//!
//! One detector, three period lengths (24, 168, and 2160 hours). The
//! series is cut into whole segments of the period length; the positional
//! averages across segments form a profile, and the fraction of total
//! variance the profile explains is the pattern's confidence.

use serde::{Deserialize, Serialize};

use sc_stats::variance;

/// Hours in a day.
pub const DAILY_PERIOD: usize = 24;
/// Hours in a week.
pub const WEEKLY_PERIOD: usize = 168;
/// Hours in a 90-day season.
pub const SEASONAL_PERIOD: usize = 2160;

/// The kind of periodic pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    Daily,
    Weekly,
    Seasonal,
    /// Reserved for long-horizon drift; not produced by the profile
    /// detectors.
    Trend,
}

impl std::fmt::Display for PatternKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatternKind::Daily => write!(f, "daily"),
            PatternKind::Weekly => write!(f, "weekly"),
            PatternKind::Seasonal => write!(f, "seasonal"),
            PatternKind::Trend => write!(f, "trend"),
        }
    }
}

/// A detected periodic component. Zero or more per metric; the qualifying
/// list replaces the metric's prior list each cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemporalPattern {
    pub kind: PatternKind,
    /// Fraction of total series variance explained by the profile, in
    /// [0, 1] for well-behaved input. 0 for a zero-variance series.
    pub confidence: f64,
    /// Period length in samples (hours).
    pub period: usize,
    /// Peak-to-trough range of the profile.
    pub amplitude: f64,
    /// Offset of the profile maximum within the period.
    pub phase: usize,
}

/// Configuration for temporal pattern detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemporalConfig {
    /// Minimum total samples before any pattern is attempted.
    pub min_total_samples: usize,
    /// Minimum confidence for a pattern to be retained.
    pub retain_confidence: f64,
}

impl Default for TemporalConfig {
    fn default() -> Self {
        Self {
            min_total_samples: 24,
            retain_confidence: 0.7,
        }
    }
}

/// Positional averages over whole segments of `period` length.
fn periodic_profile(values: &[f64], period: usize) -> Vec<f64> {
    let segments = values.len() / period;
    let mut profile = vec![0.0; period];
    for (i, v) in values[..segments * period].iter().enumerate() {
        profile[i % period] += v;
    }
    for slot in &mut profile {
        *slot /= segments as f64;
    }
    profile
}

/// Detect a single periodic component. Returns `None` when the series is
/// shorter than one whole period. Confidence is 0 (not NaN) for a
/// zero-variance series.
pub fn detect_pattern(values: &[f64], period: usize, kind: PatternKind) -> Option<TemporalPattern> {
    if values.len() < period {
        return None;
    }

    let profile = periodic_profile(values, period);

    let total_var = variance(values).ok()?;
    let confidence = if total_var < 1e-15 {
        0.0
    } else {
        variance(&profile).unwrap_or(0.0) / total_var
    };

    let mut max = f64::NEG_INFINITY;
    let mut min = f64::INFINITY;
    let mut phase = 0;
    for (i, &v) in profile.iter().enumerate() {
        if v > max {
            max = v;
            phase = i;
        }
        if v < min {
            min = v;
        }
    }

    Some(TemporalPattern {
        kind,
        confidence,
        period,
        amplitude: max - min,
        phase,
    })
}

/// Run all period detectors the series is long enough for and keep the
/// patterns that clear the confidence threshold. A metric can carry
/// several simultaneous patterns (e.g. both daily and weekly).
pub fn detect_patterns(values: &[f64], config: &TemporalConfig) -> Vec<TemporalPattern> {
    if values.len() < config.min_total_samples {
        return Vec::new();
    }

    [
        (DAILY_PERIOD, PatternKind::Daily),
        (WEEKLY_PERIOD, PatternKind::Weekly),
        (SEASONAL_PERIOD, PatternKind::Seasonal),
    ]
    .into_iter()
    .filter_map(|(period, kind)| detect_pattern(values, period, kind))
    .filter(|p| p.confidence > config.retain_confidence)
    .collect()
}
