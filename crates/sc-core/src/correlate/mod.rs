//! Correlation computation: pairwise coefficients and multi-source lag
//! correlation.
//!
//! Degenerate inputs (zero variance in either series) are a first-class
//! outcome, [`CorrelationOutcome::Undefined`], never a silent NaN. Length
//! mismatches in the strict pairwise path are input errors; the rank-based
//! and multi-source paths truncate to the common prefix instead.

pub mod multi_source;
pub mod pairwise;

use serde::{Deserialize, Serialize};

pub use multi_source::{
    multi_source_correlation, Causality, ConfidenceFactors, FactorWeights, MultiSourceConfig,
    MultiSourceCorrelation, WeightedCorrelation,
};
pub use pairwise::{kendall, pearson, significance, spearman};

/// Sign of a pairwise relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairPattern {
    /// Positive coefficient: the metrics move together.
    Direct,
    /// Negative coefficient: one rises as the other falls.
    Inverse,
}

impl std::fmt::Display for PairPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PairPattern::Direct => write!(f, "direct"),
            PairPattern::Inverse => write!(f, "inverse"),
        }
    }
}

/// Why a correlation could not be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegenerateReason {
    /// One or both series have zero variance; the coefficient is undefined.
    ZeroVariance,
}

impl std::fmt::Display for DegenerateReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DegenerateReason::ZeroVariance => write!(f, "zero variance"),
        }
    }
}

/// Outcome of a coefficient computation on well-formed input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CorrelationOutcome {
    /// A defined coefficient with its derived reliability scores.
    Value {
        coefficient: f64,
        /// `|coefficient| * (1 - significance)`.
        confidence: f64,
        /// Pseudo-p from the Fisher-z logistic tail; small = strong.
        significance: f64,
    },
    /// The coefficient is undefined for this input.
    Undefined(DegenerateReason),
}

impl CorrelationOutcome {
    /// The coefficient, if defined.
    pub fn coefficient(&self) -> Option<f64> {
        match self {
            CorrelationOutcome::Value { coefficient, .. } => Some(*coefficient),
            CorrelationOutcome::Undefined(_) => None,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, CorrelationOutcome::Undefined(_))
    }
}

/// A stored pairwise correlation, keyed by `"metric1_metric2"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationResult {
    /// The two metric names, in scan order.
    pub metrics: [String; 2],
    /// Pearson coefficient in [-1, 1].
    pub coefficient: f64,
    /// Reliability score in [0, 1].
    pub confidence: f64,
    /// Number of samples the coefficient was computed over.
    pub time_window: usize,
    /// Sign of the relationship.
    pub pattern: PairPattern,
    /// Pseudo-p value; small = strong.
    pub significance: f64,
}

impl CorrelationResult {
    /// Storage key for this pair, `"metric1_metric2"`.
    pub fn key(&self) -> String {
        format!("{}_{}", self.metrics[0], self.metrics[1])
    }
}

/// Thresholds for the pairwise correlation scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationConfig {
    /// Minimum |coefficient| for a pair to be retained.
    pub interesting_coefficient: f64,
    /// Minimum confidence for a retained pair to be announced.
    pub event_confidence: f64,
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            interesting_coefficient: 0.7,
            event_confidence: 0.8,
        }
    }
}
