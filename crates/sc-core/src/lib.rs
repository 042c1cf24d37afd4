//! Signal Correlate core analysis engine.
//!
//! Computes pairwise correlations (Pearson with a Fisher-z significance
//! score, Spearman, Kendall), classifies per-metric trends, decomposes
//! series into daily/weekly/seasonal components, correlates multi-source
//! signals with a lag search, flags anomalies, and turns the strongest
//! findings into prioritized recommendations.
//!
//! The [`scheduler::AnalysisScheduler`] drives the phases on a fixed
//! cadence against a [`provider::MetricSeriesProvider`] and fans results
//! out through an [`events::EventSink`]. All detectors are also usable as
//! plain functions on borrowed slices.

pub mod anomaly;
pub mod config;
pub mod correlate;
pub mod events;
pub mod insight;
pub mod provider;
pub mod scheduler;
pub mod temporal;
pub mod trend;

pub use anomaly::{detect_anomalies, AnomalyConfig, AnomalyRecord};
pub use config::AnalyzerConfig;
pub use correlate::{
    kendall, multi_source_correlation, pearson, spearman, Causality, CorrelationConfig,
    CorrelationOutcome, CorrelationResult, DegenerateReason, MultiSourceConfig,
    MultiSourceCorrelation, PairPattern,
};
pub use events::{AnalysisEvent, ChannelSink, EventSink, NullSink};
pub use insight::{ActionableInsight, InsightConfig, InsightKind, Priority};
pub use provider::{InMemoryProvider, MetricSeriesProvider};
pub use scheduler::{AnalysisScheduler, SchedulerHandle};
pub use temporal::{detect_patterns, PatternKind, TemporalConfig, TemporalPattern};
pub use trend::{detect_trend, TrendAnalysis, TrendConfig, TrendKind};
