//! Aggregate configuration for the analysis scheduler.
//!
//! Each detector owns its config type; this struct wires them together
//! with the metric/source sets and the cadence. Everything is serde-
//! (de)serializable so embedders can load it from whatever config store
//! they use.

use serde::{Deserialize, Serialize};

use crate::anomaly::AnomalyConfig;
use crate::correlate::{CorrelationConfig, MultiSourceConfig};
use crate::insight::InsightConfig;
use crate::temporal::TemporalConfig;
use crate::trend::TrendConfig;

/// Full configuration for an [`crate::scheduler::AnalysisScheduler`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Seconds between analysis ticks.
    pub tick_interval_secs: u64,
    /// Tick duration past which an overrun warning is logged.
    pub tick_budget_secs: u64,
    /// Metrics scanned pairwise for correlation.
    pub metric_set: Vec<String>,
    /// Sources scanned pairwise for lag correlation.
    pub source_set: Vec<String>,
    pub correlation: CorrelationConfig,
    pub trend: TrendConfig,
    pub temporal: TemporalConfig,
    pub anomaly: AnomalyConfig,
    pub insight: InsightConfig,
    pub multi_source: MultiSourceConfig,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            tick_interval_secs: 60,
            tick_budget_secs: 60,
            metric_set: vec![
                "processing_time".to_string(),
                "error_rate".to_string(),
                "demand_pattern_strength".to_string(),
                "cpu_usage".to_string(),
                "memory_usage".to_string(),
                "api_rate".to_string(),
            ],
            source_set: vec![
                "reddit".to_string(),
                "twitter".to_string(),
                "news".to_string(),
            ],
            correlation: CorrelationConfig::default(),
            trend: TrendConfig::default(),
            temporal: TemporalConfig::default(),
            anomaly: AnomalyConfig::default(),
            insight: InsightConfig::default(),
            multi_source: MultiSourceConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.tick_interval_secs, 60);
        assert_eq!(config.metric_set.len(), 6);
        assert_eq!(config.source_set.len(), 3);
        assert_eq!(config.correlation.interesting_coefficient, 0.7);
        assert_eq!(config.multi_source.weights.sample_size, 2.0);
    }

    #[test]
    fn test_partial_json_overrides() {
        let config: AnalyzerConfig = serde_json::from_str(
            r#"{
                "tick_interval_secs": 5,
                "metric_set": ["cpu_usage", "error_rate"],
                "trend": {
                    "min_points": 10,
                    "cyclical_msd_threshold": 0.2,
                    "prediction_window": 5,
                    "prediction_steps": 3,
                    "store_confidence": 0.7
                }
            }"#,
        )
        .unwrap();
        assert_eq!(config.tick_interval_secs, 5);
        assert_eq!(config.metric_set, vec!["cpu_usage", "error_rate"]);
        assert_eq!(config.trend.cyclical_msd_threshold, 0.2);
        // Untouched sections keep their defaults.
        assert_eq!(config.anomaly.mad_threshold, 3.5);
    }

    #[test]
    fn test_round_trips_through_json() {
        let config = AnalyzerConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: AnalyzerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.metric_set, config.metric_set);
        assert_eq!(back.tick_budget_secs, config.tick_budget_secs);
    }
}
