//! The seam between the analysis engine and whatever collects the data.
//!
//! The scheduler only ever sees this trait; production embedders back it
//! with their collectors, tests with [`InMemoryProvider`].

use std::collections::HashMap;

use sc_common::{Error, Result};

/// Supplies named metric and source series.
///
/// Series of any length are accepted; short series are statistically
/// discounted downstream rather than rejected here.
pub trait MetricSeriesProvider: Send {
    /// Values for one metric, oldest first.
    fn series(&self, metric: &str) -> Result<Vec<f64>>;

    /// Names of all metrics currently available.
    fn available_metrics(&self) -> Result<Vec<String>>;

    /// Values for one cross-correlation source (e.g. a signal feed),
    /// oldest first.
    fn source_series(&self, source: &str) -> Result<Vec<f64>>;
}

/// HashMap-backed provider for tests and embedders that already hold
/// their series in memory.
#[derive(Debug, Default)]
pub struct InMemoryProvider {
    metrics: HashMap<String, Vec<f64>>,
    sources: HashMap<String, Vec<f64>>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_metric(&mut self, name: impl Into<String>, values: Vec<f64>) {
        self.metrics.insert(name.into(), values);
    }

    pub fn insert_source(&mut self, name: impl Into<String>, values: Vec<f64>) {
        self.sources.insert(name.into(), values);
    }
}

impl MetricSeriesProvider for InMemoryProvider {
    fn series(&self, metric: &str) -> Result<Vec<f64>> {
        self.metrics
            .get(metric)
            .cloned()
            .ok_or_else(|| Error::UnknownMetric {
                name: metric.to_string(),
            })
    }

    fn available_metrics(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self.metrics.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    fn source_series(&self, source: &str) -> Result<Vec<f64>> {
        self.sources
            .get(source)
            .cloned()
            .ok_or_else(|| Error::UnknownMetric {
                name: source.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let mut p = InMemoryProvider::new();
        p.insert_metric("cpu_usage", vec![1.0, 2.0]);
        p.insert_source("reddit", vec![3.0]);

        assert_eq!(p.series("cpu_usage").unwrap(), vec![1.0, 2.0]);
        assert_eq!(p.source_series("reddit").unwrap(), vec![3.0]);
        assert_eq!(p.available_metrics().unwrap(), vec!["cpu_usage"]);
    }

    #[test]
    fn test_unknown_metric_errors() {
        let p = InMemoryProvider::new();
        assert!(p.series("nope").is_err());
        assert!(p.source_series("nope").is_err());
    }

    #[test]
    fn test_available_metrics_sorted() {
        let mut p = InMemoryProvider::new();
        p.insert_metric("b", vec![]);
        p.insert_metric("a", vec![]);
        assert_eq!(p.available_metrics().unwrap(), vec!["a", "b"]);
    }
}
