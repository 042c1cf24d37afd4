//! Periodic analysis scheduler.
//!
//! One tick runs the correlation scan, the trend scan, the temporal
//! pattern scan, the multi-source scan, and insight generation, in that
//! order. Each phase is guarded independently: a failing phase is logged
//! and the remaining phases still run, so partial results beat a halted
//! pipeline. There is no retry or backoff; the next tick proceeds on
//! schedule.
//!
//! [`AnalysisScheduler::start`] moves the scheduler onto a runner thread
//! that ticks at the configured interval. Ticks are strictly serialized
//! (the runner is a single loop); a tick that overruns its budget is
//! logged, not cancelled. Accessors return cloned snapshots, so readers
//! never observe a tick mid-mutation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use sc_common::Result;

use crate::config::AnalyzerConfig;
use crate::correlate::{
    multi_source_correlation, pearson, CorrelationOutcome, CorrelationResult,
    MultiSourceCorrelation, PairPattern,
};
use crate::events::{AnalysisEvent, ChannelSink, EventSink};
use crate::insight::{generate_insights, ActionableInsight, Priority};
use crate::provider::MetricSeriesProvider;
use crate::temporal::{detect_patterns, TemporalPattern};
use crate::trend::{detect_trend, TrendAnalysis};

/// Drives the analysis phases and owns the accumulated results.
pub struct AnalysisScheduler {
    config: AnalyzerConfig,
    provider: Box<dyn MetricSeriesProvider>,
    sink: Arc<dyn EventSink>,
    correlations: HashMap<String, Vec<CorrelationResult>>,
    trends: HashMap<String, TrendAnalysis>,
    temporal_patterns: HashMap<String, Vec<TemporalPattern>>,
    multi_source: HashMap<String, Vec<MultiSourceCorrelation>>,
    insights: Vec<ActionableInsight>,
}

impl AnalysisScheduler {
    pub fn new(
        config: AnalyzerConfig,
        provider: Box<dyn MetricSeriesProvider>,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            config,
            provider,
            sink,
            correlations: HashMap::new(),
            trends: HashMap::new(),
            temporal_patterns: HashMap::new(),
            multi_source: HashMap::new(),
            insights: Vec::new(),
        }
    }

    /// Convenience constructor wiring a [`ChannelSink`]; returns the
    /// receiver to drain events from.
    pub fn with_channel(
        config: AnalyzerConfig,
        provider: Box<dyn MetricSeriesProvider>,
    ) -> (Self, Receiver<AnalysisEvent>) {
        let (sink, rx) = ChannelSink::new();
        (Self::new(config, provider, Arc::new(sink)), rx)
    }

    /// Run one full analysis cycle. Every phase runs even if an earlier
    /// one failed; results for a failed phase keep their previous values.
    pub fn run_tick(&mut self) {
        if let Err(e) = self.scan_correlations() {
            warn!(error = %e, code = e.code(), "correlation scan failed");
        }
        if let Err(e) = self.scan_trends() {
            warn!(error = %e, code = e.code(), "trend scan failed");
        }
        if let Err(e) = self.scan_temporal_patterns() {
            warn!(error = %e, code = e.code(), "temporal pattern scan failed");
        }
        if let Err(e) = self.scan_multi_source() {
            warn!(error = %e, code = e.code(), "multi-source scan failed");
        }
        self.rebuild_insights();
    }

    /// Pearson over every unordered pair of the configured metric set.
    fn scan_correlations(&mut self) -> Result<()> {
        let metrics = self.config.metric_set.clone();
        for i in 0..metrics.len() {
            for j in (i + 1)..metrics.len() {
                let xs = self.provider.series(&metrics[i])?;
                let ys = self.provider.series(&metrics[j])?;

                let (coefficient, confidence, significance) = match pearson(&xs, &ys)? {
                    CorrelationOutcome::Value {
                        coefficient,
                        confidence,
                        significance,
                    } => (coefficient, confidence, significance),
                    CorrelationOutcome::Undefined(reason) => {
                        debug!(
                            metric_a = %metrics[i],
                            metric_b = %metrics[j],
                            %reason,
                            "skipping degenerate pair"
                        );
                        continue;
                    }
                };

                if coefficient.abs() > self.config.correlation.interesting_coefficient {
                    let result = CorrelationResult {
                        metrics: [metrics[i].clone(), metrics[j].clone()],
                        coefficient,
                        confidence,
                        time_window: xs.len(),
                        pattern: if coefficient > 0.0 {
                            PairPattern::Direct
                        } else {
                            PairPattern::Inverse
                        },
                        significance,
                    };
                    self.correlations
                        .insert(result.key(), vec![result.clone()]);

                    if confidence > self.config.correlation.event_confidence {
                        self.sink
                            .emit(AnalysisEvent::CorrelationDetected(result));
                    }
                }
            }
        }
        Ok(())
    }

    /// Classify every available metric; store only confident trends.
    fn scan_trends(&mut self) -> Result<()> {
        for metric in self.provider.available_metrics()? {
            let values = self.provider.series(&metric)?;
            let trend = detect_trend(&metric, &values, &self.config.trend);
            if trend.confidence > self.config.trend.store_confidence {
                self.sink.emit(AnalysisEvent::TrendDetected(trend.clone()));
                self.trends.insert(metric, trend);
            }
        }
        Ok(())
    }

    fn scan_temporal_patterns(&mut self) -> Result<()> {
        for metric in self.provider.available_metrics()? {
            let values = self.provider.series(&metric)?;
            let patterns = detect_patterns(&values, &self.config.temporal);
            if !patterns.is_empty() {
                self.sink.emit(AnalysisEvent::TemporalPatternDetected {
                    metric: metric.clone(),
                    patterns: patterns.clone(),
                });
                self.temporal_patterns.insert(metric, patterns);
            }
        }
        Ok(())
    }

    /// Lag-correlate every unordered pair of the configured source set.
    /// Results append to the pair's history rather than replacing it.
    fn scan_multi_source(&mut self) -> Result<()> {
        let sources = self.config.source_set.clone();
        for i in 0..sources.len() {
            for j in (i + 1)..sources.len() {
                let xs = self.provider.source_series(&sources[i])?;
                let ys = self.provider.source_series(&sources[j])?;

                let Some(result) = multi_source_correlation(
                    &sources[i],
                    &sources[j],
                    &xs,
                    &ys,
                    &self.config.multi_source,
                )?
                else {
                    continue;
                };

                if result.confidence > self.config.multi_source.retain_confidence {
                    self.multi_source
                        .entry(result.key())
                        .or_default()
                        .push(result.clone());
                    self.sink
                        .emit(AnalysisEvent::MultiSourceCorrelationDetected(result));
                }
            }
        }
        Ok(())
    }

    /// Rebuild the insight list and announce the high-priority entries.
    fn rebuild_insights(&mut self) {
        self.insights =
            generate_insights(&self.correlations, &self.trends, &self.config.insight);
        for insight in &self.insights {
            if insight.priority == Priority::High {
                self.sink
                    .emit(AnalysisEvent::ActionableInsight(insight.clone()));
            }
        }
    }

    // ── Snapshot accessors (copy-on-read) ───────────────────────────────

    pub fn correlations(&self) -> HashMap<String, Vec<CorrelationResult>> {
        self.correlations.clone()
    }

    pub fn trends(&self) -> HashMap<String, TrendAnalysis> {
        self.trends.clone()
    }

    pub fn temporal_patterns(&self) -> HashMap<String, Vec<TemporalPattern>> {
        self.temporal_patterns.clone()
    }

    pub fn multi_source_correlations(&self) -> HashMap<String, Vec<MultiSourceCorrelation>> {
        self.multi_source.clone()
    }

    pub fn insights(&self) -> Vec<ActionableInsight> {
        self.insights.clone()
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Move the scheduler onto a runner thread that ticks immediately and
    /// then every `tick_interval_secs`.
    pub fn start(self) -> SchedulerHandle {
        let interval = Duration::from_secs(self.config.tick_interval_secs);
        let budget = Duration::from_secs(self.config.tick_budget_secs);
        let inner = Arc::new(Mutex::new(self));
        let stop = Arc::new(AtomicBool::new(false));

        let thread_inner = Arc::clone(&inner);
        let thread_stop = Arc::clone(&stop);
        let thread = std::thread::spawn(move || {
            while !thread_stop.load(Ordering::Relaxed) {
                let started = Instant::now();
                lock_recovering(&thread_inner).run_tick();
                let elapsed = started.elapsed();
                if elapsed > budget {
                    warn!(
                        elapsed_ms = elapsed.as_millis() as u64,
                        budget_ms = budget.as_millis() as u64,
                        "analysis tick overran its budget"
                    );
                }
                // Sleep in short slices so stop() is honored promptly.
                let mut remaining = interval.saturating_sub(elapsed);
                while remaining > Duration::ZERO && !thread_stop.load(Ordering::Relaxed) {
                    let slice = remaining.min(Duration::from_millis(25));
                    std::thread::sleep(slice);
                    remaining = remaining.saturating_sub(slice);
                }
            }
        });

        SchedulerHandle {
            inner,
            stop,
            thread: Some(thread),
        }
    }
}

/// A poisoned lock only means a prior tick panicked; the state itself is
/// still usable for reads and later ticks.
fn lock_recovering(inner: &Arc<Mutex<AnalysisScheduler>>) -> MutexGuard<'_, AnalysisScheduler> {
    match inner.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Handle to a running scheduler thread. Dropping the handle stops the
/// thread.
pub struct SchedulerHandle {
    inner: Arc<Mutex<AnalysisScheduler>>,
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl SchedulerHandle {
    pub fn correlations(&self) -> HashMap<String, Vec<CorrelationResult>> {
        lock_recovering(&self.inner).correlations()
    }

    pub fn trends(&self) -> HashMap<String, TrendAnalysis> {
        lock_recovering(&self.inner).trends()
    }

    pub fn temporal_patterns(&self) -> HashMap<String, Vec<TemporalPattern>> {
        lock_recovering(&self.inner).temporal_patterns()
    }

    pub fn multi_source_correlations(&self) -> HashMap<String, Vec<MultiSourceCorrelation>> {
        lock_recovering(&self.inner).multi_source_correlations()
    }

    pub fn insights(&self) -> Vec<ActionableInsight> {
        lock_recovering(&self.inner).insights()
    }

    /// Stop the runner thread and wait for it to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for SchedulerHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}
