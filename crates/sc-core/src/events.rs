//! Event fan-out for analysis findings.
//!
//! The scheduler pushes findings through an [`EventSink`] trait object
//! rather than a global event bus, so test harnesses can subscribe
//! deterministically. Delivery is fire-and-forget: sinks must not block
//! the emitting tick, and send failures are ignored.

use std::sync::mpsc::{channel, Receiver, Sender};

use serde::Serialize;

use crate::correlate::{CorrelationResult, MultiSourceCorrelation};
use crate::insight::ActionableInsight;
use crate::temporal::TemporalPattern;
use crate::trend::TrendAnalysis;

/// A finding that crossed its announcement threshold.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AnalysisEvent {
    CorrelationDetected(CorrelationResult),
    TrendDetected(TrendAnalysis),
    TemporalPatternDetected {
        metric: String,
        patterns: Vec<TemporalPattern>,
    },
    MultiSourceCorrelationDetected(MultiSourceCorrelation),
    ActionableInsight(ActionableInsight),
}

/// Receiver of analysis events. Implementations must not block.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: AnalysisEvent);
}

/// Discards every event.
#[derive(Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: AnalysisEvent) {}
}

/// Forwards events into an unbounded channel. Dropping the receiver
/// silently disconnects the sink.
#[derive(Debug)]
pub struct ChannelSink {
    tx: Sender<AnalysisEvent>,
}

impl ChannelSink {
    /// Create a sink and the receiver to drain it from.
    pub fn new() -> (Self, Receiver<AnalysisEvent>) {
        let (tx, rx) = channel();
        (Self { tx }, rx)
    }
}

impl EventSink for ChannelSink {
    fn emit(&self, event: AnalysisEvent) {
        let _ = self.tx.send(event);
    }
}
