//! Insight generation: turns strong correlations and trends into
//! prioritized, human-readable recommendations.
//!
//! The insight list is rebuilt from scratch every cycle; nothing
//! accumulates. Inputs are walked in sorted key order so repeated runs
//! over the same state produce the same list.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::correlate::CorrelationResult;
use crate::trend::{TrendAnalysis, TrendKind};

/// Category of an insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    Performance,
    Resource,
    /// Reserved for demand-signal findings.
    Demand,
    /// Reserved for temporal-pattern findings.
    Pattern,
}

/// Urgency of an insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// A generated recommendation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionableInsight {
    pub kind: InsightKind,
    pub priority: Priority,
    /// What was observed.
    pub insight: String,
    /// What to do about it.
    pub recommendation: String,
    /// Metrics the finding concerns.
    pub metrics: Vec<String>,
    pub confidence: f64,
}

/// Thresholds for insight generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightConfig {
    /// Minimum correlation confidence to produce a performance insight.
    pub correlation_confidence: f64,
    /// Minimum trend confidence to produce a resource insight.
    pub trend_confidence: f64,
    /// Confidence above which an insight is high priority.
    pub high_priority_confidence: f64,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            correlation_confidence: 0.8,
            trend_confidence: 0.7,
            high_priority_confidence: 0.9,
        }
    }
}

/// Rebuild the insight list from the current correlations and trends.
pub fn generate_insights(
    correlations: &HashMap<String, Vec<CorrelationResult>>,
    trends: &HashMap<String, TrendAnalysis>,
    config: &InsightConfig,
) -> Vec<ActionableInsight> {
    let mut insights = Vec::new();

    let mut correlation_keys: Vec<&String> = correlations.keys().collect();
    correlation_keys.sort();
    for key in correlation_keys {
        for result in &correlations[key] {
            if result.confidence > config.correlation_confidence {
                insights.push(performance_insight(result, config));
            }
        }
    }

    let mut trend_keys: Vec<&String> = trends.keys().collect();
    trend_keys.sort();
    for key in trend_keys {
        let trend = &trends[key];
        if trend.confidence > config.trend_confidence {
            insights.push(resource_insight(trend, config));
        }
    }

    insights
}

fn priority_for(confidence: f64, config: &InsightConfig) -> Priority {
    if confidence > config.high_priority_confidence {
        Priority::High
    } else {
        Priority::Medium
    }
}

fn performance_insight(result: &CorrelationResult, config: &InsightConfig) -> ActionableInsight {
    let [metric1, metric2] = &result.metrics;
    let relationship = if result.coefficient > 0.0 {
        "increases with"
    } else {
        "decreases with"
    };

    ActionableInsight {
        kind: InsightKind::Performance,
        priority: priority_for(result.confidence, config),
        insight: format!(
            "Strong {} correlation detected between {} and {}",
            result.pattern, metric1, metric2
        ),
        recommendation: format!(
            "Monitor {} as it {} {}. Consider optimizing {} to improve {}.",
            metric1, relationship, metric2, metric2, metric1
        ),
        metrics: result.metrics.to_vec(),
        confidence: result.confidence,
    }
}

fn resource_insight(trend: &TrendAnalysis, config: &InsightConfig) -> ActionableInsight {
    let recommendation = match trend.trend {
        TrendKind::Increasing => "Consider scaling resources or optimizing usage patterns.",
        TrendKind::Decreasing => {
            "Resource utilization is improving. Monitor for potential underutilization."
        }
        TrendKind::Cyclical => {
            "Consider implementing dynamic resource allocation based on the detected pattern."
        }
        TrendKind::Stable => "Current resource allocation appears optimal.",
    };

    ActionableInsight {
        kind: InsightKind::Resource,
        priority: priority_for(trend.confidence, config),
        insight: format!(
            "{} shows a {} trend with {:.1}% confidence",
            trend.metric,
            trend.trend,
            trend.confidence * 100.0
        ),
        recommendation: recommendation.to_string(),
        metrics: vec![trend.metric.clone()],
        confidence: trend.confidence,
    }
}
