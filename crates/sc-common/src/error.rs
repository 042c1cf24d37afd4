//! Error types for Signal Correlate.

use thiserror::Error;

/// Result type alias for Signal Correlate operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for Signal Correlate.
#[derive(Error, Debug)]
pub enum Error {
    // Input errors (10-19)
    #[error("series length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("empty series passed to {op}")]
    EmptySeries { op: String },

    #[error("insufficient samples: {have} (need {need})")]
    InsufficientSamples { have: usize, need: usize },

    // Statistics errors (20-29)
    #[error("statistics error: {0}")]
    Stats(#[from] sc_stats::StatsError),

    #[error("degenerate data: {0}")]
    DegenerateData(String),

    // Provider errors (30-39)
    #[error("metric provider error: {0}")]
    Provider(String),

    #[error("unknown metric: {name}")]
    UnknownMetric { name: String },

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the error code for this error type.
    /// Used for detailed error reporting in structured output.
    pub fn code(&self) -> u32 {
        match self {
            Error::LengthMismatch { .. } => 10,
            Error::EmptySeries { .. } => 11,
            Error::InsufficientSamples { .. } => 12,
            Error::Stats(_) => 20,
            Error::DegenerateData(_) => 21,
            Error::Provider(_) => 30,
            Error::UnknownMetric { .. } => 31,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(Error::LengthMismatch { left: 3, right: 5 }.code(), 10);
        assert_eq!(
            Error::EmptySeries {
                op: "mean".to_string()
            }
            .code(),
            11
        );
        assert_eq!(Error::Provider("down".to_string()).code(), 30);
    }

    #[test]
    fn test_stats_error_converts() {
        let stats_err = sc_stats::StatsError::EmptyInput { op: "variance" };
        let err: Error = stats_err.into();
        assert_eq!(err.code(), 20);
        assert!(err.to_string().contains("variance"));
    }

    #[test]
    fn test_display_formats() {
        let err = Error::LengthMismatch { left: 10, right: 7 };
        assert_eq!(err.to_string(), "series length mismatch: 10 vs 7");
    }
}
