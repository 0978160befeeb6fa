//! Shared error types for the engine

use thiserror::Error;

use crate::registry::Violation;

/// Main error type for asomap operations
#[derive(Debug, Error)]
pub enum EngineError {
    /// Malformed or incomplete formula registry. Fatal: surfaced before
    /// any audit runs.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Stability or simulation requested with too few series points.
    /// Recoverable: the caller may retry once more data accrues.
    #[error("Insufficient data for '{metric}': {actual} point(s), {required} required")]
    InsufficientData {
        metric: String,
        required: usize,
        actual: usize,
    },

    /// Zero-mean series, coefficient of variation undefined. The caller
    /// should treat this as "not applicable", not as zero.
    #[error("Stability undefined for '{metric}': series mean is zero")]
    UndefinedStability { metric: String },

    /// Simulation requested for a scenario the registry does not declare.
    #[error("Unknown simulation scenario: '{0}'")]
    UnknownScenario(String),

    /// Registry document could not be parsed
    #[error("Failed to parse registry document: {0}")]
    Parse(String),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl EngineError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create a configuration error from accumulated registry violations
    pub fn from_violations(violations: &[Violation]) -> Self {
        let details = violations
            .iter()
            .map(|v| format!("  - {v}"))
            .collect::<Vec<_>>()
            .join("\n");
        Self::Configuration(format!(
            "registry failed validation with {} violation(s):\n{}",
            violations.len(),
            details
        ))
    }

    /// Create an insufficient-data error
    pub fn insufficient_data(metric: impl Into<String>, required: usize, actual: usize) -> Self {
        Self::InsufficientData {
            metric: metric.into(),
            required,
            actual,
        }
    }

    /// Create an undefined-stability error
    pub fn undefined_stability(metric: impl Into<String>) -> Self {
        Self::UndefinedStability {
            metric: metric.into(),
        }
    }
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_data_message_names_metric_and_counts() {
        let err = EngineError::insufficient_data("installs", 2, 1);
        assert_eq!(
            err.to_string(),
            "Insufficient data for 'installs': 1 point(s), 2 required"
        );
    }

    #[test]
    fn undefined_stability_is_distinct_from_insufficient_data() {
        let undefined = EngineError::undefined_stability("ctr");
        assert!(matches!(undefined, EngineError::UndefinedStability { .. }));
        let short = EngineError::insufficient_data("ctr", 2, 0);
        assert!(matches!(short, EngineError::InsufficientData { .. }));
    }
}
