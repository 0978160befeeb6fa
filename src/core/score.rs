//! Type-safe score scale for dimension scoring.
//!
//! Every dimension scorer produces a value on the 0-100 scale. Encoding
//! the clamp in a newtype keeps out-of-range intermediates from leaking
//! into reports: a score constructed here always satisfies
//! `0.0 <= value <= 100.0` and `gap() == 100.0 - value()` exactly.

use serde::{Deserialize, Serialize};

/// Score on the 0-100 scale.
///
/// Values are automatically clamped to the [0.0, 100.0] range.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Score0To100(f64);

impl Score0To100 {
    /// Create a new score, clamping to [0.0, 100.0]. Non-finite input
    /// collapses to the floor rather than poisoning downstream math.
    pub fn new(value: f64) -> Self {
        if value.is_finite() {
            Self(value.clamp(0.0, 100.0))
        } else {
            Self(0.0)
        }
    }

    /// Get the raw score value.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Improvement headroom for this score.
    pub fn gap(self) -> f64 {
        100.0 - self.0
    }
}

impl From<f64> for Score0To100 {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}
