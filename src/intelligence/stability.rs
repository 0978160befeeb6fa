//! Stability scoring: coefficient of variation over a KPI series.

use crate::core::types::{KpiSeries, StabilityScore, VolatilityClass};
use crate::core::{EngineError, Result};
use crate::registry::{FormulaRegistry, StabilityThresholds};

/// Score one KPI series.
///
/// Fails with `InsufficientData` below the registry minimum sample count
/// and with `UndefinedStability` for a zero-mean series; never returns
/// NaN or a default in either case.
pub fn stability_score(series: &KpiSeries, registry: &FormulaRegistry) -> Result<StabilityScore> {
    let thresholds = &registry.stability;
    let n = series.len();
    if n < thresholds.min_sample_size {
        return Err(EngineError::insufficient_data(
            &series.metric,
            thresholds.min_sample_size,
            n,
        ));
    }

    let mean = series.values().sum::<f64>() / n as f64;
    if mean == 0.0 {
        return Err(EngineError::undefined_stability(&series.metric));
    }

    // Population standard deviation over the full series.
    let variance = series.values().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;
    let cv = variance.sqrt() / mean;

    Ok(StabilityScore {
        metric: series.metric.clone(),
        coefficient_of_variation: cv,
        classification: classify(cv, thresholds),
        sample_size: n,
    })
}

/// Classify a coefficient of variation against registry thresholds.
/// Volatility is a magnitude; a negative-mean series classifies by |cv|.
pub fn classify(cv: f64, thresholds: &StabilityThresholds) -> VolatilityClass {
    let magnitude = cv.abs();
    if magnitude < thresholds.stable_max_cv {
        VolatilityClass::Stable
    } else if magnitude <= thresholds.moderate_max_cv {
        VolatilityClass::Moderate
    } else {
        VolatilityClass::Volatile
    }
}
