//! Outcome simulation: registry-elasticity projections with
//! volatility-derived confidence bands.

use crate::core::types::{SimulationResult, VolatilityClass};
use crate::core::{EngineError, Result};
use crate::registry::FormulaRegistry;

/// One requested projection
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScenarioRequest {
    /// Registry scenario name
    pub scenario: String,
    /// Current value of the scenario's target metric
    pub current_value: f64,
    /// Hypothetical change to the driving metric
    pub input_delta: f64,
}

/// Project one scenario.
///
/// `projected = current + input_delta * elasticity`. Unknown scenario
/// names are rejected, never silently zeroed. When a volatility
/// classification is available the projection carries a confidence band
/// whose half-width is the projected change scaled by the registry's
/// per-class multiplier.
pub fn simulate(
    request: &ScenarioRequest,
    volatility: Option<VolatilityClass>,
    registry: &FormulaRegistry,
) -> Result<SimulationResult> {
    let scenario = registry
        .simulation
        .scenario(&request.scenario)
        .ok_or_else(|| EngineError::UnknownScenario(request.scenario.clone()))?;

    let change = request.input_delta * scenario.elasticity;
    let projected = request.current_value + change;

    let confidence_band = volatility.map(|class| {
        let half_width = change.abs() * registry.simulation.band_multipliers.multiplier(class);
        (projected - half_width, projected + half_width)
    });

    Ok(SimulationResult {
        scenario: scenario.name.clone(),
        metric: scenario.metric.clone(),
        current_value: request.current_value,
        input_delta: request.input_delta,
        projected_outcome: projected,
        confidence_band,
    })
}
