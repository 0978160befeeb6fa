//! Intelligence layer: stability, opportunity ranking, simulation, and
//! anomaly attribution over audit results and historical KPI series.

pub mod anomaly;
pub mod opportunity;
pub mod simulation;
pub mod stability;

pub use anomaly::attribute;
pub use opportunity::{opportunity_map, priority_score};
pub use simulation::{simulate, ScenarioRequest};
pub use stability::{classify, stability_score};

use crate::core::types::{AnomalySignals, AuditReport, IntelligenceBundle, KpiSeries};
use crate::core::Result;
use crate::registry::FormulaRegistry;

/// Everything the intelligence layer needs for one run
#[derive(Debug, Clone, Default)]
pub struct IntelligenceRequest {
    pub series: Vec<KpiSeries>,
    pub scenarios: Vec<ScenarioRequest>,
    pub signals: Vec<AnomalySignals>,
}

/// Build the full intelligence bundle for one audit.
///
/// Series that cannot be scored (too short, zero mean) are skipped with a
/// warning; both conditions are recoverable from the caller's side and
/// must not fail the rest of the bundle. Unknown simulation scenarios,
/// by contrast, are wiring mistakes and abort the run.
pub fn build_bundle(
    report: &AuditReport,
    request: &IntelligenceRequest,
    registry: &FormulaRegistry,
) -> Result<IntelligenceBundle> {
    let mut stability = Vec::new();
    for series in &request.series {
        match stability_score(series, registry) {
            Ok(score) => stability.push(score),
            Err(err) => log::warn!("skipping series '{}': {err}", series.metric),
        }
    }

    let opportunities = opportunity_map(report, &stability, registry);

    let mut simulations = Vec::new();
    for scenario in &request.scenarios {
        // Use the scored volatility of the scenario's target metric when
        // we have it; a scenario without history projects without a band.
        let volatility = stability
            .iter()
            .find(|s| {
                registry
                    .simulation
                    .scenario(&scenario.scenario)
                    .map(|rules| rules.metric == s.metric)
                    .unwrap_or(false)
            })
            .map(|s| s.classification);
        simulations.push(simulate(scenario, volatility, registry)?);
    }

    let attributions = request
        .signals
        .iter()
        .map(|signals| {
            let mut signals = signals.clone();
            if signals.volatility.is_none() {
                signals.volatility = stability
                    .iter()
                    .find(|s| s.metric == signals.metric)
                    .map(|s| s.classification);
            }
            attribute(&signals, registry)
        })
        .collect();

    Ok(IntelligenceBundle {
        stability,
        opportunities,
        simulations,
        attributions,
    })
}
