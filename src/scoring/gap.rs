//! Gap analysis: distance to 100 and severity banding.

use crate::core::types::{Dimension, DimensionScore, Severity};
use crate::registry::{FormulaRegistry, SeverityBands};

/// Severity band for a gap, per registry boundaries
pub fn severity_for_gap(gap: f64, bands: &SeverityBands) -> Severity {
    if gap >= bands.critical_min {
        Severity::Critical
    } else if gap >= bands.significant_min {
        Severity::Significant
    } else if gap >= bands.moderate_min {
        Severity::Moderate
    } else {
        Severity::Minor
    }
}

/// Dimensions ordered by gap, largest first. Ties break by dimension
/// declaration order in the registry, keeping the ranking stable and
/// deterministic.
pub fn ranked_by_gap<'a>(
    scores: &'a [DimensionScore],
    registry: &FormulaRegistry,
) -> Vec<&'a DimensionScore> {
    let order_index = |dimension: Dimension| {
        registry
            .dimension_order
            .iter()
            .position(|d| *d == dimension)
            .unwrap_or(usize::MAX)
    };
    let mut ranked: Vec<&DimensionScore> = scores.iter().collect();
    ranked.sort_by(|a, b| {
        b.gap
            .partial_cmp(&a.gap)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| order_index(a.dimension).cmp(&order_index(b.dimension)))
    });
    ranked
}
