//! Opportunity map: ranked improvement opportunities across the
//! registry's opportunity categories.

use crate::core::types::{AuditReport, OpportunityItem, StabilityScore, VolatilityClass};
use crate::registry::FormulaRegistry;
use crate::scoring::{ranked_by_gap, severity_for_gap};

/// Build the ranked opportunity map for one audit.
///
/// Dimension-backed categories draw their gap from the audit report; the
/// stability-backed category appears only when historical series were
/// scored. Priority is the registry's weighted sum of gap share and
/// volatility points; ties break by the gap-ranked dimension ordering,
/// with the stability-backed category last among equals.
pub fn opportunity_map(
    report: &AuditReport,
    stability: &[StabilityScore],
    registry: &FormulaRegistry,
) -> Vec<OpportunityItem> {
    let rules = &registry.opportunities;
    let volatility = worst_volatility(stability);
    let gap_ranked = ranked_by_gap(&report.dimensions, registry);
    let gap_rank = |dimension| {
        gap_ranked
            .iter()
            .position(|s| s.dimension == dimension)
            .unwrap_or(gap_ranked.len())
    };

    let mut items = Vec::new();
    for category in &rules.categories {
        let (tie_rank, current_value, gap) = match category.dimension {
            Some(dimension) => match report.dimension(dimension) {
                Some(score) => (gap_rank(dimension), score.score, score.gap),
                None => continue,
            },
            // Stability-backed category: only meaningful with history.
            None => match volatility {
                Some(class) => {
                    let value =
                        100.0 * (1.0 - rules.priority.volatility_points.points(class)).max(0.0);
                    (gap_ranked.len(), value, 100.0 - value)
                }
                None => continue,
            },
        };

        let severity = severity_for_gap(gap, &registry.severity_bands);
        let priority = priority_score(gap, volatility, registry);
        items.push((
            tie_rank,
            OpportunityItem {
                category: category.id.clone(),
                current_value,
                gap_to_target: gap,
                severity,
                priority,
                rank: 0,
                recommended_action: category.actions.for_severity(severity).to_string(),
            },
        ));
    }

    items.sort_by(|(a_rank, a), (b_rank, b)| {
        b.priority
            .partial_cmp(&a.priority)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a_rank.cmp(b_rank))
    });

    items
        .into_iter()
        .enumerate()
        .map(|(position, (_, mut item))| {
            item.rank = position + 1;
            item
        })
        .collect()
}

/// Weighted-sum priority, monotonic in gap size and volatility class
pub fn priority_score(
    gap: f64,
    volatility: Option<VolatilityClass>,
    registry: &FormulaRegistry,
) -> f64 {
    let priority = &registry.opportunities.priority;
    let points = volatility
        .map(|class| priority.volatility_points.points(class))
        .unwrap_or(0.0);
    priority.gap_weight * (gap / 100.0) + priority.volatility_weight * points
}

/// Worst classification across the scored series, if any
fn worst_volatility(stability: &[StabilityScore]) -> Option<VolatilityClass> {
    stability
        .iter()
        .map(|s| s.classification)
        .max_by_key(|class| match class {
            VolatilityClass::Stable => 0,
            VolatilityClass::Moderate => 1,
            VolatilityClass::Volatile => 2,
        })
}
