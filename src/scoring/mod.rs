//! Audit orchestration: tokenize, derive combos, run the seven dimension
//! scorers, and assemble the report.

pub mod dimensions;
pub mod gap;

pub use gap::{ranked_by_gap, severity_for_gap};

use crate::analysis::{generate_combos, tokenize};
use crate::core::score::Score0To100;
use crate::core::types::{AuditReport, Dimension, DimensionScore, MetadataDocument};
use crate::registry::FormulaRegistry;

/// Engine version stamped into every report
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Audit one metadata document against a validated registry.
///
/// Total over well-formed documents: empty or malformed text scores at
/// the low end of each dimension instead of failing. Identical inputs and
/// registry version always produce identical reports.
pub fn audit(document: &MetadataDocument, registry: &FormulaRegistry) -> AuditReport {
    let tokens = tokenize(document, registry);
    let combos = generate_combos(&tokens, registry);
    let vocabulary = registry.category_vocabulary(&document.category);
    let market = registry.market_rules(&document.market);

    let mut scores = Vec::with_capacity(registry.dimension_order.len());
    for dimension in &registry.dimension_order {
        let (score, explanation) = match dimension {
            Dimension::IntentCoverage => dimensions::intent_coverage(&tokens, registry),
            Dimension::KeywordCoverage => {
                dimensions::keyword_coverage(&tokens, &vocabulary, registry)
            }
            Dimension::ComboQuality => dimensions::combo_quality(&combos),
            Dimension::DiscoveryCoverage => dimensions::discovery_coverage(&tokens),
            Dimension::Relevance => dimensions::relevance(&tokens, registry),
            Dimension::Structure => dimensions::structure(document, &market, registry),
            Dimension::BrandBalance => dimensions::brand_balance(&tokens, registry),
        };
        let severity = severity_for_gap(score.gap(), &registry.severity_bands);
        scores.push(DimensionScore::new(*dimension, score, severity, explanation));
    }

    let overall = weighted_overall(&scores, registry);
    log::debug!(
        "audited '{}' ({}): overall {:.1}",
        document.title,
        document.category,
        overall
    );

    AuditReport {
        category: document.category.clone(),
        market: document.market.clone(),
        engine_version: ENGINE_VERSION.to_string(),
        registry_version: registry.version.clone(),
        overall_score: overall,
        dimensions: scores,
        tokens,
    }
}

/// Weighted aggregate of the dimension scores per registry weights
fn weighted_overall(scores: &[DimensionScore], registry: &FormulaRegistry) -> f64 {
    let weighted: f64 = scores
        .iter()
        .map(|s| s.score * registry.weights.weight(s.dimension))
        .sum();
    Score0To100::new(weighted / registry.weights.total).value()
}
