//! Registry validation with error accumulation.
//!
//! `validate` collects ALL violations instead of failing at the first
//! one, so a misconfigured registry surfaces every problem in a single
//! run. Loading refuses any registry with a non-empty violation list.

use std::collections::HashSet;
use std::fmt;

use crate::core::types::Dimension;

use super::FormulaRegistry;

/// One structural or consistency violation found in a registry document
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// Dotted path of the offending field, e.g. `weights.total`
    pub field: String,
    pub message: String,
}

impl Violation {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a registry, accumulating every violation
pub fn validate(registry: &FormulaRegistry) -> Vec<Violation> {
    let mut violations = Vec::new();

    validate_version(registry, &mut violations);
    validate_dimension_order(registry, &mut violations);
    validate_weights(registry, &mut violations);
    validate_severity_bands(registry, &mut violations);
    validate_intent(registry, &mut violations);
    validate_brand(registry, &mut violations);
    validate_combo(registry, &mut violations);
    validate_structure(registry, &mut violations);
    validate_relevance(registry, &mut violations);
    validate_markets(registry, &mut violations);
    validate_categories(registry, &mut violations);
    validate_tier_weights(registry, &mut violations);
    validate_stemming(registry, &mut violations);
    validate_stability(registry, &mut violations);
    validate_opportunities(registry, &mut violations);
    validate_simulation(registry, &mut violations);
    validate_anomaly(registry, &mut violations);

    violations
}

fn validate_version(registry: &FormulaRegistry, out: &mut Vec<Violation>) {
    let parts: Vec<&str> = registry.version.split('.').collect();
    let semver_ok = parts.len() == 3 && parts.iter().all(|p| p.parse::<u64>().is_ok());
    if !semver_ok {
        out.push(Violation::new(
            "version",
            format!("'{}' is not a MAJOR.MINOR.PATCH version", registry.version),
        ));
    }
    if registry.changelog.is_empty() {
        out.push(Violation::new("changelog", "must not be empty"));
    } else if registry
        .changelog
        .last()
        .map(|entry| entry.version != registry.version)
        .unwrap_or(false)
    {
        out.push(Violation::new(
            "changelog",
            format!(
                "newest entry must match registry version {}",
                registry.version
            ),
        ));
    }
}

fn validate_dimension_order(registry: &FormulaRegistry, out: &mut Vec<Violation>) {
    let unique: HashSet<_> = registry.dimension_order.iter().collect();
    if registry.dimension_order.len() != Dimension::ALL.len()
        || unique.len() != Dimension::ALL.len()
    {
        out.push(Violation::new(
            "dimension_order",
            "must list each of the seven dimensions exactly once",
        ));
    }
}

fn validate_weights(registry: &FormulaRegistry, out: &mut Vec<Violation>) {
    let weights = &registry.weights;
    for dimension in Dimension::ALL {
        let w = weights.weight(dimension);
        if !w.is_finite() || w < 0.0 {
            out.push(Violation::new(
                format!("weights.{}", dimension.key()),
                format!("weight must be a non-negative number, got {w}"),
            ));
        }
    }
    if weights.total <= 0.0 {
        out.push(Violation::new("weights.total", "must be positive"));
    } else if (weights.sum() - weights.total).abs() > 0.001 {
        out.push(Violation::new(
            "weights",
            format!(
                "dimension weights sum to {:.3}, declared total is {:.3}",
                weights.sum(),
                weights.total
            ),
        ));
    }
}

fn validate_severity_bands(registry: &FormulaRegistry, out: &mut Vec<Violation>) {
    let bands = &registry.severity_bands;
    let ordered = bands.critical_min > bands.significant_min
        && bands.significant_min > bands.moderate_min
        && bands.moderate_min > 0.0;
    if !ordered || bands.critical_min > 100.0 {
        out.push(Violation::new(
            "severity_bands",
            format!(
                "boundaries must satisfy 0 < moderate ({}) < significant ({}) < critical ({}) <= 100",
                bands.moderate_min, bands.significant_min, bands.critical_min
            ),
        ));
    }
}

fn validate_intent(registry: &FormulaRegistry, out: &mut Vec<Violation>) {
    let intent = &registry.intent;
    for (name, terms) in [
        ("informational", &intent.informational),
        ("commercial", &intent.commercial),
        ("transactional", &intent.transactional),
    ] {
        if terms.is_empty() {
            out.push(Violation::new(
                format!("intent.{name}"),
                "term list must not be empty",
            ));
        }
    }
    let unique: HashSet<_> = intent.priority.iter().collect();
    if intent.priority.len() != 3 || unique.len() != 3 {
        out.push(Violation::new(
            "intent.priority",
            "must list each intent class exactly once",
        ));
    }
    let weight_sum =
        intent.informational_weight + intent.commercial_weight + intent.transactional_weight;
    if (weight_sum - 100.0).abs() > 0.001 {
        out.push(Violation::new(
            "intent",
            format!("bucket weights must sum to 100, got {weight_sum:.3}"),
        ));
    }
    if intent.min_presence == 0 {
        out.push(Violation::new("intent.min_presence", "must be at least 1"));
    }
    if intent.balance_penalty < 0.0 {
        out.push(Violation::new(
            "intent.balance_penalty",
            "must be non-negative",
        ));
    }
    if !(0.0..=100.0).contains(&intent.missing_transactional_ceiling) {
        out.push(Violation::new(
            "intent.missing_transactional_ceiling",
            "must be within 0-100",
        ));
    }
}

fn validate_brand(registry: &FormulaRegistry, out: &mut Vec<Violation>) {
    let brand = &registry.brand;
    if !(0.0 <= brand.min_pct && brand.min_pct < brand.max_pct && brand.max_pct <= 100.0) {
        out.push(Violation::new(
            "brand",
            format!(
                "band must satisfy 0 <= min_pct ({}) < max_pct ({}) <= 100",
                brand.min_pct, brand.max_pct
            ),
        ));
    }
    if brand.falloff_pct <= 0.0 {
        out.push(Violation::new("brand.falloff_pct", "must be positive"));
    }
}

fn validate_combo(registry: &FormulaRegistry, out: &mut Vec<Violation>) {
    let combo = &registry.combo;
    if combo.min_len < 2 || combo.max_len > 3 || combo.min_len > combo.max_len {
        out.push(Violation::new(
            "combo",
            format!(
                "phrase lengths must satisfy 2 <= min_len ({}) <= max_len ({}) <= 3",
                combo.min_len, combo.max_len
            ),
        ));
    }
}

fn validate_structure(registry: &FormulaRegistry, out: &mut Vec<Violation>) {
    let structure = &registry.structure;
    if !(0.0 < structure.target_low
        && structure.target_low < structure.target_high
        && structure.target_high <= 1.0)
    {
        out.push(Violation::new(
            "structure",
            format!(
                "utilization band must satisfy 0 < target_low ({}) < target_high ({}) <= 1",
                structure.target_low, structure.target_high
            ),
        ));
    }
    let blend = structure.utilization_weight + structure.word_count_weight;
    if (blend - 1.0).abs() > 0.001 {
        out.push(Violation::new(
            "structure",
            format!("utilization and word-count weights must sum to 1, got {blend:.3}"),
        ));
    }
}

fn validate_relevance(registry: &FormulaRegistry, out: &mut Vec<Violation>) {
    let relevance = &registry.relevance;
    for (name, weight) in [
        ("title_weight", relevance.title_weight),
        ("subtitle_weight", relevance.subtitle_weight),
        ("description_weight", relevance.description_weight),
    ] {
        if weight <= 0.0 {
            out.push(Violation::new(
                format!("relevance.{name}"),
                "field weight must be positive",
            ));
        }
    }
}

fn validate_markets(registry: &FormulaRegistry, out: &mut Vec<Violation>) {
    for (market, rules) in &registry.markets {
        for field in crate::core::types::SourceField::ALL {
            let field_rules = rules.field(field);
            if field_rules.char_limit == 0 {
                out.push(Violation::new(
                    format!("markets.{market}.{}", field.display_name()),
                    "char_limit must be positive",
                ));
            }
            if field_rules.min_words > field_rules.max_words {
                out.push(Violation::new(
                    format!("markets.{market}.{}", field.display_name()),
                    format!(
                        "min_words ({}) exceeds max_words ({})",
                        field_rules.min_words, field_rules.max_words
                    ),
                ));
            }
        }
    }
}

fn validate_categories(registry: &FormulaRegistry, out: &mut Vec<Violation>) {
    for (category, vocab) in &registry.categories {
        if vocab.defining.is_empty() && vocab.must_have.is_empty() {
            out.push(Violation::new(
                format!("categories.{category}"),
                "declared category must have defining terms or must-have keywords",
            ));
        }
        for keyword in &vocab.must_have {
            if keyword.term.trim().is_empty() {
                out.push(Violation::new(
                    format!("categories.{category}.must_have"),
                    "keyword term must not be blank",
                ));
            }
        }
    }
}

fn validate_tier_weights(registry: &FormulaRegistry, out: &mut Vec<Violation>) {
    let tiers = &registry.tier_weights;
    for (name, weight) in [
        ("high", tiers.high),
        ("medium", tiers.medium),
        ("low", tiers.low),
    ] {
        if !weight.is_finite() || weight <= 0.0 {
            out.push(Violation::new(
                format!("tier_weights.{name}"),
                format!("weight must be a positive number, got {weight}"),
            ));
        }
    }
    if !(tiers.high >= tiers.medium && tiers.medium >= tiers.low) {
        out.push(Violation::new(
            "tier_weights",
            format!(
                "weights must be monotonic: high ({}) >= medium ({}) >= low ({})",
                tiers.high, tiers.medium, tiers.low
            ),
        ));
    }
}

fn validate_stemming(registry: &FormulaRegistry, out: &mut Vec<Violation>) {
    let stemming = &registry.stemming;
    if stemming.min_stem_len == 0 {
        out.push(Violation::new("stemming.min_stem_len", "must be at least 1"));
    }
    for suffix in &stemming.suffixes {
        if suffix.trim().is_empty() {
            out.push(Violation::new(
                "stemming.suffixes",
                "suffix must not be blank",
            ));
        }
    }
}

fn validate_stability(registry: &FormulaRegistry, out: &mut Vec<Violation>) {
    let stability = &registry.stability;
    if stability.min_sample_size < 2 {
        out.push(Violation::new(
            "stability.min_sample_size",
            "must be at least 2",
        ));
    }
    if !(0.0 < stability.stable_max_cv && stability.stable_max_cv < stability.moderate_max_cv) {
        out.push(Violation::new(
            "stability",
            format!(
                "thresholds must satisfy 0 < stable_max_cv ({}) < moderate_max_cv ({})",
                stability.stable_max_cv, stability.moderate_max_cv
            ),
        ));
    }
}

fn validate_opportunities(registry: &FormulaRegistry, out: &mut Vec<Violation>) {
    let opportunities = &registry.opportunities;
    if opportunities.categories.is_empty() {
        out.push(Violation::new(
            "opportunities.categories",
            "must not be empty",
        ));
    }
    let mut seen = HashSet::new();
    for category in &opportunities.categories {
        if !seen.insert(category.id.as_str()) {
            out.push(Violation::new(
                "opportunities.categories",
                format!("duplicate category id '{}'", category.id),
            ));
        }
    }
    let priority = &opportunities.priority;
    if priority.gap_weight < 0.0 || priority.volatility_weight < 0.0 {
        out.push(Violation::new(
            "opportunities.priority",
            "weights must be non-negative",
        ));
    }
    if priority.gap_weight + priority.volatility_weight <= 0.0 {
        out.push(Violation::new(
            "opportunities.priority",
            "at least one weight must be positive",
        ));
    }
    let points = &priority.volatility_points;
    if !(points.stable <= points.moderate && points.moderate <= points.volatile) {
        out.push(Violation::new(
            "opportunities.priority.volatility_points",
            "points must be monotonic: stable <= moderate <= volatile",
        ));
    }
}

fn validate_simulation(registry: &FormulaRegistry, out: &mut Vec<Violation>) {
    let simulation = &registry.simulation;
    if simulation.scenarios.is_empty() {
        out.push(Violation::new("simulation.scenarios", "must not be empty"));
    }
    let mut seen = HashSet::new();
    for scenario in &simulation.scenarios {
        if !seen.insert(scenario.name.as_str()) {
            out.push(Violation::new(
                "simulation.scenarios",
                format!("duplicate scenario name '{}'", scenario.name),
            ));
        }
        if scenario.metric.trim().is_empty() {
            out.push(Violation::new(
                format!("simulation.scenarios.{}", scenario.name),
                "metric must not be blank",
            ));
        }
        if !scenario.elasticity.is_finite() {
            out.push(Violation::new(
                format!("simulation.scenarios.{}", scenario.name),
                "elasticity must be finite",
            ));
        }
    }
    let bands = &simulation.band_multipliers;
    let monotonic =
        0.0 <= bands.stable && bands.stable <= bands.moderate && bands.moderate <= bands.volatile;
    if !monotonic {
        out.push(Violation::new(
            "simulation.band_multipliers",
            "multipliers must be non-negative and monotonic: stable <= moderate <= volatile",
        ));
    }
}

fn validate_anomaly(registry: &FormulaRegistry, out: &mut Vec<Violation>) {
    let anomaly = &registry.anomaly;
    if anomaly.rules.is_empty() {
        out.push(Violation::new("anomaly.rules", "must not be empty"));
    }
    let mut seen = HashSet::new();
    for rule in &anomaly.rules {
        if !seen.insert(rule.id.as_str()) {
            out.push(Violation::new(
                "anomaly.rules",
                format!("duplicate rule id '{}'", rule.id),
            ));
        }
        if !(0.0..=1.0).contains(&rule.confidence) {
            out.push(Violation::new(
                format!("anomaly.rules.{}", rule.id),
                format!("confidence must be within 0-1, got {}", rule.confidence),
            ));
        }
        if rule.explanation.trim().is_empty() {
            out.push(Violation::new(
                format!("anomaly.rules.{}", rule.id),
                "explanation template must not be blank",
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Dimension;

    #[test]
    fn overlapping_severity_bands_are_rejected() {
        let mut registry = FormulaRegistry::default();
        registry.severity_bands.significant_min = 45.0; // above critical_min
        let violations = validate(&registry);
        assert!(violations.iter().any(|v| v.field == "severity_bands"));
    }

    #[test]
    fn weight_sum_mismatch_is_rejected() {
        let mut registry = FormulaRegistry::default();
        registry.weights.relevance += 5.0;
        let violations = validate(&registry);
        assert!(violations.iter().any(|v| v.field == "weights"));
    }

    #[test]
    fn all_violations_are_accumulated_not_just_the_first() {
        let mut registry = FormulaRegistry::default();
        registry.weights.relevance += 5.0;
        registry.severity_bands.moderate_min = 0.0;
        registry.intent.transactional.clear();
        registry.anomaly.rules[0].confidence = 1.5;
        let violations = validate(&registry);
        assert!(violations.len() >= 4, "got: {violations:?}");
    }

    #[test]
    fn duplicate_dimension_in_order_is_rejected() {
        let mut registry = FormulaRegistry::default();
        registry.dimension_order[0] = Dimension::Relevance;
        let violations = validate(&registry);
        assert!(violations.iter().any(|v| v.field == "dimension_order"));
    }

    #[test]
    fn empty_anomaly_rule_list_is_rejected() {
        let mut registry = FormulaRegistry::default();
        registry.anomaly.rules.clear();
        let violations = validate(&registry);
        assert!(violations.iter().any(|v| v.field == "anomaly.rules"));
    }
}
