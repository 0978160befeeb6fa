//! Formula registry: the single versioned, immutable configuration
//! document every scorer reads from.
//!
//! Every threshold, weight, and keyword list the engine consumes is a
//! named field here. The registry is loaded (or built from defaults) once,
//! validated, and then passed by shared reference through every call; no
//! component mutates it, and a new version is a new instance.

mod dimensions;
mod intelligence;
mod loader;
mod validation;

pub use dimensions::{
    BrandBand, CategoryVocabulary, ComboRules, DimensionWeights, FieldRules, ImportanceTier,
    IntentRules, MarketRules, MustHaveKeyword, RelevanceRules, SeverityBands, StemmingRules,
    StructureRules, TierWeights,
};
pub use intelligence::{
    ActionTemplates, AnomalyRule, AnomalyRules, BandMultipliers, OpportunityCategory,
    OpportunityPriority, OpportunityRules, ScenarioRules, SimulationRules, StabilityThresholds,
    Trigger, VolatilityPoints,
};
pub use loader::{load, parse_document, RegistryFormat};
pub use validation::{validate, Violation};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::types::Dimension;

/// One entry in the registry changelog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangelogEntry {
    pub version: String,
    pub date: chrono::NaiveDate,
    pub note: String,
}

/// The versioned formula registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormulaRegistry {
    /// Semver version of this formula set
    #[serde(default = "default_version")]
    pub version: String,
    /// Ordered history of formula changes
    #[serde(default = "default_changelog")]
    pub changelog: Vec<ChangelogEntry>,
    /// Declaration order of the seven dimensions; report ordering and
    /// ranking tie-breaks follow it
    #[serde(default = "default_dimension_order")]
    pub dimension_order: Vec<Dimension>,
    #[serde(default)]
    pub weights: DimensionWeights,
    #[serde(default)]
    pub severity_bands: SeverityBands,
    #[serde(default = "dimensions::default_markets")]
    pub markets: BTreeMap<String, MarketRules>,
    #[serde(default = "dimensions::default_categories")]
    pub categories: BTreeMap<String, CategoryVocabulary>,
    /// Relevance class 0 terms, shared across categories
    #[serde(default = "dimensions::default_filler_terms")]
    pub filler_terms: Vec<String>,
    /// Suffix-strip stemming rules for keyword matching
    #[serde(default)]
    pub stemming: StemmingRules,
    /// Keyword importance-tier weights for Keyword Coverage
    #[serde(default)]
    pub tier_weights: TierWeights,
    #[serde(default)]
    pub intent: IntentRules,
    #[serde(default)]
    pub brand: BrandBand,
    #[serde(default)]
    pub combo: ComboRules,
    #[serde(default)]
    pub structure: StructureRules,
    #[serde(default)]
    pub relevance: RelevanceRules,
    #[serde(default)]
    pub stability: StabilityThresholds,
    #[serde(default)]
    pub opportunities: OpportunityRules,
    #[serde(default)]
    pub simulation: SimulationRules,
    #[serde(default)]
    pub anomaly: AnomalyRules,
}

impl Default for FormulaRegistry {
    fn default() -> Self {
        Self {
            version: default_version(),
            changelog: default_changelog(),
            dimension_order: default_dimension_order(),
            weights: DimensionWeights::default(),
            severity_bands: SeverityBands::default(),
            markets: dimensions::default_markets(),
            categories: dimensions::default_categories(),
            filler_terms: dimensions::default_filler_terms(),
            stemming: StemmingRules::default(),
            tier_weights: TierWeights::default(),
            intent: IntentRules::default(),
            brand: BrandBand::default(),
            combo: ComboRules::default(),
            structure: StructureRules::default(),
            relevance: RelevanceRules::default(),
            stability: StabilityThresholds::default(),
            opportunities: OpportunityRules::default(),
            simulation: SimulationRules::default(),
            anomaly: AnomalyRules::default(),
        }
    }
}

fn default_version() -> String {
    "1.4.0".to_string()
}

fn default_changelog() -> Vec<ChangelogEntry> {
    vec![ChangelogEntry {
        version: default_version(),
        date: chrono::NaiveDate::from_ymd_opt(2026, 6, 1).unwrap_or_default(),
        note: "Built-in default formula set".to_string(),
    }]
}

fn default_dimension_order() -> Vec<Dimension> {
    Dimension::ALL.to_vec()
}

impl FormulaRegistry {
    /// Market rules for a locale, falling back to defaults for markets the
    /// registry does not list
    pub fn market_rules(&self, market: &str) -> MarketRules {
        match self.markets.get(market) {
            Some(rules) => rules.clone(),
            None => {
                log::debug!("no market rules for '{market}', using defaults");
                MarketRules::default()
            }
        }
    }

    /// Vocabulary for a category; unknown categories get an empty
    /// vocabulary, so every non-filler token lands in the neutral class
    pub fn category_vocabulary(&self, category: &str) -> CategoryVocabulary {
        match self.categories.get(category) {
            Some(vocab) => vocab.clone(),
            None => {
                log::debug!("no vocabulary for category '{category}', using empty");
                CategoryVocabulary::default()
            }
        }
    }

    /// Validate and return self, or the full violation list as a
    /// configuration error
    pub fn validated(self) -> crate::core::Result<Self> {
        let violations = validate(&self);
        if violations.is_empty() {
            Ok(self)
        } else {
            Err(crate::core::EngineError::from_violations(&violations))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_passes_validation() {
        let registry = FormulaRegistry::default();
        assert!(validate(&registry).is_empty());
    }

    #[test]
    fn default_registry_declares_all_fixed_surfaces() {
        let registry = FormulaRegistry::default();
        assert_eq!(registry.dimension_order.len(), 7);
        assert_eq!(registry.opportunities.categories.len(), 8);
        assert_eq!(registry.simulation.scenarios.len(), 4);
        assert_eq!(registry.anomaly.rules.len(), 11);
    }

    #[test]
    fn unknown_market_falls_back_to_defaults() {
        let registry = FormulaRegistry::default();
        let rules = registry.market_rules("zz");
        assert_eq!(rules.title.char_limit, 30);
    }

    #[test]
    fn unknown_category_gets_empty_vocabulary() {
        let registry = FormulaRegistry::default();
        let vocab = registry.category_vocabulary("no-such-category");
        assert!(vocab.defining.is_empty());
        assert!(vocab.must_have.is_empty());
    }
}
