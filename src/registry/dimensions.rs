//! Per-dimension configuration blocks for the formula registry
//!
//! Every numeric constant the dimension scorers consume lives here as a
//! named, serde-defaulted field, so a partial registry document still
//! deserializes to a complete structure.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::types::{Dimension, IntentClass};

/// Relative weight of each dimension in the overall audit score.
/// Must sum to `total` (validated at load).
///
/// When a registry document supplies a `weights` block it must list all
/// seven dimensions; a partial block is a parse failure, not a silent
/// default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionWeights {
    pub intent_coverage: f64,
    pub keyword_coverage: f64,
    pub combo_quality: f64,
    pub discovery_coverage: f64,
    pub relevance: f64,
    pub structure: f64,
    pub brand_balance: f64,
    /// Declared total the seven weights must sum to
    #[serde(default = "default_weight_total")]
    pub total: f64,
}

impl Default for DimensionWeights {
    fn default() -> Self {
        Self {
            intent_coverage: default_intent_weight(),
            keyword_coverage: default_keyword_weight(),
            combo_quality: default_combo_weight(),
            discovery_coverage: default_discovery_weight(),
            relevance: default_relevance_weight(),
            structure: default_structure_weight(),
            brand_balance: default_brand_weight(),
            total: default_weight_total(),
        }
    }
}

impl DimensionWeights {
    /// Weight for one dimension
    pub fn weight(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::IntentCoverage => self.intent_coverage,
            Dimension::KeywordCoverage => self.keyword_coverage,
            Dimension::ComboQuality => self.combo_quality,
            Dimension::DiscoveryCoverage => self.discovery_coverage,
            Dimension::Relevance => self.relevance,
            Dimension::Structure => self.structure,
            Dimension::BrandBalance => self.brand_balance,
        }
    }

    /// Sum of the seven declared weights
    pub fn sum(&self) -> f64 {
        Dimension::ALL.iter().map(|d| self.weight(*d)).sum()
    }
}

fn default_intent_weight() -> f64 {
    15.0
}
fn default_keyword_weight() -> f64 {
    20.0
}
fn default_combo_weight() -> f64 {
    10.0
}
fn default_discovery_weight() -> f64 {
    15.0
}
fn default_relevance_weight() -> f64 {
    20.0
}
fn default_structure_weight() -> f64 {
    10.0
}
fn default_brand_weight() -> f64 {
    10.0
}
fn default_weight_total() -> f64 {
    100.0
}

/// Gap boundaries for severity banding. Gaps at or above `critical_min`
/// are Critical, then Significant, then Moderate, then Minor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeverityBands {
    #[serde(default = "default_critical_min_gap")]
    pub critical_min: f64,
    #[serde(default = "default_significant_min_gap")]
    pub significant_min: f64,
    #[serde(default = "default_moderate_min_gap")]
    pub moderate_min: f64,
}

impl Default for SeverityBands {
    fn default() -> Self {
        Self {
            critical_min: default_critical_min_gap(),
            significant_min: default_significant_min_gap(),
            moderate_min: default_moderate_min_gap(),
        }
    }
}

fn default_critical_min_gap() -> f64 {
    40.0
}
fn default_significant_min_gap() -> f64 {
    25.0
}
fn default_moderate_min_gap() -> f64 {
    15.0
}

/// Character and word-count rules for one metadata field in one market
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRules {
    pub char_limit: usize,
    pub min_words: usize,
    pub max_words: usize,
}

/// Market-specific tokenization and structure rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketRules {
    /// Dropped during tokenization; never scored
    #[serde(default = "default_stop_words")]
    pub stop_words: Vec<String>,
    #[serde(default = "default_title_rules")]
    pub title: FieldRules,
    #[serde(default = "default_subtitle_rules")]
    pub subtitle: FieldRules,
    #[serde(default = "default_description_rules")]
    pub description: FieldRules,
}

impl Default for MarketRules {
    fn default() -> Self {
        Self {
            stop_words: default_stop_words(),
            title: default_title_rules(),
            subtitle: default_subtitle_rules(),
            description: default_description_rules(),
        }
    }
}

impl MarketRules {
    pub fn field(&self, field: crate::core::types::SourceField) -> &FieldRules {
        use crate::core::types::SourceField;
        match field {
            SourceField::Title => &self.title,
            SourceField::Subtitle => &self.subtitle,
            SourceField::Description => &self.description,
        }
    }
}

fn default_stop_words() -> Vec<String> {
    ["the", "a", "an", "and", "or", "for", "to", "of", "with", "in", "on", "at", "by"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_title_rules() -> FieldRules {
    FieldRules {
        char_limit: 30,
        min_words: 2,
        max_words: 6,
    }
}

fn default_subtitle_rules() -> FieldRules {
    FieldRules {
        char_limit: 30,
        min_words: 2,
        max_words: 6,
    }
}

fn default_description_rules() -> FieldRules {
    FieldRules {
        char_limit: 4000,
        min_words: 50,
        max_words: 600,
    }
}

/// Importance tier of a must-have category keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportanceTier {
    High,
    Medium,
    Low,
}

/// Numeric weight of each importance tier in Keyword Coverage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierWeights {
    #[serde(default = "default_high_tier_weight")]
    pub high: f64,
    #[serde(default = "default_medium_tier_weight")]
    pub medium: f64,
    #[serde(default = "default_low_tier_weight")]
    pub low: f64,
}

impl Default for TierWeights {
    fn default() -> Self {
        Self {
            high: default_high_tier_weight(),
            medium: default_medium_tier_weight(),
            low: default_low_tier_weight(),
        }
    }
}

impl TierWeights {
    pub fn weight(&self, tier: ImportanceTier) -> f64 {
        match tier {
            ImportanceTier::High => self.high,
            ImportanceTier::Medium => self.medium,
            ImportanceTier::Low => self.low,
        }
    }
}

fn default_high_tier_weight() -> f64 {
    3.0
}
fn default_medium_tier_weight() -> f64 {
    2.0
}
fn default_low_tier_weight() -> f64 {
    1.0
}

/// One must-have keyword with its declared importance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MustHaveKeyword {
    pub term: String,
    pub tier: ImportanceTier,
}

/// Keyword vocabulary for one category vertical
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryVocabulary {
    /// Relevance class 3: terms that define the category
    #[serde(default)]
    pub defining: Vec<String>,
    /// Relevance class 2: terms that support the category
    #[serde(default)]
    pub supporting: Vec<String>,
    /// Coverage targets for the Keyword Coverage dimension
    #[serde(default)]
    pub must_have: Vec<MustHaveKeyword>,
}

/// Intent classification rules and the Intent Coverage formula inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentRules {
    #[serde(default = "default_informational_terms")]
    pub informational: Vec<String>,
    #[serde(default = "default_commercial_terms")]
    pub commercial: Vec<String>,
    #[serde(default = "default_transactional_terms")]
    pub transactional: Vec<String>,
    /// First-match order when a term appears in more than one list
    #[serde(default = "default_intent_priority")]
    pub priority: Vec<IntentClass>,
    /// Tokens per bucket required for full bucket credit
    #[serde(default = "default_min_presence")]
    pub min_presence: usize,
    /// Weight of each bucket's presence credit; the three sum to 100
    #[serde(default = "default_informational_presence_weight")]
    pub informational_weight: f64,
    #[serde(default = "default_commercial_presence_weight")]
    pub commercial_weight: f64,
    #[serde(default = "default_transactional_presence_weight")]
    pub transactional_weight: f64,
    /// Penalty multiplier applied to the bucket-share spread
    #[serde(default = "default_balance_penalty")]
    pub balance_penalty: f64,
    /// Hard cap on the dimension score when no transactional term exists
    #[serde(default = "default_missing_transactional_ceiling")]
    pub missing_transactional_ceiling: f64,
}

impl Default for IntentRules {
    fn default() -> Self {
        Self {
            informational: default_informational_terms(),
            commercial: default_commercial_terms(),
            transactional: default_transactional_terms(),
            priority: default_intent_priority(),
            min_presence: default_min_presence(),
            informational_weight: default_informational_presence_weight(),
            commercial_weight: default_commercial_presence_weight(),
            transactional_weight: default_transactional_presence_weight(),
            balance_penalty: default_balance_penalty(),
            missing_transactional_ceiling: default_missing_transactional_ceiling(),
        }
    }
}

impl IntentRules {
    /// Term list for one intent class
    pub fn terms(&self, class: IntentClass) -> &[String] {
        match class {
            IntentClass::Informational => &self.informational,
            IntentClass::Commercial => &self.commercial,
            IntentClass::Transactional => &self.transactional,
        }
    }

    /// Presence weight for one intent class
    pub fn weight(&self, class: IntentClass) -> f64 {
        match class {
            IntentClass::Informational => self.informational_weight,
            IntentClass::Commercial => self.commercial_weight,
            IntentClass::Transactional => self.transactional_weight,
        }
    }
}

fn default_informational_terms() -> Vec<String> {
    ["learn", "guide", "tips", "how", "lesson", "lessons", "tutorial", "practice", "training"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_commercial_terms() -> Vec<String> {
    ["best", "top", "premium", "pro", "plus", "deal", "deals", "compare", "review"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_transactional_terms() -> Vec<String> {
    ["free", "download", "install", "buy", "subscribe", "trial", "start", "try", "get"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_intent_priority() -> Vec<IntentClass> {
    vec![
        IntentClass::Transactional,
        IntentClass::Commercial,
        IntentClass::Informational,
    ]
}

fn default_min_presence() -> usize {
    2
}
fn default_informational_presence_weight() -> f64 {
    30.0
}
fn default_commercial_presence_weight() -> f64 {
    35.0
}
fn default_transactional_presence_weight() -> f64 {
    35.0
}
fn default_balance_penalty() -> f64 {
    20.0
}
fn default_missing_transactional_ceiling() -> f64 {
    35.0
}

/// Target band for the brand-token ratio, in percent of all tokens.
/// The score is 100 anywhere inside [min_pct, max_pct] and degrades
/// linearly with distance outside the band, reaching 0 at
/// `falloff_pct` points past either edge. The falloff is symmetric:
/// equal distance below min or above max scores the same.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandBand {
    #[serde(default = "default_brand_min_pct")]
    pub min_pct: f64,
    #[serde(default = "default_brand_max_pct")]
    pub max_pct: f64,
    #[serde(default = "default_brand_falloff_pct")]
    pub falloff_pct: f64,
}

impl Default for BrandBand {
    fn default() -> Self {
        Self {
            min_pct: default_brand_min_pct(),
            max_pct: default_brand_max_pct(),
            falloff_pct: default_brand_falloff_pct(),
        }
    }
}

fn default_brand_min_pct() -> f64 {
    8.0
}
fn default_brand_max_pct() -> f64 {
    18.0
}
fn default_brand_falloff_pct() -> f64 {
    25.0
}

/// Combo generation rules and the genericity word list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComboRules {
    #[serde(default = "default_combo_min_len")]
    pub min_len: usize,
    #[serde(default = "default_combo_max_len")]
    pub max_len: usize,
    /// Modifier words that, together with the filler list, mark a combo
    /// generic when they are all it contains
    #[serde(default = "default_modifier_terms")]
    pub modifier_terms: Vec<String>,
}

impl Default for ComboRules {
    fn default() -> Self {
        Self {
            min_len: default_combo_min_len(),
            max_len: default_combo_max_len(),
            modifier_terms: default_modifier_terms(),
        }
    }
}

fn default_combo_min_len() -> usize {
    2
}
fn default_combo_max_len() -> usize {
    3
}

fn default_modifier_terms() -> Vec<String> {
    ["free", "easy", "fast", "fun", "your", "daily", "great", "simple", "quick"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Structure dimension inputs: the character-utilization target band and
/// the blend between utilization and word-count checks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureRules {
    /// Utilization at or above this fraction of the limit earns full score
    #[serde(default = "default_target_low")]
    pub target_low: f64,
    /// Utilization above this fraction starts to penalize
    #[serde(default = "default_target_high")]
    pub target_high: f64,
    #[serde(default = "default_utilization_weight")]
    pub utilization_weight: f64,
    #[serde(default = "default_word_count_weight")]
    pub word_count_weight: f64,
}

impl Default for StructureRules {
    fn default() -> Self {
        Self {
            target_low: default_target_low(),
            target_high: default_target_high(),
            utilization_weight: default_utilization_weight(),
            word_count_weight: default_word_count_weight(),
        }
    }
}

fn default_target_low() -> f64 {
    0.80
}
fn default_target_high() -> f64 {
    0.95
}
fn default_utilization_weight() -> f64 {
    0.7
}
fn default_word_count_weight() -> f64 {
    0.3
}

/// Field weighting for the Relevance dimension: title tokens count for
/// more than description tokens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelevanceRules {
    #[serde(default = "default_title_field_weight")]
    pub title_weight: f64,
    #[serde(default = "default_subtitle_field_weight")]
    pub subtitle_weight: f64,
    #[serde(default = "default_description_field_weight")]
    pub description_weight: f64,
}

impl Default for RelevanceRules {
    fn default() -> Self {
        Self {
            title_weight: default_title_field_weight(),
            subtitle_weight: default_subtitle_field_weight(),
            description_weight: default_description_field_weight(),
        }
    }
}

impl RelevanceRules {
    pub fn field_weight(&self, field: crate::core::types::SourceField) -> f64 {
        use crate::core::types::SourceField;
        match field {
            SourceField::Title => self.title_weight,
            SourceField::Subtitle => self.subtitle_weight,
            SourceField::Description => self.description_weight,
        }
    }
}

fn default_title_field_weight() -> f64 {
    3.0
}
fn default_subtitle_field_weight() -> f64 {
    2.0
}
fn default_description_field_weight() -> f64 {
    1.0
}

/// Default market table: US rules only; other markets fall back to
/// `MarketRules::default()` with a debug log.
pub fn default_markets() -> BTreeMap<String, MarketRules> {
    let mut markets = BTreeMap::new();
    markets.insert("us".to_string(), MarketRules::default());
    markets
}

/// Default category vocabularies shipped with the built-in registry
pub fn default_categories() -> BTreeMap<String, CategoryVocabulary> {
    let mut categories = BTreeMap::new();
    categories.insert(
        "language_learning".to_string(),
        CategoryVocabulary {
            defining: ["language", "vocabulary", "grammar", "fluency", "bilingual"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            supporting: ["speak", "words", "phrases", "conversation", "pronunciation", "lessons"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            must_have: vec![
                MustHaveKeyword {
                    term: "language".to_string(),
                    tier: ImportanceTier::High,
                },
                MustHaveKeyword {
                    term: "learn".to_string(),
                    tier: ImportanceTier::High,
                },
                MustHaveKeyword {
                    term: "vocabulary".to_string(),
                    tier: ImportanceTier::Medium,
                },
                MustHaveKeyword {
                    term: "speak".to_string(),
                    tier: ImportanceTier::Medium,
                },
                MustHaveKeyword {
                    term: "grammar".to_string(),
                    tier: ImportanceTier::Low,
                },
            ],
        },
    );
    categories.insert(
        "fitness".to_string(),
        CategoryVocabulary {
            defining: ["workout", "fitness", "exercise", "gym", "cardio"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            supporting: ["strength", "muscle", "yoga", "running", "health", "calories"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            must_have: vec![
                MustHaveKeyword {
                    term: "workout".to_string(),
                    tier: ImportanceTier::High,
                },
                MustHaveKeyword {
                    term: "fitness".to_string(),
                    tier: ImportanceTier::High,
                },
                MustHaveKeyword {
                    term: "exercise".to_string(),
                    tier: ImportanceTier::Medium,
                },
                MustHaveKeyword {
                    term: "health".to_string(),
                    tier: ImportanceTier::Low,
                },
            ],
        },
    );
    categories
}

/// Relevance class 0 word list: generic filler that earns no topical
/// credit in any category
pub fn default_filler_terms() -> Vec<String> {
    ["best", "top", "new", "great", "good", "amazing", "ultimate", "perfect", "awesome"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Suffix-strip stemming rules shared by relevance classing and keyword
/// matching
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StemmingRules {
    /// Suffixes stripped (longest first)
    #[serde(default = "default_stem_suffixes")]
    pub suffixes: Vec<String>,
    /// Stripping a suffix must leave at least this many characters
    #[serde(default = "default_min_stem_len")]
    pub min_stem_len: usize,
    /// Two stems belong to the same word family when the shorter is a
    /// prefix of the longer and the length difference is at most this
    #[serde(default = "default_max_prefix_diff")]
    pub max_prefix_diff: usize,
}

impl Default for StemmingRules {
    fn default() -> Self {
        Self {
            suffixes: default_stem_suffixes(),
            min_stem_len: default_min_stem_len(),
            max_prefix_diff: default_max_prefix_diff(),
        }
    }
}

fn default_stem_suffixes() -> Vec<String> {
    ["ing", "ers", "ies", "es", "ed", "er", "s"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_min_stem_len() -> usize {
    3
}
fn default_max_prefix_diff() -> usize {
    2
}
