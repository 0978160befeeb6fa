//! Common type definitions used across the engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::score::Score0To100;

/// Metadata field a token or limit applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceField {
    Title,
    Subtitle,
    Description,
}

impl SourceField {
    pub const ALL: [SourceField; 3] = [
        SourceField::Title,
        SourceField::Subtitle,
        SourceField::Description,
    ];

    /// Get the display name for this field
    pub fn display_name(&self) -> &'static str {
        match self {
            SourceField::Title => "title",
            SourceField::Subtitle => "subtitle",
            SourceField::Description => "description",
        }
    }
}

/// Search-intent bucket for a token or combo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentClass {
    Informational,
    Commercial,
    Transactional,
}

/// The seven audit dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    IntentCoverage,
    KeywordCoverage,
    ComboQuality,
    DiscoveryCoverage,
    Relevance,
    Structure,
    BrandBalance,
}

impl Dimension {
    pub const ALL: [Dimension; 7] = [
        Dimension::IntentCoverage,
        Dimension::KeywordCoverage,
        Dimension::ComboQuality,
        Dimension::DiscoveryCoverage,
        Dimension::Relevance,
        Dimension::Structure,
        Dimension::BrandBalance,
    ];

    /// Snake-case key used in registry documents and field paths
    pub fn key(&self) -> &'static str {
        match self {
            Dimension::IntentCoverage => "intent_coverage",
            Dimension::KeywordCoverage => "keyword_coverage",
            Dimension::ComboQuality => "combo_quality",
            Dimension::DiscoveryCoverage => "discovery_coverage",
            Dimension::Relevance => "relevance",
            Dimension::Structure => "structure",
            Dimension::BrandBalance => "brand_balance",
        }
    }

    /// Get the display name for this dimension
    pub fn display_name(&self) -> &'static str {
        match self {
            Dimension::IntentCoverage => "Intent Coverage",
            Dimension::KeywordCoverage => "Keyword Coverage",
            Dimension::ComboQuality => "Combo Quality",
            Dimension::DiscoveryCoverage => "Discovery Coverage",
            Dimension::Relevance => "Relevance",
            Dimension::Structure => "Structure",
            Dimension::BrandBalance => "Brand Balance",
        }
    }
}

/// Severity band for a dimension gap
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Minor,
    Moderate,
    Significant,
    Critical,
}

impl Severity {
    pub fn display_name(&self) -> &'static str {
        match self {
            Severity::Minor => "Minor",
            Severity::Moderate => "Moderate",
            Severity::Significant => "Significant",
            Severity::Critical => "Critical",
        }
    }
}

/// Volatility classification for a KPI series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolatilityClass {
    Stable,
    Moderate,
    Volatile,
}

impl VolatilityClass {
    pub fn display_name(&self) -> &'static str {
        match self {
            VolatilityClass::Stable => "stable",
            VolatilityClass::Moderate => "moderate",
            VolatilityClass::Volatile => "volatile",
        }
    }
}

/// Input unit for one audit: raw listing metadata plus its context.
///
/// Constructed per audit call and never persisted by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataDocument {
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub description: String,
    /// Vertical identifier used to select the category vocabulary
    pub category: String,
    /// Locale/region code used to select market rules
    pub market: String,
    /// Strings identifying the app's own brand forms
    #[serde(default)]
    pub brand_names: Vec<String>,
}

impl MetadataDocument {
    /// Raw text of one field
    pub fn field_text(&self, field: SourceField) -> &str {
        match field {
            SourceField::Title => &self.title,
            SourceField::Subtitle => &self.subtitle,
            SourceField::Description => &self.description,
        }
    }
}

/// A single word extracted from metadata text, classified for relevance
/// and intent. Produced fresh per audit, never shared across documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub source_field: SourceField,
    /// Zero-based position within the source field's token sequence
    pub position: usize,
    /// 0 = generic filler, 3 = category-defining. Unseen terms are class 1.
    pub relevance_class: u8,
    pub intent: Option<IntentClass>,
    pub is_brand: bool,
}

/// An ordered 2-3 token phrase derived from adjacent tokens in one field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combo {
    pub tokens: Vec<String>,
    pub source_field: SourceField,
    /// Position of the first member token within its field
    pub start: usize,
    /// Mean relevance class of the member tokens, on the 0-3 scale
    pub aggregate_relevance: f64,
    pub intent: Option<IntentClass>,
    /// True when every member is a registry filler or modifier word
    pub is_generic: bool,
}

impl Combo {
    pub fn phrase(&self) -> String {
        self.tokens.join(" ")
    }
}

/// Score, gap, and severity for one audit dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionScore {
    pub dimension: Dimension,
    pub score: f64,
    pub gap: f64,
    pub severity: Severity,
    /// The tokens or phrases that drove the score, for traceability
    pub explanation_tokens: Vec<String>,
}

impl DimensionScore {
    /// Build a dimension score from a clamped value; gap is derived, never
    /// stored independently.
    pub fn new(
        dimension: Dimension,
        score: Score0To100,
        severity: Severity,
        explanation_tokens: Vec<String>,
    ) -> Self {
        Self {
            dimension,
            score: score.value(),
            gap: score.gap(),
            severity,
            explanation_tokens,
        }
    }
}

/// Full audit result for one metadata document. Immutable once returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    pub category: String,
    pub market: String,
    pub engine_version: String,
    pub registry_version: String,
    /// Weighted aggregate of the seven dimensions per registry weights
    pub overall_score: f64,
    /// One entry per dimension, in registry declaration order
    pub dimensions: Vec<DimensionScore>,
    /// Every token produced by the tokenizer, none dropped
    pub tokens: Vec<Token>,
}

impl AuditReport {
    /// Look up one dimension's score
    pub fn dimension(&self, dimension: Dimension) -> Option<&DimensionScore> {
        self.dimensions.iter().find(|d| d.dimension == dimension)
    }
}

/// One observation in a KPI series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

/// Ordered sequence of observations for one metric. The engine reads it,
/// never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSeries {
    pub metric: String,
    pub points: Vec<TimeSeriesPoint>,
}

impl KpiSeries {
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.value)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Volatility measurement for one KPI series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StabilityScore {
    pub metric: String,
    pub coefficient_of_variation: f64,
    pub classification: VolatilityClass,
    pub sample_size: usize,
}

/// One ranked improvement opportunity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpportunityItem {
    /// Registry opportunity category id
    pub category: String,
    pub current_value: f64,
    pub gap_to_target: f64,
    pub severity: Severity,
    /// Monotonic in gap size and volatility; higher ranks first
    pub priority: f64,
    /// 1-based position after ranking
    pub rank: usize,
    /// Templated action selected by (category, severity)
    pub recommended_action: String,
}

/// Projection of one improvement scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub scenario: String,
    pub metric: String,
    pub current_value: f64,
    pub input_delta: f64,
    pub projected_outcome: f64,
    /// (low, high) band around the projection, present when a historical
    /// series supplied a volatility classification
    pub confidence_band: Option<(f64, f64)>,
}

/// Contextual signals accompanying an observed metric delta
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalySignals {
    pub metric: String,
    /// Observed change, in percent of the prior value
    pub delta_pct: f64,
    #[serde(default)]
    pub metadata_changed: bool,
    #[serde(default)]
    pub competitor_activity: bool,
    #[serde(default)]
    pub seasonal_period: bool,
    #[serde(default)]
    pub platform_update: bool,
    /// Consecutive declining observations leading up to this delta
    #[serde(default)]
    pub consecutive_declines: u32,
    #[serde(default)]
    pub volatility: Option<VolatilityClass>,
}

/// Result of matching an observed delta against the registry rule list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyAttribution {
    pub metric: String,
    pub observed_delta: f64,
    /// First matching rule id in declared order; `None` means unattributed
    pub matched_rule: Option<String>,
    pub explanation: String,
    pub confidence: f64,
}

/// Everything the intelligence layer produces for one app/category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct IntelligenceBundle {
    pub stability: Vec<StabilityScore>,
    pub opportunities: Vec<OpportunityItem>,
    pub simulations: Vec<SimulationResult>,
    pub attributions: Vec<AnomalyAttribution>,
}
