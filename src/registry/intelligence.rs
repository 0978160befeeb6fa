//! Intelligence-layer configuration: stability thresholds, opportunity
//! categories, simulation elasticities, and the ordered anomaly rule list

use serde::{Deserialize, Serialize};

use crate::core::types::{AnomalySignals, Dimension, Severity, VolatilityClass};

/// Coefficient-of-variation thresholds for stability classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StabilityThresholds {
    /// Fewer points than this is an `InsufficientDataError`
    #[serde(default = "default_min_sample_size")]
    pub min_sample_size: usize,
    /// CV strictly below this is stable
    #[serde(default = "default_stable_max_cv")]
    pub stable_max_cv: f64,
    /// CV at or below this (and not stable) is moderate; above is volatile
    #[serde(default = "default_moderate_max_cv")]
    pub moderate_max_cv: f64,
}

impl Default for StabilityThresholds {
    fn default() -> Self {
        Self {
            min_sample_size: default_min_sample_size(),
            stable_max_cv: default_stable_max_cv(),
            moderate_max_cv: default_moderate_max_cv(),
        }
    }
}

fn default_min_sample_size() -> usize {
    2
}
fn default_stable_max_cv() -> f64 {
    0.15
}
fn default_moderate_max_cv() -> f64 {
    0.35
}

/// Action templates keyed by severity for one opportunity category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionTemplates {
    pub critical: String,
    pub significant: String,
    pub moderate: String,
    pub minor: String,
}

impl ActionTemplates {
    pub fn for_severity(&self, severity: Severity) -> &str {
        match severity {
            Severity::Critical => &self.critical,
            Severity::Significant => &self.significant,
            Severity::Moderate => &self.moderate,
            Severity::Minor => &self.minor,
        }
    }
}

/// One of the registry's opportunity categories. Declaration order in the
/// registry is the tie-break order for ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpportunityCategory {
    pub id: String,
    /// Audit dimension this category draws its gap from; `None` means the
    /// category is driven by stability instead
    pub dimension: Option<Dimension>,
    pub actions: ActionTemplates,
}

/// Per-volatility-class points fed into the priority formula
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolatilityPoints {
    #[serde(default = "default_stable_points")]
    pub stable: f64,
    #[serde(default = "default_moderate_points")]
    pub moderate: f64,
    #[serde(default = "default_volatile_points")]
    pub volatile: f64,
}

impl Default for VolatilityPoints {
    fn default() -> Self {
        Self {
            stable: default_stable_points(),
            moderate: default_moderate_points(),
            volatile: default_volatile_points(),
        }
    }
}

impl VolatilityPoints {
    pub fn points(&self, class: VolatilityClass) -> f64 {
        match class {
            VolatilityClass::Stable => self.stable,
            VolatilityClass::Moderate => self.moderate,
            VolatilityClass::Volatile => self.volatile,
        }
    }
}

fn default_stable_points() -> f64 {
    0.0
}
fn default_moderate_points() -> f64 {
    0.5
}
fn default_volatile_points() -> f64 {
    1.0
}

/// Weighted-sum priority: `gap_weight * (gap / 100) + volatility_weight *
/// volatility_points[class]`. Monotonic in both inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpportunityPriority {
    #[serde(default = "default_gap_weight")]
    pub gap_weight: f64,
    #[serde(default = "default_volatility_weight")]
    pub volatility_weight: f64,
    #[serde(default)]
    pub volatility_points: VolatilityPoints,
}

impl Default for OpportunityPriority {
    fn default() -> Self {
        Self {
            gap_weight: default_gap_weight(),
            volatility_weight: default_volatility_weight(),
            volatility_points: VolatilityPoints::default(),
        }
    }
}

fn default_gap_weight() -> f64 {
    0.7
}
fn default_volatility_weight() -> f64 {
    0.3
}

/// Opportunity map configuration: the 8 categories plus the priority
/// combination function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpportunityRules {
    #[serde(default = "default_opportunity_categories")]
    pub categories: Vec<OpportunityCategory>,
    #[serde(default)]
    pub priority: OpportunityPriority,
}

impl Default for OpportunityRules {
    fn default() -> Self {
        Self {
            categories: default_opportunity_categories(),
            priority: OpportunityPriority::default(),
        }
    }
}

fn templates(base: &str) -> ActionTemplates {
    ActionTemplates {
        critical: format!("Rework {base} before the next release"),
        significant: format!("Prioritize {base} in the next metadata iteration"),
        moderate: format!("Schedule {base} improvements"),
        minor: format!("Monitor {base}; no action required"),
    }
}

fn default_opportunity_categories() -> Vec<OpportunityCategory> {
    vec![
        OpportunityCategory {
            id: "intent-alignment".to_string(),
            dimension: Some(Dimension::IntentCoverage),
            actions: templates("search-intent balance (add transactional and commercial terms)"),
        },
        OpportunityCategory {
            id: "keyword-breadth".to_string(),
            dimension: Some(Dimension::KeywordCoverage),
            actions: templates("must-have keyword coverage"),
        },
        OpportunityCategory {
            id: "phrase-quality".to_string(),
            dimension: Some(Dimension::ComboQuality),
            actions: templates("multi-word phrase quality (replace filler combos)"),
        },
        OpportunityCategory {
            id: "discovery-reach".to_string(),
            dimension: Some(Dimension::DiscoveryCoverage),
            actions: templates("non-branded discovery coverage"),
        },
        OpportunityCategory {
            id: "relevance-depth".to_string(),
            dimension: Some(Dimension::Relevance),
            actions: templates("category-term relevance"),
        },
        OpportunityCategory {
            id: "structure-fit".to_string(),
            dimension: Some(Dimension::Structure),
            actions: templates("field length and character utilization"),
        },
        OpportunityCategory {
            id: "brand-presence".to_string(),
            dimension: Some(Dimension::BrandBalance),
            actions: templates("brand-token ratio"),
        },
        OpportunityCategory {
            id: "stability-risk".to_string(),
            dimension: None,
            actions: templates("KPI volatility (investigate swings before optimizing)"),
        },
    ]
}

/// Elasticity and target metric for one simulation scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioRules {
    pub name: String,
    pub metric: String,
    /// Projected change per unit of input delta
    pub elasticity: f64,
}

/// Confidence-band half-width multipliers per volatility class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandMultipliers {
    #[serde(default = "default_stable_band")]
    pub stable: f64,
    #[serde(default = "default_moderate_band")]
    pub moderate: f64,
    #[serde(default = "default_volatile_band")]
    pub volatile: f64,
}

impl Default for BandMultipliers {
    fn default() -> Self {
        Self {
            stable: default_stable_band(),
            moderate: default_moderate_band(),
            volatile: default_volatile_band(),
        }
    }
}

impl BandMultipliers {
    pub fn multiplier(&self, class: VolatilityClass) -> f64 {
        match class {
            VolatilityClass::Stable => self.stable,
            VolatilityClass::Moderate => self.moderate,
            VolatilityClass::Volatile => self.volatile,
        }
    }
}

fn default_stable_band() -> f64 {
    0.05
}
fn default_moderate_band() -> f64 {
    0.15
}
fn default_volatile_band() -> f64 {
    0.30
}

/// Outcome simulation configuration: the 4 improvement archetypes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRules {
    #[serde(default = "default_scenarios")]
    pub scenarios: Vec<ScenarioRules>,
    #[serde(default)]
    pub band_multipliers: BandMultipliers,
}

impl Default for SimulationRules {
    fn default() -> Self {
        Self {
            scenarios: default_scenarios(),
            band_multipliers: BandMultipliers::default(),
        }
    }
}

impl SimulationRules {
    pub fn scenario(&self, name: &str) -> Option<&ScenarioRules> {
        self.scenarios.iter().find(|s| s.name == name)
    }
}

fn default_scenarios() -> Vec<ScenarioRules> {
    vec![
        ScenarioRules {
            name: "keyword-expansion".to_string(),
            metric: "impressions".to_string(),
            elasticity: 1.8,
        },
        ScenarioRules {
            name: "brand-rebalance".to_string(),
            metric: "organic_installs".to_string(),
            elasticity: 1.2,
        },
        ScenarioRules {
            name: "structure-fill".to_string(),
            metric: "conversion_rate".to_string(),
            elasticity: 0.6,
        },
        ScenarioRules {
            name: "intent-tuning".to_string(),
            metric: "tap_through_rate".to_string(),
            elasticity: 0.9,
        },
    ]
}

/// Trigger predicate for one anomaly rule. Tagged variants keep the rule
/// table data-driven while the match itself stays an ordered list scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Trigger {
    /// Delta at or below a (negative) threshold
    DeltaBelow { threshold: f64 },
    /// Delta at or above a (positive) threshold
    DeltaAbove { threshold: f64 },
    /// Absolute delta strictly below a threshold
    MagnitudeBelow { threshold: f64 },
    /// Drop coinciding with a metadata change
    DropWithMetadataChange { threshold: f64 },
    /// Rise coinciding with a metadata change
    RiseWithMetadataChange { threshold: f64 },
    /// Drop coinciding with competitor activity
    DropWithCompetitorActivity { threshold: f64 },
    /// Rise during a declared seasonal period
    SeasonalRise { threshold: f64 },
    /// Drop during a declared seasonal period
    SeasonalDip { threshold: f64 },
    /// Any shift at or above a magnitude, coinciding with a platform update
    PlatformUpdateShift { threshold: f64 },
    /// Negative delta continuing a run of declines
    SustainedDecline { min_consecutive: u32 },
    /// Delta within the noise floor of an already-volatile series
    WithinHistoricalNoise { max_magnitude: f64 },
}

impl Trigger {
    /// Whether this trigger fires for the observed signals
    pub fn matches(&self, signals: &AnomalySignals) -> bool {
        let delta = signals.delta_pct;
        match self {
            Trigger::DeltaBelow { threshold } => delta <= *threshold,
            Trigger::DeltaAbove { threshold } => delta >= *threshold,
            Trigger::MagnitudeBelow { threshold } => delta.abs() < *threshold,
            Trigger::DropWithMetadataChange { threshold } => {
                signals.metadata_changed && delta <= -threshold
            }
            Trigger::RiseWithMetadataChange { threshold } => {
                signals.metadata_changed && delta >= *threshold
            }
            Trigger::DropWithCompetitorActivity { threshold } => {
                signals.competitor_activity && delta <= -threshold
            }
            Trigger::SeasonalRise { threshold } => signals.seasonal_period && delta >= *threshold,
            Trigger::SeasonalDip { threshold } => signals.seasonal_period && delta <= -threshold,
            Trigger::PlatformUpdateShift { threshold } => {
                signals.platform_update && delta.abs() >= *threshold
            }
            Trigger::SustainedDecline { min_consecutive } => {
                delta < 0.0 && signals.consecutive_declines >= *min_consecutive
            }
            Trigger::WithinHistoricalNoise { max_magnitude } => {
                signals.volatility == Some(VolatilityClass::Volatile)
                    && delta.abs() <= *max_magnitude
            }
        }
    }
}

/// One (predicate, template, confidence) anomaly rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyRule {
    pub id: String,
    pub trigger: Trigger,
    /// Template with `{metric}` and `{delta}` placeholders
    pub explanation: String,
    pub confidence: f64,
}

/// Ordered anomaly rule list. Order is load-bearing: evaluation is
/// first-match-wins in this exact order, and reordering is a registry
/// version change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyRules {
    #[serde(default = "default_anomaly_rules")]
    pub rules: Vec<AnomalyRule>,
}

impl Default for AnomalyRules {
    fn default() -> Self {
        Self {
            rules: default_anomaly_rules(),
        }
    }
}

fn default_anomaly_rules() -> Vec<AnomalyRule> {
    vec![
        AnomalyRule {
            id: "metadata-change-drop".to_string(),
            trigger: Trigger::DropWithMetadataChange { threshold: 10.0 },
            explanation: "{metric} fell {delta} after a metadata update; the new listing copy is the most likely cause".to_string(),
            confidence: 0.90,
        },
        AnomalyRule {
            id: "metadata-change-lift".to_string(),
            trigger: Trigger::RiseWithMetadataChange { threshold: 10.0 },
            explanation: "{metric} rose {delta} after a metadata update; the new listing copy is likely working".to_string(),
            confidence: 0.85,
        },
        AnomalyRule {
            id: "platform-update-shift".to_string(),
            trigger: Trigger::PlatformUpdateShift { threshold: 15.0 },
            explanation: "{metric} moved {delta} alongside a store platform update; ranking algorithm changes are the most likely cause".to_string(),
            confidence: 0.80,
        },
        AnomalyRule {
            id: "seasonal-spike".to_string(),
            trigger: Trigger::SeasonalRise { threshold: 12.0 },
            explanation: "{metric} rose {delta} during a seasonal period; expect reversion when the season ends".to_string(),
            confidence: 0.75,
        },
        AnomalyRule {
            id: "seasonal-dip".to_string(),
            trigger: Trigger::SeasonalDip { threshold: 12.0 },
            explanation: "{metric} fell {delta} during a seasonal period; expect recovery when the season ends".to_string(),
            confidence: 0.75,
        },
        AnomalyRule {
            id: "competitor-pressure".to_string(),
            trigger: Trigger::DropWithCompetitorActivity { threshold: 8.0 },
            explanation: "{metric} fell {delta} while a competitor was active in the category; share is likely shifting".to_string(),
            confidence: 0.70,
        },
        AnomalyRule {
            id: "sustained-decline".to_string(),
            trigger: Trigger::SustainedDecline { min_consecutive: 3 },
            explanation: "{metric} fell {delta}, extending a multi-period decline; this is a trend, not a one-off".to_string(),
            confidence: 0.65,
        },
        AnomalyRule {
            id: "volatility-noise".to_string(),
            trigger: Trigger::WithinHistoricalNoise { max_magnitude: 20.0 },
            explanation: "{metric} moved {delta}, within the normal swing range of this volatile series".to_string(),
            confidence: 0.60,
        },
        AnomalyRule {
            id: "sharp-drop".to_string(),
            trigger: Trigger::DeltaBelow { threshold: -25.0 },
            explanation: "{metric} fell {delta} with no matching context signal; manual investigation needed".to_string(),
            confidence: 0.50,
        },
        AnomalyRule {
            id: "sharp-rise".to_string(),
            trigger: Trigger::DeltaAbove { threshold: 25.0 },
            explanation: "{metric} rose {delta} with no matching context signal; verify tracking before celebrating".to_string(),
            confidence: 0.50,
        },
        AnomalyRule {
            id: "minor-fluctuation".to_string(),
            trigger: Trigger::MagnitudeBelow { threshold: 5.0 },
            explanation: "{metric} moved {delta}, within normal day-to-day fluctuation".to_string(),
            confidence: 0.55,
        },
    ]
}
