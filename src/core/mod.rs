pub mod errors;
pub mod score;
pub mod types;

pub use errors::{EngineError, Result};
pub use score::Score0To100;
pub use types::{
    AnomalyAttribution, AnomalySignals, AuditReport, Combo, Dimension, DimensionScore,
    IntelligenceBundle, IntentClass, KpiSeries, MetadataDocument, OpportunityItem, Severity,
    SimulationResult, SourceField, StabilityScore, TimeSeriesPoint, Token, VolatilityClass,
};
