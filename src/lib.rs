//! Deterministic app-store metadata scoring and intelligence engine.
//!
//! Every score is a pure function of the metadata document and a versioned
//! formula registry. Same inputs, same registry, same output.

pub mod analysis;
pub mod cli;
pub mod commands;
pub mod core;
pub mod intelligence;
pub mod io;
pub mod registry;
pub mod scoring;

pub use crate::core::errors::{EngineError, Result};
pub use crate::core::score::Score0To100;
pub use crate::registry::FormulaRegistry;
pub use crate::scoring::{audit, ENGINE_VERSION};
