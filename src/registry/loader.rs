//! Registry document loading.
//!
//! A registry source is a JSON, YAML, or TOML document selected by file
//! extension. Parsing and validation happen before the registry is handed
//! to any scorer; a document that parses but fails validation is rejected
//! with the full violation list.

use std::fs;
use std::path::Path;

use crate::core::{EngineError, Result};

use super::{validate, FormulaRegistry};

/// Supported registry document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryFormat {
    Json,
    Yaml,
    Toml,
}

impl RegistryFormat {
    /// Detect format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(RegistryFormat::Json),
            Some("yaml") | Some("yml") => Ok(RegistryFormat::Yaml),
            Some("toml") => Ok(RegistryFormat::Toml),
            other => Err(EngineError::config(format!(
                "unsupported registry format '{}' for {}",
                other.unwrap_or("<none>"),
                path.display()
            ))),
        }
    }
}

/// Parse a registry document without validating it
pub fn parse_document(contents: &str, format: RegistryFormat) -> Result<FormulaRegistry> {
    match format {
        RegistryFormat::Json => {
            serde_json::from_str(contents).map_err(|e| EngineError::Parse(e.to_string()))
        }
        RegistryFormat::Yaml => {
            serde_yaml::from_str(contents).map_err(|e| EngineError::Parse(e.to_string()))
        }
        RegistryFormat::Toml => {
            toml::from_str(contents).map_err(|e| EngineError::Parse(e.to_string()))
        }
    }
}

/// Load and validate a registry from a file.
///
/// Fails with a configuration error carrying every accumulated violation
/// if the document is structurally incomplete or internally inconsistent.
pub fn load(path: &Path) -> Result<FormulaRegistry> {
    let format = RegistryFormat::from_path(path)?;
    let contents = fs::read_to_string(path)?;
    let registry = parse_document(&contents, format)?;

    let violations = validate(&registry);
    if !violations.is_empty() {
        return Err(EngineError::from_violations(&violations));
    }

    log::debug!(
        "loaded registry v{} from {} ({} categories, {} markets)",
        registry.version,
        path.display(),
        registry.categories.len(),
        registry.markets.len()
    );
    Ok(registry)
}
