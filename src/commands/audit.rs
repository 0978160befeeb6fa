//! `asomap audit`: score one or many metadata documents

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use rayon::prelude::*;

use crate::core::types::{AuditReport, MetadataDocument};
use crate::io::{AuditOutput, OutputFormat};
use crate::scoring::audit;

pub struct AuditConfig {
    pub input: PathBuf,
    pub registry: Option<PathBuf>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

pub fn run(config: AuditConfig) -> anyhow::Result<()> {
    let registry = super::load_registry(config.registry.as_deref())?;
    let documents = read_documents(&config.input)?;
    log::info!(
        "auditing {} document(s) against registry v{}",
        documents.len(),
        registry.version
    );

    // Audits are pure functions over the shared read-only registry, so a
    // batch parallelizes with no synchronization. Input order is kept.
    let reports: Vec<AuditReport> = documents
        .par_iter()
        .map(|document| audit(document, &registry))
        .collect();

    let output = AuditOutput {
        reports,
        intelligence: None,
    };
    super::write_output(&output, config.format, config.output.as_ref())
}

/// Read one document or a JSON array of documents
fn read_documents(path: &PathBuf) -> anyhow::Result<Vec<MetadataDocument>> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let documents = match serde_json::from_str::<Vec<MetadataDocument>>(&contents) {
        Ok(documents) => documents,
        Err(_) => vec![serde_json::from_str(&contents)
            .with_context(|| format!("{} is not a metadata document or array", path.display()))?],
    };
    Ok(documents)
}
