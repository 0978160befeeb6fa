//! `asomap validate-registry`: report every violation in a registry document

use std::fs;
use std::path::Path;

use anyhow::{bail, Context};

use crate::registry::{parse_document, validate, RegistryFormat};

pub fn run(path: &Path) -> anyhow::Result<()> {
    let format = RegistryFormat::from_path(path)?;
    let contents =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let registry = parse_document(&contents, format)?;

    let violations = validate(&registry);
    if violations.is_empty() {
        println!(
            "{}: registry v{} is valid ({} dimensions, {} anomaly rules)",
            path.display(),
            registry.version,
            registry.dimension_order.len(),
            registry.anomaly.rules.len()
        );
        return Ok(());
    }

    for violation in &violations {
        eprintln!("  {violation}");
    }
    bail!(
        "{}: registry failed validation with {} violation(s)",
        path.display(),
        violations.len()
    );
}
