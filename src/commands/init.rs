//! `asomap init`: write the built-in default registry to disk

use std::fs;
use std::path::Path;

use anyhow::bail;

use crate::registry::FormulaRegistry;

pub fn run(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists; pass --force to overwrite",
            path.display()
        );
    }
    let registry = FormulaRegistry::default();
    let json = serde_json::to_string_pretty(&registry)?;
    fs::write(path, json)?;
    println!("Wrote default registry v{} to {}", registry.version, path.display());
    Ok(())
}
