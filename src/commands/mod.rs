//! CLI command handlers

pub mod audit;
pub mod init;
pub mod intel;
pub mod validate;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::io::{create_writer, AuditOutput, OutputFormat};
use crate::registry::{self, FormulaRegistry};

/// Load a registry from a path, or fall back to the validated built-in
/// default set
pub(crate) fn load_registry(path: Option<&Path>) -> anyhow::Result<FormulaRegistry> {
    match path {
        Some(path) => registry::load(path)
            .with_context(|| format!("failed to load registry from {}", path.display())),
        None => {
            log::debug!("no registry supplied, using built-in defaults");
            Ok(FormulaRegistry::default().validated()?)
        }
    }
}

/// Write an output envelope to a file or stdout in the chosen format
pub(crate) fn write_output(
    output: &AuditOutput,
    format: OutputFormat,
    destination: Option<&PathBuf>,
) -> anyhow::Result<()> {
    let sink: Box<dyn Write> = match destination {
        Some(path) => Box::new(
            fs::File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?,
        ),
        None => Box::new(std::io::stdout()),
    };
    create_writer(sink, format).write_output(output)
}
