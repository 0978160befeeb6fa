//! `asomap intel`: build the intelligence bundle for an audit report

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::core::types::{AnomalySignals, AuditReport, KpiSeries};
use crate::intelligence::{build_bundle, IntelligenceRequest, ScenarioRequest};
use crate::io::{AuditOutput, OutputFormat};

pub struct IntelConfig {
    pub report: PathBuf,
    pub series: Vec<PathBuf>,
    pub scenarios: Option<PathBuf>,
    pub signals: Option<PathBuf>,
    pub registry: Option<PathBuf>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

pub fn run(config: IntelConfig) -> anyhow::Result<()> {
    let registry = super::load_registry(config.registry.as_deref())?;
    let report = read_report(&config.report)?;

    let mut series = Vec::new();
    for path in &config.series {
        series.extend(read_series(path)?);
    }
    let scenarios: Vec<ScenarioRequest> = match &config.scenarios {
        Some(path) => read_json(path)?,
        None => Vec::new(),
    };
    let signals: Vec<AnomalySignals> = match &config.signals {
        Some(path) => read_json(path)?,
        None => Vec::new(),
    };

    let request = IntelligenceRequest {
        series,
        scenarios,
        signals,
    };
    let bundle = build_bundle(&report, &request, &registry)?;

    let output = AuditOutput {
        reports: vec![report],
        intelligence: Some(bundle),
    };
    super::write_output(&output, config.format, config.output.as_ref())
}

/// Read either a bare audit report or the output envelope `audit` writes,
/// taking the first report from an envelope
fn read_report(path: &Path) -> anyhow::Result<AuditReport> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    if let Ok(report) = serde_json::from_str::<AuditReport>(&contents) {
        return Ok(report);
    }
    let envelope: AuditOutput = serde_json::from_str(&contents)
        .with_context(|| format!("{} is not an audit report or audit output", path.display()))?;
    envelope
        .reports
        .into_iter()
        .next()
        .with_context(|| format!("{} contains no audit reports", path.display()))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("failed to parse {}", path.display()))
}

/// Read one series or a JSON array of series
fn read_series(path: &Path) -> anyhow::Result<Vec<KpiSeries>> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    match serde_json::from_str::<Vec<KpiSeries>>(&contents) {
        Ok(series) => Ok(series),
        Err(_) => Ok(vec![serde_json::from_str(&contents)
            .with_context(|| format!("{} is not a KPI series or array", path.display()))?]),
    }
}
