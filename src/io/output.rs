//! Report writers: JSON, Markdown, and colored terminal output.

use colored::*;
use std::io::Write;

use crate::core::types::{AuditReport, IntelligenceBundle, Severity};

/// Envelope for everything one CLI invocation produces
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AuditOutput {
    pub reports: Vec<AuditReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intelligence: Option<IntelligenceBundle>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

pub trait OutputWriter {
    fn write_output(&mut self, output: &AuditOutput) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_output(&mut self, output: &AuditOutput) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(output)?;
        self.writer.write_all(json.as_bytes())?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_report(&mut self, report: &AuditReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## Audit: {} ({})", report.category, report.market)?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Overall score: **{:.1}** (engine {}, registry {})",
            report.overall_score, report.engine_version, report.registry_version
        )?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Dimension | Score | Gap | Severity | Drivers |")?;
        writeln!(self.writer, "|-----------|-------|-----|----------|---------|")?;
        for score in &report.dimensions {
            writeln!(
                self.writer,
                "| {} | {:.1} | {:.1} | {} | {} |",
                score.dimension.display_name(),
                score.score,
                score.gap,
                score.severity.display_name(),
                score.explanation_tokens.join(", ")
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_intelligence(&mut self, bundle: &IntelligenceBundle) -> anyhow::Result<()> {
        if !bundle.stability.is_empty() {
            writeln!(self.writer, "## Stability")?;
            writeln!(self.writer)?;
            for score in &bundle.stability {
                writeln!(
                    self.writer,
                    "- {}: CV {:.3} over {} points ({})",
                    score.metric,
                    score.coefficient_of_variation,
                    score.sample_size,
                    score.classification.display_name()
                )?;
            }
            writeln!(self.writer)?;
        }
        if !bundle.opportunities.is_empty() {
            writeln!(self.writer, "## Opportunities")?;
            writeln!(self.writer)?;
            for item in &bundle.opportunities {
                writeln!(
                    self.writer,
                    "{}. **{}** (gap {:.1}, {}): {}",
                    item.rank,
                    item.category,
                    item.gap_to_target,
                    item.severity.display_name(),
                    item.recommended_action
                )?;
            }
            writeln!(self.writer)?;
        }
        if !bundle.simulations.is_empty() {
            writeln!(self.writer, "## Projections")?;
            writeln!(self.writer)?;
            for sim in &bundle.simulations {
                let band = match sim.confidence_band {
                    Some((low, high)) => format!(" (band {low:.1} - {high:.1})"),
                    None => String::new(),
                };
                writeln!(
                    self.writer,
                    "- {}: {} {:.1} -> {:.1}{}",
                    sim.scenario, sim.metric, sim.current_value, sim.projected_outcome, band
                )?;
            }
            writeln!(self.writer)?;
        }
        if !bundle.attributions.is_empty() {
            writeln!(self.writer, "## Attributions")?;
            writeln!(self.writer)?;
            for attribution in &bundle.attributions {
                let rule = attribution.matched_rule.as_deref().unwrap_or("unattributed");
                writeln!(
                    self.writer,
                    "- [{}] {} (confidence {:.2})",
                    rule, attribution.explanation, attribution.confidence
                )?;
            }
            writeln!(self.writer)?;
        }
        Ok(())
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_output(&mut self, output: &AuditOutput) -> anyhow::Result<()> {
        writeln!(self.writer, "# Metadata Audit Report")?;
        writeln!(self.writer)?;
        for report in &output.reports {
            self.write_report(report)?;
        }
        if let Some(bundle) = &output.intelligence {
            self.write_intelligence(bundle)?;
        }
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn colored_severity(severity: Severity) -> ColoredString {
        match severity {
            Severity::Critical => severity.display_name().red().bold(),
            Severity::Significant => severity.display_name().yellow(),
            Severity::Moderate => severity.display_name().cyan(),
            Severity::Minor => severity.display_name().green(),
        }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_output(&mut self, output: &AuditOutput) -> anyhow::Result<()> {
        for report in &output.reports {
            writeln!(
                self.writer,
                "{} {} [{}] overall {:.1}",
                "Audit".bold(),
                report.category,
                report.market,
                report.overall_score
            )?;
            for score in &report.dimensions {
                writeln!(
                    self.writer,
                    "  {:<20} {:>5.1}  gap {:>5.1}  {}",
                    score.dimension.display_name(),
                    score.score,
                    score.gap,
                    Self::colored_severity(score.severity)
                )?;
            }
            writeln!(self.writer)?;
        }
        if let Some(bundle) = &output.intelligence {
            for item in &bundle.opportunities {
                writeln!(
                    self.writer,
                    "  #{} {:<18} gap {:>5.1} {} - {}",
                    item.rank,
                    item.category,
                    item.gap_to_target,
                    Self::colored_severity(item.severity),
                    item.recommended_action
                )?;
            }
            for attribution in &bundle.attributions {
                writeln!(self.writer, "  {}", attribution.explanation)?;
            }
        }
        Ok(())
    }
}

/// Create a writer for the chosen format over any byte sink
pub fn create_writer<W: Write + 'static>(
    writer: W,
    format: OutputFormat,
) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer)),
    }
}
