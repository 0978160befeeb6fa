use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

impl From<OutputFormat> for crate::io::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => crate::io::OutputFormat::Json,
            OutputFormat::Markdown => crate::io::OutputFormat::Markdown,
            OutputFormat::Terminal => crate::io::OutputFormat::Terminal,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "asomap")]
#[command(about = "Deterministic app-store metadata auditor", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Audit metadata documents against the formula registry
    Audit {
        /// JSON file holding one metadata document or an array of them
        input: PathBuf,

        /// Registry document (json/yaml/toml); defaults to the built-in set
        #[arg(short, long, env = "ASOMAP_REGISTRY")]
        registry: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build the intelligence bundle for an existing audit report
    Intel {
        /// Audit report JSON: either the output of `audit --format json`
        /// or a single bare report extracted from it
        report: PathBuf,

        /// KPI series files (JSON, one series or an array per file)
        #[arg(long)]
        series: Vec<PathBuf>,

        /// JSON file with simulation scenario requests
        #[arg(long)]
        scenarios: Option<PathBuf>,

        /// JSON file with observed anomaly signals
        #[arg(long)]
        signals: Option<PathBuf>,

        /// Registry document (json/yaml/toml); defaults to the built-in set
        #[arg(short, long, env = "ASOMAP_REGISTRY")]
        registry: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write the built-in default registry to a file as a starting point
    Init {
        /// Destination path
        #[arg(default_value = "asomap.registry.json")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Validate a registry document and report every violation
    ValidateRegistry {
        /// Registry document (json/yaml/toml)
        path: PathBuf,
    },
}
