use clap::Parser;

use asomap::cli::{Cli, Commands};
use asomap::commands::{self, audit::AuditConfig, intel::IntelConfig};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Audit {
            input,
            registry,
            format,
            output,
        } => commands::audit::run(AuditConfig {
            input,
            registry,
            format: format.into(),
            output,
        }),
        Commands::Intel {
            report,
            series,
            scenarios,
            signals,
            registry,
            format,
            output,
        } => commands::intel::run(IntelConfig {
            report,
            series,
            scenarios,
            signals,
            registry,
            format: format.into(),
            output,
        }),
        Commands::Init { path, force } => commands::init::run(&path, force),
        Commands::ValidateRegistry { path } => commands::validate::run(&path),
    }
}
