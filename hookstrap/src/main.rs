mod cli;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use hookstrap_core::config::{self, process_env, BootstrapConfig, ObservabilityConfig};
use hookstrap_core::observability;
use hookstrap_env::report::{Reporter, StdoutReporter};
use hookstrap_env::runner::SystemRunner;
use hookstrap_env::{Bootstrapper, EXIT_FAILURE};

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            StdoutReporter.failure(&format!("{:#}", e));
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir().context("Resolve current directory")?;
    let project_dir = BootstrapConfig::resolve_project_dir(&process_env, &cwd, cli.project_dir)?;
    // .env must be applied before the first config read and before tracing starts
    let applied = config::load_dotenv_from_dir(&project_dir)?;
    observability::init_tracing(ObservabilityConfig::from_env());
    tracing::debug!(project = %project_dir.display(), applied, "Loaded .env");

    let cfg = BootstrapConfig::from_lookup(&process_env, project_dir, cli.python);
    tracing::debug!(?cfg, "Resolved configuration");

    let report = Bootstrapper::new(cfg, SystemRunner, StdoutReporter).run()?;
    tracing::debug!(
        env_root = %report.env_root.display(),
        created = report.created,
        "Bootstrap finished"
    );
    Ok(())
}
