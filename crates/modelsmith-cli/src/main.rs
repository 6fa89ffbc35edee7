//! modelsmith CLI - Scaffolding, consistency checks and API docs
//!
//! Commands:
//! - `modelsmith analyze` - Report entity/module consistency
//! - `modelsmith dead-code` - Report unused DTOs and unresolved handlers
//! - `modelsmith generate <kind> <name>` - Generate one artifact
//! - `modelsmith module <name>` - Generate and register a full module
//! - `modelsmith docs` - Write the API reference and OpenAPI document
//! - `modelsmith check` - Validate configuration and fail on consistency issues

use clap::Parser;
use cli::{Cli, Commands};
use modelsmith::ModelsmithError;
use project::Project;
use std::process::ExitCode;

mod analyze;
mod check;
mod cli;
mod generate;
mod logging;
mod project;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let project = Project::load(&cli.root, cli.config.as_deref())?;
    logging::init(cli.log_level.as_deref(), project.config.log_level.as_deref());
    tracing::debug!(root = %cli.root.display(), config = %project.config_path.display(), "project loaded");

    match cli.command {
        Commands::Analyze { format } => analyze::run(&project, format),
        Commands::DeadCode { format } => analyze::run_dead_code(&project, format),
        Commands::Generate { kind, name, specs } => generate::run(&project, &kind, &name, &specs),
        Commands::Module { name, specs } => generate::run_module(&project, &name, &specs),
        Commands::Docs => generate::run_docs(&project),
        Commands::Check => check::run(&project),
    }
}

/// sysexits code for library errors, 1 for anything else
fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<ModelsmithError>()
        .and_then(|e| u8::try_from(e.exit_code()).ok())
        .unwrap_or(1)
}
