//! Command-line definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

#[derive(Parser, Debug)]
#[command(name = "modelsmith")]
#[command(author, version, about = "Scaffolding, consistency checks and API docs for NestJS/TypeORM projects", long_about = None)]
pub struct Cli {
    /// Project root (default: current directory)
    #[arg(short, long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Path to modelsmith.toml (default: <root>/modelsmith.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level; RUST_LOG takes precedence
    #[arg(long, global = true, value_parser = LOG_LEVELS)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Report entities without modules, modules without entities, incomplete modules and dangling relations
    Analyze {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Report DTOs nothing references and endpoints whose handler could not be resolved
    DeadCode {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Generate one artifact (entity, create-dto, update-dto, service, controller,
    /// module, migration, component, page, hook, api-client, animation)
    Generate {
        /// Artifact kind
        kind: String,

        /// Resource name, e.g. Review
        name: String,

        #[command(flatten)]
        specs: Specs,
    },

    /// Generate a full module (entity, DTOs, service, controller, module) and register it
    Module {
        /// Resource name, e.g. Review
        name: String,

        #[command(flatten)]
        specs: Specs,
    },

    /// Write API.md, openapi.json, COMPONENTS.md and ENTITIES.md
    Docs,

    /// Validate the configuration and fail on consistency issues
    Check,
}

/// Shape of the generated resource
#[derive(clap::Args, Debug, Default)]
pub struct Specs {
    /// Field specs: name:type[:optional][:unique][:length=N]
    #[arg(long, num_args = 1.., value_name = "SPEC")]
    pub fields: Vec<String>,

    /// Relation specs: Kind:Target[:nullable]
    #[arg(long, num_args = 1.., value_name = "SPEC")]
    pub relations: Vec<String>,

    /// Component props: name[:type][:optional]
    #[arg(long, num_args = 1.., value_name = "SPEC")]
    pub props: Vec<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}
