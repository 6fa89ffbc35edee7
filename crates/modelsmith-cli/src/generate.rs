//! `generate`, `module` and `docs` commands

use crate::cli::Specs;
use crate::project::Project;
use anyhow::{Context, Result};
use modelsmith::{
    ArtifactKind, DocsReport, FileSystem, GenerateParams, GenerationReport, Generator, ModelBuilder,
    ProjectConfig, emit, write_docs,
};
use std::process::ExitCode;

/// Generate a single artifact.
pub fn run(project: &Project, kind: &str, name: &str, specs: &Specs) -> Result<ExitCode> {
    let kind = ArtifactKind::parse(kind)?;
    let report = generate(&project.fs, &project.config, Some(kind), name, specs, &timestamp())?;
    println!("{report}");
    Ok(exit_code(report.has_failures()))
}

/// Generate a full module and register it.
pub fn run_module(project: &Project, name: &str, specs: &Specs) -> Result<ExitCode> {
    let report = generate(&project.fs, &project.config, None, name, specs, &timestamp())?;
    println!("{report}");
    Ok(exit_code(report.has_failures()))
}

/// Regenerate the documentation set, overwriting previous output.
pub fn run_docs(project: &Project) -> Result<ExitCode> {
    let report = docs(&project.fs, &project.config)?;
    println!("{report}");
    Ok(exit_code(report.has_failures()))
}

/// One artifact when `kind` is given, the whole module otherwise
pub fn generate<F: FileSystem + ?Sized>(
    fs: &F,
    config: &ProjectConfig,
    kind: Option<ArtifactKind>,
    name: &str,
    specs: &Specs,
    timestamp: &str,
) -> Result<GenerationReport> {
    let params = GenerateParams::parse(&specs.fields, &specs.relations, &specs.props)?
        .with_timestamp(timestamp);
    let generator = Generator::new(fs, config);

    let report = match kind {
        Some(kind) => generator.generate(kind, name, &params)?,
        None => generator.generate_module(name, &params)?,
    };
    Ok(report)
}

pub fn docs<F: FileSystem + ?Sized>(fs: &F, config: &ProjectConfig) -> Result<DocsReport> {
    let model = ModelBuilder::new(fs, config)
        .build()
        .context("Failed to scan project")?;
    Ok(write_docs(fs, config, &emit(&model, config))?)
}

/// Migration timestamp in epoch milliseconds
fn timestamp() -> String {
    chrono::Utc::now().timestamp_millis().to_string()
}

fn exit_code(failed: bool) -> ExitCode {
    if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}
