//! `check` command: configuration validation plus a consistency gate

use crate::analyze::render_consistency;
use crate::cli::OutputFormat;
use crate::project::Project;
use anyhow::{Context, Result};
use modelsmith::{ConsistencyReport, FileSystem, ProjectConfig, ProjectModel, analyze_project};
use std::path::Path;
use std::process::ExitCode;

pub fn run(project: &Project) -> Result<ExitCode> {
    let (model, report) = check(&project.fs, &project.config)?;
    print!("{}", render_check(&project.config_path, &model, &report)?);

    if report.is_clean() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Validate the configuration, then analyze the project it describes.
pub fn check<F: FileSystem + ?Sized>(
    fs: &F,
    config: &ProjectConfig,
) -> Result<(ProjectModel, ConsistencyReport)> {
    config.validate()?;
    let (model, report) = analyze_project(fs, config).context("Failed to scan project")?;
    Ok((model, report))
}

pub fn render_check(
    config_path: &Path,
    model: &ProjectModel,
    report: &ConsistencyReport,
) -> Result<String> {
    let mut out = format!("✓ Config: {}\n", config_path.display());
    out.push_str(&render_consistency(model, report, OutputFormat::Text)?);
    if !report.is_clean() {
        out.push_str(&format!("\n✗ {} consistency issue(s)\n", report.issue_count()));
    }
    Ok(out)
}
