//! `analyze` and `dead-code` commands

use crate::cli::OutputFormat;
use crate::project::Project;
use anyhow::Result;
use modelsmith::{ConsistencyReport, DeadCodeReport, ModelBuilder, ProjectModel, find_dead_code};
use std::process::ExitCode;

/// Consistency report; advisory, so it always exits successfully
pub fn run(project: &Project, format: OutputFormat) -> Result<ExitCode> {
    let (model, report) = modelsmith::analyze_project(&project.fs, &project.config)?;
    print!("{}", render_consistency(&model, &report, format)?);
    Ok(ExitCode::SUCCESS)
}

pub fn run_dead_code(project: &Project, format: OutputFormat) -> Result<ExitCode> {
    let model = ModelBuilder::new(&project.fs, &project.config).build()?;
    let report = find_dead_code(&model);
    print!("{}", render_dead_code(&report, format)?);
    Ok(ExitCode::SUCCESS)
}

pub fn render_consistency(
    model: &ProjectModel,
    report: &ConsistencyReport,
    format: OutputFormat,
) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(report)?),
        OutputFormat::Text => {
            let mut out = format!(
                "Scanned {} entities, {} modules, {} controllers, {} DTOs, {} components\n\n",
                model.entities.len(),
                model.modules.len(),
                model.controllers.len(),
                model.dtos.len(),
                model.components.len()
            );
            if report.is_clean() {
                out.push_str("✓ Entities and modules are consistent\n");
            } else {
                out.push_str(&report.to_string());
            }
            out
        }
    })
}

pub fn render_dead_code(report: &DeadCodeReport, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(report)?),
        OutputFormat::Text if report.is_clean() => "✓ No dead code found\n".to_string(),
        OutputFormat::Text => report.to_string(),
    })
}
