//! Documentation set assembly and writing.
//!
//! Unlike generated sources, documentation is derived output: every emission
//! overwrites the previous files. Each file is written and reported on its own.

use crate::api::render_api_markdown;
use crate::openapi::generate_openapi;
use crate::reference::{render_components_markdown, render_entities_markdown};
use modelsmith_core::config::ProjectConfig;
use modelsmith_core::error::ModelsmithResult;
use modelsmith_core::fs::FileSystem;
use modelsmith_core::model::ProjectModel;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;
use tracing::{error, info};

pub const API_FILE: &str = "API.md";
pub const OPENAPI_FILE: &str = "openapi.json";
pub const COMPONENTS_FILE: &str = "COMPONENTS.md";
pub const ENTITIES_FILE: &str = "ENTITIES.md";

/// Rendered documentation, not yet written anywhere
#[derive(Debug, Clone, PartialEq)]
pub struct Documentation {
    pub api: String,
    pub openapi: Value,
    pub components: String,
    pub entities: String,
}

impl Documentation {
    /// File name and contents of each document, in emission order
    pub fn files(&self) -> ModelsmithResult<Vec<(&'static str, String)>> {
        let mut openapi = serde_json::to_string_pretty(&self.openapi)?;
        openapi.push('\n');

        Ok(vec![
            (API_FILE, self.api.clone()),
            (OPENAPI_FILE, openapi),
            (COMPONENTS_FILE, self.components.clone()),
            (ENTITIES_FILE, self.entities.clone()),
        ])
    }
}

/// Render every document for a model.
pub fn emit(model: &ProjectModel, config: &ProjectConfig) -> Documentation {
    let title = config.title();
    Documentation {
        api: render_api_markdown(model, title, &config.docs),
        openapi: generate_openapi(model, config),
        components: render_components_markdown(model, title),
        entities: render_entities_markdown(model, title),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocStatus {
    Written,
    Failed(String),
}

impl fmt::Display for DocStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocStatus::Written => f.write_str("written"),
            DocStatus::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

impl Serialize for DocStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmittedDoc {
    pub path: PathBuf,
    pub status: DocStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocsReport {
    pub files: Vec<EmittedDoc>,
}

impl DocsReport {
    pub fn written(&self) -> usize {
        self.files
            .iter()
            .filter(|f| f.status == DocStatus::Written)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.files.len() - self.written()
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }
}

impl fmt::Display for DocsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for file in &self.files {
            match &file.status {
                DocStatus::Written => writeln!(f, "  {:<8} {}", "written", file.path.display())?,
                DocStatus::Failed(reason) => {
                    writeln!(f, "  {:<8} {} ({reason})", "failed", file.path.display())?
                }
            }
        }
        write!(f, "{} written, {} failed", self.written(), self.failed())
    }
}

/// Write a documentation set under the configured output directory.
pub fn write_docs<F: FileSystem + ?Sized>(
    fs: &F,
    config: &ProjectConfig,
    docs: &Documentation,
) -> ModelsmithResult<DocsReport> {
    let mut report = DocsReport::default();

    for (name, contents) in docs.files()? {
        let path = config.docs.output_dir.join(name);
        let status = match fs.write(&path, &contents) {
            Ok(()) => {
                info!(path = %path.display(), bytes = contents.len(), "documentation written");
                DocStatus::Written
            }
            Err(err) => {
                error!(path = %path.display(), error = %err, "documentation write failed");
                DocStatus::Failed(err.to_string())
            }
        };
        report.files.push(EmittedDoc { path, status });
    }

    Ok(report)
}

#[cfg(test)]
#[path = "emitter/emitter_tests.rs"]
mod emitter_tests;
