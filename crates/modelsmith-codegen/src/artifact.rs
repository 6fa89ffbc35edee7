//! Artifact kinds, per-file outcomes and the generation report.

use modelsmith_core::error::{ModelsmithError, ModelsmithResult};
use serde::{Serialize, Serializer};
use std::fmt;
use std::path::PathBuf;

/// Reason attached to every skip
pub const NOT_OVERWRITTEN: &str = "already exists, not overwritten";

/// Something a generator can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactKind {
    Entity,
    CreateDto,
    UpdateDto,
    Service,
    Controller,
    Module,
    Migration,
    Component,
    Page,
    Hook,
    ApiClient,
    Animation,
    /// Registration of a new module in the application module; composite only
    AppModule,
}

impl ArtifactKind {
    /// Kinds that can be requested by name
    pub const ALL: [ArtifactKind; 12] = [
        ArtifactKind::Entity,
        ArtifactKind::CreateDto,
        ArtifactKind::UpdateDto,
        ArtifactKind::Service,
        ArtifactKind::Controller,
        ArtifactKind::Module,
        ArtifactKind::Migration,
        ArtifactKind::Component,
        ArtifactKind::Page,
        ArtifactKind::Hook,
        ArtifactKind::ApiClient,
        ArtifactKind::Animation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Entity => "entity",
            ArtifactKind::CreateDto => "create-dto",
            ArtifactKind::UpdateDto => "update-dto",
            ArtifactKind::Service => "service",
            ArtifactKind::Controller => "controller",
            ArtifactKind::Module => "module",
            ArtifactKind::Migration => "migration",
            ArtifactKind::Component => "component",
            ArtifactKind::Page => "page",
            ArtifactKind::Hook => "hook",
            ArtifactKind::ApiClient => "api-client",
            ArtifactKind::Animation => "animation",
            ArtifactKind::AppModule => "app-module",
        }
    }

    /// Parse a kind name; `_` and `-` are interchangeable, case is ignored.
    pub fn parse(s: &str) -> ModelsmithResult<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == normalized)
            .ok_or_else(|| ModelsmithError::UnknownArtifactKind(s.to_string()))
    }

    pub fn is_frontend(&self) -> bool {
        matches!(
            self,
            ArtifactKind::Component
                | ArtifactKind::Page
                | ArtifactKind::Hook
                | ArtifactKind::ApiClient
                | ArtifactKind::Animation
        )
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happened to one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Created,
    /// An existing file was edited in place (module registration)
    Updated,
    Skipped(String),
    Warning(String),
    Failed(String),
}

impl Outcome {
    pub fn skipped() -> Self {
        Outcome::Skipped(NOT_OVERWRITTEN.to_string())
    }

    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Created => "created",
            Outcome::Updated => "updated",
            Outcome::Skipped(_) => "skipped",
            Outcome::Warning(_) => "warning",
            Outcome::Failed(_) => "failed",
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            Outcome::Created | Outcome::Updated => None,
            Outcome::Skipped(d) | Outcome::Warning(d) | Outcome::Failed(d) => Some(d),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.detail() {
            Some(detail) => write!(f, "{}: {detail}", self.label()),
            None => f.write_str(self.label()),
        }
    }
}

impl Serialize for Outcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFile {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub outcome: Outcome,
}

/// Independent per-file results of one generator run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub files: Vec<GeneratedFile>,
}

impl GenerationReport {
    pub fn push(&mut self, kind: ArtifactKind, path: impl Into<PathBuf>, outcome: Outcome) {
        self.files.push(GeneratedFile {
            kind,
            path: path.into(),
            outcome,
        });
    }

    pub fn extend(&mut self, other: GenerationReport) {
        self.files.extend(other.files);
    }

    pub fn created(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Created))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Skipped(_)))
    }

    pub fn warnings(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Warning(_)))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Failed(_)))
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    /// Outcome recorded for a kind, if that step ran
    pub fn outcome(&self, kind: ArtifactKind) -> Option<&Outcome> {
        self.files.iter().find(|f| f.kind == kind).map(|f| &f.outcome)
    }

    fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.files.iter().filter(|f| pred(&f.outcome)).count()
    }
}

impl fmt::Display for GenerationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for file in &self.files {
            write!(f, "  {:<8} {}", file.outcome.label(), file.path.display())?;
            match file.outcome.detail() {
                Some(detail) => writeln!(f, " ({detail})")?,
                None => writeln!(f)?,
            }
        }
        write!(
            f,
            "{} created, {} skipped, {} warnings, {} failed",
            self.created(),
            self.skipped(),
            self.warnings(),
            self.failed()
        )
    }
}
