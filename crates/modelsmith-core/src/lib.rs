//! modelsmith-core - Shared model, naming conventions, configuration and filesystem
//!
//! This crate provides the foundation every other modelsmith crate builds on:
//! - [`ProjectModel`] and its records ([`Entity`], [`Controller`], [`Dto`], ...)
//! - [`naming`] conversions between Pascal, camel, kebab and plural forms
//! - [`ProjectConfig`] loaded from `modelsmith.toml`
//! - [`FileSystem`] with [`DiskFs`] and the in-memory [`MemoryFs`]
//! - [`ModelsmithError`] for error handling

pub mod config;
pub mod error;
pub mod fs;
pub mod model;
pub mod naming;

pub use config::{
    BackendLayout, CONFIG_FILE, DocsConfig, FrontendLayout, NamingConfig, ProjectConfig,
    ProjectSection,
};
pub use error::{ModelsmithError, ModelsmithResult};
pub use fs::{DirEntry, DiskFs, FileSystem, MemoryFs, WriteStatus};
pub use model::{
    ColumnMarker, Component, ComponentKind, ConsistencyIssue, Controller, Dto, DtoField, Endpoint,
    Entity, Field, HttpMethod, IssueKind, Module, ProjectModel, Prop, Relation, RelationKind,
    SemanticType, UNKNOWN_HANDLER, Validation,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Controller, Dto, Endpoint, Entity, Field, FileSystem, HttpMethod, ModelsmithError,
        ModelsmithResult, ProjectConfig, ProjectModel, Relation, RelationKind, SemanticType,
    };
}
