//! # modelsmith
//!
//! Reads a decorator-annotated TypeScript backend (TypeORM entities, NestJS
//! controllers, class-validator DTOs) and its React frontend, and:
//! - reports gaps between entities and modules, and dead DTOs and handlers
//! - scaffolds entities, DTOs, services, controllers, modules and frontend files
//! - emits a Markdown API reference and an OpenAPI 3.0 document
//!
//! ## Example
//!
//! ```no_run
//! use modelsmith::prelude::*;
//!
//! fn main() -> ModelsmithResult<()> {
//!     let fs = DiskFs::new(".");
//!     let config = ProjectConfig::load_or_default(CONFIG_FILE)?;
//!
//!     let (model, report) = analyze_project(&fs, &config)?;
//!     println!("{report}");
//!
//!     let params = GenerateParams::parse(&["name:string", "description:text:optional"], &[], &[])?;
//!     let generated = Generator::new(&fs, &config).generate_module("Review", &params)?;
//!     println!("{generated}");
//!
//!     write_docs(&fs, &config, &emit(&model, &config))?;
//!     Ok(())
//! }
//! ```
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports from:
//! - [`modelsmith_core`] - Model types, naming, configuration, filesystem, errors
//! - [`modelsmith_extract`] - Tokenizer, class scanner and the per-file extractors
//! - [`modelsmith_model`] - Model builder, consistency and dead-code reports
//! - [`modelsmith_codegen`] - Templates, generator and app-module registration
//! - [`modelsmith_docs`] - API Markdown, OpenAPI, component and entity references

pub use modelsmith_core::{
    BackendLayout, CONFIG_FILE, Component, ComponentKind, ConsistencyIssue, Controller, DiskFs,
    DocsConfig, Dto, DtoField, Endpoint, Entity, Field, FileSystem, FrontendLayout, HttpMethod,
    IssueKind, MemoryFs, ModelsmithError, ModelsmithResult, Module, NamingConfig, ProjectConfig,
    ProjectModel, Prop, Relation, RelationKind, SemanticType, Validation, WriteStatus, naming,
};

pub use modelsmith_extract::{
    extract_component, extract_components, extract_controller, extract_dto, extract_dtos,
    extract_entity,
};

pub use modelsmith_model::{
    ConsistencyReport, DeadCodeReport, ModelBuilder, analyze, analyze_project, find_dead_code,
};

pub use modelsmith_codegen::{
    ArtifactKind, GenerateParams, GeneratedFile, GenerationReport, Generator, Outcome,
    RelationSpec,
};

pub use modelsmith_docs::{DocsReport, Documentation, emit, write_docs};

pub use serde_json;
pub use tracing;

/// Prelude module for convenient imports.
///
/// Use `use modelsmith::prelude::*;` for the types most programs need:
/// configuration and filesystem, the model builder and reports, the generator,
/// and documentation emission.
pub mod prelude {
    pub use crate::{
        ArtifactKind, CONFIG_FILE, ConsistencyReport, DeadCodeReport, DiskFs, FileSystem,
        GenerateParams, GenerationReport, Generator, ModelBuilder, ModelsmithError,
        ModelsmithResult, Outcome, ProjectConfig, ProjectModel, analyze_project, emit,
        find_dead_code, write_docs,
    };
}
