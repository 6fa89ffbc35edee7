//! Generator entry points.
//!
//! | Kind | Path |
//! |------|------|
//! | `entity` | `<entities>/<name>.entity.ts` |
//! | `create-dto`, `update-dto` | `<modules>/<folder>/dto/{create,update}-<name>.dto.ts` |
//! | `service`, `controller`, `module` | `<modules>/<folder>/<folder>.<kind>.ts` |
//! | `migration` | `<migrations>/<timestamp>-Create<Plural>Table.ts` |
//! | `component` | `<components>/<Name>.tsx` |
//! | `page` | `<pages>/<Name>Page.tsx` |
//! | `hook` | `<hooks>/use<Plural>.ts` |
//! | `api-client` | `<api>/<plural>.ts` |
//! | `animation` | `<animations>/<camelName>.ts` |
//!
//! Every write is create-if-absent. An existing file is never touched and is
//! reported as skipped. A write error fails that one file and nothing else.

use crate::artifact::{ArtifactKind, GeneratedFile, GenerationReport, Outcome};
use crate::params::GenerateParams;
use crate::registry::{Registration, register_module};
use crate::render::{self, Names, ResourceNames, relative_import};
use modelsmith_core::config::ProjectConfig;
use modelsmith_core::error::{ModelsmithError, ModelsmithResult};
use modelsmith_core::fs::{FileSystem, WriteStatus};
use modelsmith_core::model::{Field, Relation};
use modelsmith_core::naming;
use modelsmith_model::ModelBuilder;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Steps of the full-module composite, in order
pub const MODULE_STEPS: [ArtifactKind; 6] = [
    ArtifactKind::Entity,
    ArtifactKind::CreateDto,
    ArtifactKind::UpdateDto,
    ArtifactKind::Service,
    ArtifactKind::Controller,
    ArtifactKind::Module,
];

/// Entity shape a backend template is rendered from
struct Shape {
    fields: Vec<Field>,
    relations: Vec<Relation>,
    table: Option<String>,
    on_disk: bool,
}

pub struct Generator<'a, F: FileSystem + ?Sized> {
    fs: &'a F,
    config: &'a ProjectConfig,
}

impl<'a, F: FileSystem + ?Sized> Generator<'a, F> {
    pub fn new(fs: &'a F, config: &'a ProjectConfig) -> Self {
        Self { fs, config }
    }

    /// Generate one artifact.
    ///
    /// Errors are reserved for bad input (invalid name, missing parameter) and
    /// for failures scanning the project; per-file problems are outcomes.
    pub fn generate(
        &self,
        kind: ArtifactKind,
        name: &str,
        params: &GenerateParams,
    ) -> ModelsmithResult<GenerationReport> {
        let name = naming::resource_name(name)?;
        let (path, contents) = self.render(kind, &name, params)?;

        let mut report = GenerationReport::default();
        report.files.push(self.write(kind, path, &contents));
        Ok(report)
    }

    /// Entity, DTOs, service, controller and module, then registration in
    /// the application module.
    ///
    /// Steps are independent: a skipped or failed file does not stop the
    /// following ones, and nothing is rolled back.
    pub fn generate_module(&self, name: &str, params: &GenerateParams) -> ModelsmithResult<GenerationReport> {
        let name = naming::resource_name(name)?;
        let mut report = GenerationReport::default();

        for kind in MODULE_STEPS {
            let (path, contents) = self.render(kind, &name, params)?;
            report.files.push(self.write(kind, path, &contents));
        }

        let names = Names::new(&name, &self.config.naming);
        report.files.push(self.register(&names));

        info!(
            module = %names.folder,
            created = report.created(),
            skipped = report.skipped(),
            failed = report.failed(),
            "module generated"
        );
        Ok(report)
    }

    /// Target path and contents for one artifact
    fn render(&self, kind: ArtifactKind, name: &str, params: &GenerateParams) -> ModelsmithResult<(PathBuf, String)> {
        debug!(kind = %kind, name, "rendering");
        if kind.is_frontend() {
            self.render_frontend(kind, name, params)
        } else {
            self.render_backend(kind, name, params)
        }
    }

    fn render_backend(
        &self,
        kind: ArtifactKind,
        name: &str,
        params: &GenerateParams,
    ) -> ModelsmithResult<(PathBuf, String)> {
        let backend = &self.config.backend;
        let shape = self.shape(name, params)?;
        let mut names = Names::new(name, &self.config.naming);
        if let Some(table) = &shape.table {
            names.table = table.clone();
        }

        let module_dir = backend.module_path(&names.folder);
        let entity_import = relative_import(
            &module_dir,
            &backend
                .entities_path()
                .join(format!("{}.entity", names.entity_file)),
        );

        Ok(match kind {
            ArtifactKind::Entity => (
                backend
                    .entities_path()
                    .join(format!("{}.entity.ts", names.entity_file)),
                render::render_entity(&names, &shape.fields, &shape.relations),
            ),
            ArtifactKind::CreateDto => (
                module_dir
                    .join("dto")
                    .join(format!("create-{}.dto.ts", names.entity_file)),
                render::render_create_dto(&names, &shape.fields, &shape.relations),
            ),
            ArtifactKind::UpdateDto => (
                module_dir
                    .join("dto")
                    .join(format!("update-{}.dto.ts", names.entity_file)),
                render::render_update_dto(&names),
            ),
            ArtifactKind::Service => (
                module_dir.join(format!("{}.service.ts", names.folder)),
                render::render_service(&names, &shape.relations, &entity_import),
            ),
            ArtifactKind::Controller => (
                module_dir.join(format!("{}.controller.ts", names.folder)),
                render::render_controller(&names),
            ),
            ArtifactKind::Module => {
                let contents = if shape.on_disk {
                    render::render_module(&names, &entity_import)
                } else {
                    debug!(entity = name, "no entity on disk, emitting module stub");
                    render::render_module_stub(&names)
                };
                (module_dir.join(format!("{}.module.ts", names.folder)), contents)
            }
            ArtifactKind::Migration => {
                let timestamp = params
                    .timestamp
                    .as_deref()
                    .ok_or(ModelsmithError::MissingParameter("timestamp"))?;
                (
                    backend
                        .migrations_path()
                        .join(render::migration_file_name(&names, timestamp)),
                    render::render_migration(&names, &shape.fields, &shape.relations),
                )
            }
            other => return Err(ModelsmithError::UnknownArtifactKind(other.to_string())),
        })
    }

    fn render_frontend(
        &self,
        kind: ArtifactKind,
        name: &str,
        params: &GenerateParams,
    ) -> ModelsmithResult<(PathBuf, String)> {
        let frontend = &self.config.frontend;
        let resource = ResourceNames::new(name);

        Ok(match kind {
            ArtifactKind::Component => (
                frontend.components_path().join(format!("{name}.tsx")),
                render::render_component(name, &params.props),
            ),
            ArtifactKind::Page => (
                frontend
                    .pages_path()
                    .join(format!("{}.tsx", render::page_name(name))),
                render::render_page(name),
            ),
            ArtifactKind::Hook => {
                let api_import = relative_import(
                    &frontend.hooks_path(),
                    &frontend.api_path().join(&resource.route),
                );
                (
                    frontend.hooks_path().join(format!("{}.ts", resource.hook)),
                    render::render_hook(&resource, &api_import),
                )
            }
            ArtifactKind::ApiClient => (
                frontend.api_path().join(format!("{}.ts", resource.route)),
                render::render_api_client(&resource, &self.config.docs.api_url()),
            ),
            ArtifactKind::Animation => (
                frontend
                    .animations_path()
                    .join(format!("{}.ts", naming::to_camel_case(name))),
                render::render_animation(name),
            ),
            other => return Err(ModelsmithError::UnknownArtifactKind(other.to_string())),
        })
    }

    /// Fields and relations from params, else from the entity on disk
    fn shape(&self, name: &str, params: &GenerateParams) -> ModelsmithResult<Shape> {
        let existing = ModelBuilder::new(self.fs, self.config).entity(name)?;
        let on_disk = existing.is_some();

        if params.has_shape() {
            return Ok(Shape {
                fields: params.fields.clone(),
                relations: params.relations_for(name),
                table: existing.map(|e| e.table_name),
                on_disk,
            });
        }

        Ok(match existing {
            Some(entity) => Shape {
                fields: entity.input_fields().cloned().collect(),
                table: Some(entity.table_name.clone()),
                relations: entity.relations,
                on_disk,
            },
            None => Shape {
                fields: Vec::new(),
                relations: Vec::new(),
                table: None,
                on_disk,
            },
        })
    }

    fn write(&self, kind: ArtifactKind, path: PathBuf, contents: &str) -> GeneratedFile {
        let outcome = match self.fs.write_new(&path, contents) {
            Ok(WriteStatus::Created) => {
                info!(kind = %kind, path = %path.display(), "created");
                Outcome::Created
            }
            Ok(WriteStatus::AlreadyExists) => {
                warn!(kind = %kind, path = %path.display(), "already exists, not overwritten");
                Outcome::skipped()
            }
            Err(err) => {
                error!(kind = %kind, path = %path.display(), error = %err, "write failed");
                Outcome::Failed(err.to_string())
            }
        };
        GeneratedFile {
            kind,
            path,
            outcome,
        }
    }

    /// Best-effort registration; every failure is a warning
    fn register(&self, names: &Names) -> GeneratedFile {
        let backend = &self.config.backend;
        let path = backend.app_module_path();
        let class_name = format!("{}Module", names.plural);
        let module_file = backend
            .module_path(&names.folder)
            .join(format!("{}.module", names.folder));
        let import_line = format!(
            "import {{ {class_name} }} from '{}';",
            relative_import(path.parent().unwrap_or(Path::new("")), &module_file)
        );

        let outcome = match self.fs.read_to_string(&path) {
            Err(err) => Outcome::Warning(format!("cannot read application module: {err}")),
            Ok(source) => match register_module(&source, &backend.registry_anchor, &class_name, &import_line) {
                Registration::Registered(updated) => match self.fs.write(&path, &updated) {
                    Ok(()) => Outcome::Updated,
                    Err(err) => Outcome::Warning(format!("cannot update application module: {err}")),
                },
                other => Outcome::Warning(other.to_string()),
            },
        };

        match &outcome {
            Outcome::Updated => info!(module = %class_name, path = %path.display(), "registered"),
            _ => warn!(module = %class_name, path = %path.display(), outcome = %outcome, "registration skipped"),
        }

        GeneratedFile {
            kind: ArtifactKind::AppModule,
            path,
            outcome,
        }
    }
}

#[cfg(test)]
#[path = "generator/generator_tests.rs"]
mod generator_tests;
