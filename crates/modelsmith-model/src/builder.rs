//! Project model builder.
//!
//! Walks the configured backend and frontend layout through a [`FileSystem`]
//! and runs the extractors over every conventional file:
//!
//! | Source | Record |
//! |--------|--------|
//! | `<entities_dir>/**/*.entity.ts` | [`Entity`] |
//! | `<modules_dir>/<name>/` | [`Module`] |
//! | `<modules_dir>/<name>/*.controller.ts` | [`Controller`] |
//! | `<modules_dir>/<name>/dto/*.ts` | [`Dto`] |
//! | `<components_dir>/**/*.tsx`, `<hooks_dir>/*.ts(x)` | [`Component`] |
//!
//! Missing directories yield empty lists. A file that cannot be read is
//! logged and skipped; a file the extractors do not understand contributes
//! nothing. Only a directory listing failure other than "not found" is an
//! error.

use modelsmith_core::config::ProjectConfig;
use modelsmith_core::error::{ModelsmithError, ModelsmithResult};
use modelsmith_core::fs::{DirEntry, FileSystem};
use modelsmith_core::model::{Component, Controller, Dto, Entity, Module, ProjectModel};
use modelsmith_extract::{extract_components, extract_controller, extract_dtos, extract_entity};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Builds a [`ProjectModel`] from the project tree
pub struct ModelBuilder<'a, F: FileSystem + ?Sized> {
    fs: &'a F,
    config: &'a ProjectConfig,
}

impl<'a, F: FileSystem + ?Sized> ModelBuilder<'a, F> {
    pub fn new(fs: &'a F, config: &'a ProjectConfig) -> Self {
        Self { fs, config }
    }

    /// Scan everything
    pub fn build(&self) -> ModelsmithResult<ProjectModel> {
        let mut model = ProjectModel {
            entities: self.entities()?,
            modules: self.modules()?,
            controllers: self.controllers()?,
            dtos: self.dtos()?,
            components: self.components()?,
        };

        model.entities.sort_by(|a, b| a.name.cmp(&b.name));
        model.modules.sort_by(|a, b| a.name.cmp(&b.name));

        debug!(
            entities = model.entities.len(),
            modules = model.modules.len(),
            controllers = model.controllers.len(),
            dtos = model.dtos.len(),
            components = model.components.len(),
            "project model built"
        );
        Ok(model)
    }

    /// Every entity under the entities directory, in path order
    pub fn entities(&self) -> ModelsmithResult<Vec<Entity>> {
        let files = self.walk(&self.config.backend.entities_path(), &|name| {
            name.ends_with(".entity.ts")
        })?;

        Ok(files
            .into_iter()
            .filter_map(|path| {
                let src = self.read(&path)?;
                let mut entity = extract_entity(&src)?;
                entity.path = Some(path);
                Some(entity)
            })
            .collect())
    }

    /// Look up one entity by name (case-insensitive)
    pub fn entity(&self, name: &str) -> ModelsmithResult<Option<Entity>> {
        Ok(self
            .entities()?
            .into_iter()
            .find(|e| e.name.eq_ignore_ascii_case(name)))
    }

    /// Completeness record for every module folder
    pub fn modules(&self) -> ModelsmithResult<Vec<Module>> {
        let folders = self.module_folders()?;
        Ok(folders.iter().map(|folder| self.module(folder)).collect())
    }

    fn module(&self, folder: &DirEntry) -> Module {
        let name = folder.file_name();
        let part = |suffix: &str| self.fs.exists(&folder.path.join(format!("{name}.{suffix}.ts")));

        let dto_dir = folder.path.join("dto");
        let has_dto = self
            .fs
            .list_dir(&dto_dir)
            .map(|entries| {
                entries
                    .iter()
                    .any(|e| !e.is_dir && e.file_name().ends_with(".ts"))
            })
            .unwrap_or(false);

        Module {
            name: name.to_string(),
            has_module_file: part("module"),
            has_service: part("service"),
            has_controller: part("controller"),
            has_dto,
        }
    }

    /// Every controller found in module folders
    pub fn controllers(&self) -> ModelsmithResult<Vec<Controller>> {
        let mut controllers = Vec::new();
        for folder in self.module_folders()? {
            for path in self.walk(&folder.path, &|name| name.ends_with(".controller.ts"))? {
                let Some(src) = self.read(&path) else { continue };
                if let Some(mut controller) = extract_controller(&src) {
                    controller.path = Some(path);
                    controllers.push(controller);
                }
            }
        }
        Ok(controllers)
    }

    /// Every DTO class in module `dto/` folders
    pub fn dtos(&self) -> ModelsmithResult<Vec<Dto>> {
        let mut dtos = Vec::new();
        for folder in self.module_folders()? {
            let files = self.walk(&folder.path.join("dto"), &|name| name.ends_with(".ts"))?;
            for path in files {
                let Some(src) = self.read(&path) else { continue };
                for mut dto in extract_dtos(&src) {
                    dto.path = Some(path.clone());
                    dtos.push(dto);
                }
            }
        }
        Ok(dtos)
    }

    /// Components from the components tree plus hooks from the hooks folder
    pub fn components(&self) -> ModelsmithResult<Vec<Component>> {
        let frontend = &self.config.frontend;
        let mut files = self.walk(&frontend.components_path(), &|name| name.ends_with(".tsx"))?;
        files.extend(self.walk(&frontend.hooks_path(), &|name| {
            name.ends_with(".ts") || name.ends_with(".tsx")
        })?);

        let mut components = Vec::new();
        for path in files {
            let Some(src) = self.read(&path) else { continue };
            for mut component in extract_components(&src) {
                component.path = Some(path.clone());
                components.push(component);
            }
        }
        Ok(components)
    }

    fn module_folders(&self) -> ModelsmithResult<Vec<DirEntry>> {
        Ok(self
            .list(&self.config.backend.modules_path())?
            .into_iter()
            .filter(|e| e.is_dir)
            .collect())
    }

    fn list(&self, dir: &Path) -> ModelsmithResult<Vec<DirEntry>> {
        match self.fs.list_dir(dir) {
            Ok(entries) => Ok(entries),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(dir = %dir.display(), "directory not found, nothing to scan");
                Ok(Vec::new())
            }
            Err(err) => Err(ModelsmithError::io(dir, err)),
        }
    }

    /// Files below `dir` whose names satisfy `accept`, sorted by path
    fn walk(&self, dir: &Path, accept: &dyn Fn(&str) -> bool) -> ModelsmithResult<Vec<PathBuf>> {
        let mut files = Vec::new();
        let mut pending = vec![dir.to_path_buf()];

        while let Some(current) = pending.pop() {
            for entry in self.list(&current)? {
                if entry.is_dir {
                    pending.push(entry.path);
                } else if accept(entry.file_name()) {
                    files.push(entry.path);
                }
            }
        }

        files.sort();
        Ok(files)
    }

    fn read(&self, path: &Path) -> Option<String> {
        debug!(path = %path.display(), "scanning");
        match self.fs.read_to_string(path) {
            Ok(src) => Some(src),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping unreadable file");
                None
            }
        }
    }
}
