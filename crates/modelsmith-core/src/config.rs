//! Project configuration (`modelsmith.toml`)
//!
//! Every key is optional. A project that follows the default layout needs no
//! configuration file at all:
//!
//! ```toml
//! [project]
//! name = "shop"
//!
//! [backend]
//! root = "backend"
//!
//! [naming.modules]
//! Category = "categories"
//! ```

use crate::error::{ModelsmithError, ModelsmithResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the project root
pub const CONFIG_FILE: &str = "modelsmith.toml";

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub project: ProjectSection,

    #[serde(default)]
    pub backend: BackendLayout,

    #[serde(default)]
    pub frontend: FrontendLayout,

    #[serde(default)]
    pub docs: DocsConfig,

    #[serde(default)]
    pub naming: NamingConfig,

    /// Log level used when neither `RUST_LOG` nor `--log-level` is given
    #[serde(default)]
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSection {
    pub name: String,
    pub version: String,

    /// Title used for generated documentation; falls back to `name`
    pub title: Option<String>,
}

impl Default for ProjectSection {
    fn default() -> Self {
        Self {
            name: "app".to_string(),
            version: "1.0.0".to_string(),
            title: None,
        }
    }
}

/// Where the decorator-annotated backend lives, relative to the project root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendLayout {
    #[serde(default = "default_backend_root")]
    pub root: PathBuf,

    #[serde(default = "default_entities_dir")]
    pub entities_dir: PathBuf,

    #[serde(default = "default_modules_dir")]
    pub modules_dir: PathBuf,

    /// Central module registry that new modules are registered into
    #[serde(default = "default_app_module")]
    pub app_module: PathBuf,

    #[serde(default = "default_migrations_dir")]
    pub migrations_dir: PathBuf,

    /// Import line after which new module imports are inserted
    #[serde(default = "default_registry_anchor")]
    pub registry_anchor: String,
}

fn default_backend_root() -> PathBuf {
    PathBuf::from("backend")
}

fn default_entities_dir() -> PathBuf {
    PathBuf::from("src/entities")
}

fn default_modules_dir() -> PathBuf {
    PathBuf::from("src/modules")
}

fn default_app_module() -> PathBuf {
    PathBuf::from("src/app.module.ts")
}

fn default_migrations_dir() -> PathBuf {
    PathBuf::from("src/migrations")
}

fn default_registry_anchor() -> String {
    "import { TypeOrmModule } from '@nestjs/typeorm';".to_string()
}

impl Default for BackendLayout {
    fn default() -> Self {
        Self {
            root: default_backend_root(),
            entities_dir: default_entities_dir(),
            modules_dir: default_modules_dir(),
            app_module: default_app_module(),
            migrations_dir: default_migrations_dir(),
            registry_anchor: default_registry_anchor(),
        }
    }
}

impl BackendLayout {
    pub fn entities_path(&self) -> PathBuf {
        self.root.join(&self.entities_dir)
    }

    pub fn modules_path(&self) -> PathBuf {
        self.root.join(&self.modules_dir)
    }

    /// Folder of a single module, e.g. `backend/src/modules/reviews`
    pub fn module_path(&self, folder: &str) -> PathBuf {
        self.modules_path().join(folder)
    }

    pub fn app_module_path(&self) -> PathBuf {
        self.root.join(&self.app_module)
    }

    pub fn migrations_path(&self) -> PathBuf {
        self.root.join(&self.migrations_dir)
    }
}

/// Where the frontend lives, relative to the project root
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontendLayout {
    pub root: PathBuf,
    pub components_dir: PathBuf,
    pub pages_dir: PathBuf,
    pub hooks_dir: PathBuf,
    pub api_dir: PathBuf,
    pub animations_dir: PathBuf,
}

impl Default for FrontendLayout {
    fn default() -> Self {
        Self {
            root: PathBuf::from("frontend"),
            components_dir: PathBuf::from("src/components"),
            pages_dir: PathBuf::from("src/pages"),
            hooks_dir: PathBuf::from("src/hooks"),
            api_dir: PathBuf::from("src/api"),
            animations_dir: PathBuf::from("src/animations"),
        }
    }
}

impl FrontendLayout {
    pub fn components_path(&self) -> PathBuf {
        self.root.join(&self.components_dir)
    }

    pub fn pages_path(&self) -> PathBuf {
        self.root.join(&self.pages_dir)
    }

    pub fn hooks_path(&self) -> PathBuf {
        self.root.join(&self.hooks_dir)
    }

    pub fn api_path(&self) -> PathBuf {
        self.root.join(&self.api_dir)
    }

    pub fn animations_path(&self) -> PathBuf {
        self.root.join(&self.animations_dir)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocsConfig {
    pub output_dir: PathBuf,

    /// Base URL used in example requests
    pub base_url: String,

    /// Global route prefix (e.g. `api`) prepended to every endpoint
    pub api_prefix: String,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("docs"),
            base_url: "http://localhost:3000".to_string(),
            api_prefix: String::new(),
        }
    }
}

impl DocsConfig {
    /// Base URL joined with the API prefix, without a trailing slash
    pub fn api_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let prefix = self.api_prefix.trim_matches('/');
        if prefix.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{prefix}")
        }
    }
}

/// Explicit entity-to-module naming table
///
/// The suffix heuristics in the model builder only apply to entities that are
/// not listed here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Entity name → module folder name (e.g. `Category = "categories"`)
    pub modules: BTreeMap<String, String>,

    /// Module folders that are not expected to own an entity
    pub ignore_modules: Vec<String>,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            modules: BTreeMap::new(),
            ignore_modules: ["auth", "health", "common", "shared"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl NamingConfig {
    /// Module folder explicitly mapped to an entity
    pub fn module_for_entity(&self, entity: &str) -> Option<&str> {
        self.modules.get(entity).map(String::as_str)
    }

    /// Entity explicitly mapped to a module folder
    pub fn entity_for_module(&self, module: &str) -> Option<&str> {
        self.modules
            .iter()
            .find(|(_, folder)| folder.as_str() == module)
            .map(|(entity, _)| entity.as_str())
    }

    pub fn is_ignored(&self, module: &str) -> bool {
        self.ignore_modules.iter().any(|m| m == module)
    }
}

const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

impl ProjectConfig {
    /// Load configuration from a file
    pub fn from_file(path: impl AsRef<Path>) -> ModelsmithResult<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|err| ModelsmithError::io(path, err))?;

        Self::from_str(&content)
    }

    /// Load configuration from a file, or fall back to defaults if it does not exist
    pub fn load_or_default(path: impl AsRef<Path>) -> ModelsmithResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::from_file(path)
    }

    /// Parse configuration from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> ModelsmithResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Title for generated documentation
    pub fn title(&self) -> &str {
        self.project.title.as_deref().unwrap_or(&self.project.name)
    }

    /// Validate the configuration
    pub fn validate(&self) -> ModelsmithResult<()> {
        if self.project.name.trim().is_empty() {
            return Err(ModelsmithError::Config("project name cannot be empty".into()));
        }

        if !self.project.version.contains('.') {
            return Err(ModelsmithError::Config(format!(
                "project version should be in semver format (e.g., 1.0.0), got '{}'",
                self.project.version
            )));
        }

        let dirs = [
            ("backend.entities_dir", &self.backend.entities_dir),
            ("backend.modules_dir", &self.backend.modules_dir),
            ("backend.app_module", &self.backend.app_module),
            ("backend.migrations_dir", &self.backend.migrations_dir),
            ("frontend.components_dir", &self.frontend.components_dir),
            ("frontend.hooks_dir", &self.frontend.hooks_dir),
            ("docs.output_dir", &self.docs.output_dir),
        ];
        for (key, dir) in dirs {
            if dir.as_os_str().is_empty() {
                return Err(ModelsmithError::Config(format!("{key} cannot be empty")));
            }
        }

        if self.backend.registry_anchor.trim().is_empty() {
            return Err(ModelsmithError::Config(
                "backend.registry_anchor cannot be empty".into(),
            ));
        }

        if !(self.docs.base_url.starts_with("http://") || self.docs.base_url.starts_with("https://"))
        {
            return Err(ModelsmithError::Config(format!(
                "docs.base_url must start with http:// or https://, got '{}'",
                self.docs.base_url
            )));
        }

        for (entity, folder) in &self.naming.modules {
            if folder.is_empty() || folder.contains(['/', '\\']) {
                return Err(ModelsmithError::Config(format!(
                    "naming.modules.{entity} must be a single folder name, got '{folder}'"
                )));
            }
        }

        if let Some(level) = &self.log_level {
            if !VALID_LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
                return Err(ModelsmithError::Config(format!("invalid log_level '{level}'")));
            }
        }

        Ok(())
    }
}
