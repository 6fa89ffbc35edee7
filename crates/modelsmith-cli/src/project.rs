//! Project root and configuration resolution

use anyhow::{Context, Result};
use modelsmith::{CONFIG_FILE, DiskFs, ProjectConfig};
use std::path::{Path, PathBuf};

pub struct Project {
    pub fs: DiskFs,
    pub config: ProjectConfig,
    pub config_path: PathBuf,
}

impl Project {
    /// Load the project at `root`.
    ///
    /// An explicit `--config` must exist; the default `<root>/modelsmith.toml`
    /// may be absent, in which case defaults apply.
    pub fn load(root: &Path, config: Option<&Path>) -> Result<Self> {
        let (config_path, config) = match config {
            Some(path) => (
                path.to_path_buf(),
                ProjectConfig::from_file(path)
                    .with_context(|| format!("Failed to load config: {}", path.display()))?,
            ),
            None => {
                let path = root.join(CONFIG_FILE);
                let config = ProjectConfig::load_or_default(&path)
                    .with_context(|| format!("Failed to load config: {}", path.display()))?;
                (path, config)
            }
        };

        Ok(Self {
            fs: DiskFs::new(root),
            config,
            config_path,
        })
    }
}
