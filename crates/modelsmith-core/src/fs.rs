//! Filesystem capability
//!
//! Every extractor, generator and emitter touches the project tree through
//! [`FileSystem`] rather than `std::fs`, so the whole engine can run against
//! [`MemoryFs`] in tests. [`DiskFs`] resolves relative paths against a project
//! root.

use parking_lot::RwLock;
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Component, Path, PathBuf};

/// Outcome of a create-if-absent write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStatus {
    Created,
    AlreadyExists,
}

/// A directory listing entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub path: PathBuf,
    pub is_dir: bool,
}

impl DirEntry {
    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
    }
}

/// The small set of filesystem operations the engine needs
pub trait FileSystem {
    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Create `path` with `contents` unless it already exists.
    ///
    /// Missing parent directories are created. An existing file is left
    /// byte-for-byte untouched and reported as [`WriteStatus::AlreadyExists`].
    fn write_new(&self, path: &Path, contents: &str) -> io::Result<WriteStatus>;

    /// Create or replace `path`.
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;

    /// Direct children of a directory, sorted by path.
    fn list_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>>;
}

// ============================================================================
// Disk
// ============================================================================

/// Filesystem rooted at a project directory
#[derive(Debug, Clone)]
pub struct DiskFs {
    root: PathBuf,
}

impl DiskFs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl FileSystem for DiskFs {
    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.resolve(path).is_dir()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(self.resolve(path))
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(self.resolve(path))
    }

    fn write_new(&self, path: &Path, contents: &str) -> io::Result<WriteStatus> {
        let full = self.resolve(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // create_new makes the existence check and the create a single step
        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&full)
        {
            Ok(file) => {
                fill_new_file(&full, file, contents)?;
                Ok(WriteStatus::Created)
            }
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                Ok(WriteStatus::AlreadyExists)
            }
            Err(err) => Err(err),
        }
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        let full = self.resolve(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(full, contents)
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(self.resolve(path))? {
            let entry = entry?;
            entries.push(DirEntry {
                path: path.join(entry.file_name()),
                is_dir: entry.file_type()?.is_dir(),
            });
        }
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }
}

/// Write the contents of a file `write_new` just created. A failed write
/// removes the partial file so a retry does not see it as existing.
fn fill_new_file(full: &Path, mut file: impl io::Write, contents: &str) -> io::Result<()> {
    if let Err(err) = file.write_all(contents.as_bytes()).and_then(|()| file.flush()) {
        drop(file);
        let _ = std::fs::remove_file(full);
        return Err(err);
    }
    Ok(())
}

// ============================================================================
// Memory
// ============================================================================

/// In-memory filesystem for tests
///
/// Paths are normalized (`./a/b` and `a/b` are the same file). Writes under a
/// path registered with [`MemoryFs::deny_writes_under`] fail with
/// `PermissionDenied`.
#[derive(Debug, Default)]
pub struct MemoryFs {
    files: RwLock<BTreeMap<PathBuf, String>>,
    dirs: RwLock<BTreeSet<PathBuf>>,
    read_only: RwLock<Vec<PathBuf>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style file insertion
    pub fn with_file(self, path: impl AsRef<Path>, contents: impl Into<String>) -> Self {
        self.insert(path, contents);
        self
    }

    /// Builder-style empty directory insertion
    pub fn with_dir(self, path: impl AsRef<Path>) -> Self {
        self.add_dir(&normalize(path.as_ref()));
        self
    }

    pub fn insert(&self, path: impl AsRef<Path>, contents: impl Into<String>) {
        let path = normalize(path.as_ref());
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.files.write().insert(path, contents.into());
    }

    /// Make every write at or below `path` fail
    pub fn deny_writes_under(&self, path: impl AsRef<Path>) {
        self.read_only.write().push(normalize(path.as_ref()));
    }

    /// Contents of a file, if present
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.read().get(&normalize(path.as_ref())).cloned()
    }

    /// All file paths, sorted
    pub fn paths(&self) -> Vec<PathBuf> {
        self.files.read().keys().cloned().collect()
    }

    fn add_dir(&self, path: &Path) {
        let mut dirs = self.dirs.write();
        for ancestor in path.ancestors() {
            dirs.insert(ancestor.to_path_buf());
        }
    }

    fn check_writable(&self, path: &Path) -> io::Result<()> {
        if self.read_only.read().iter().any(|ro| path.starts_with(ro)) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("write denied: {}", path.display()),
            ));
        }
        Ok(())
    }
}

fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("no such file or directory: {}", path.display()),
    )
}

impl FileSystem for MemoryFs {
    fn exists(&self, path: &Path) -> bool {
        let path = normalize(path);
        self.files.read().contains_key(&path) || self.dirs.read().contains(&path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.read().contains(&normalize(path))
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.contents(path).ok_or_else(|| not_found(path))
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let path = normalize(path);
        self.check_writable(&path)?;
        self.add_dir(&path);
        Ok(())
    }

    fn write_new(&self, path: &Path, contents: &str) -> io::Result<WriteStatus> {
        let path = normalize(path);
        if self.files.read().contains_key(&path) {
            return Ok(WriteStatus::AlreadyExists);
        }
        self.check_writable(&path)?;
        self.insert(&path, contents);
        Ok(WriteStatus::Created)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        let path = normalize(path);
        self.check_writable(&path)?;
        self.insert(&path, contents);
        Ok(())
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let dir = normalize(path);
        if !self.dirs.read().contains(&dir) {
            return Err(not_found(path));
        }

        let mut entries: Vec<DirEntry> = self
            .dirs
            .read()
            .iter()
            .filter(|d| d.parent() == Some(dir.as_path()))
            .map(|d| DirEntry {
                path: d.clone(),
                is_dir: true,
            })
            .collect();
        entries.extend(
            self.files
                .read()
                .keys()
                .filter(|f| f.parent() == Some(dir.as_path()))
                .map(|f| DirEntry {
                    path: f.clone(),
                    is_dir: false,
                }),
        );
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }
}
