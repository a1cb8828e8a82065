//! A [`Filesystem`] held in memory, for tests that exercise the entry-point
//! patch without touching disk.

use std::{
    collections::{BTreeMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use cleanarch_core::{
    application::{ApplicationError, ports::Filesystem},
    error::CleanArchResult,
};

/// Clones share one tree. A write fails unless the parent directory was
/// created first, as on disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    tree: Arc<RwLock<Tree>>,
}

#[derive(Debug, Default)]
struct Tree {
    files: BTreeMap<PathBuf, String>,
    dirs: HashSet<PathBuf>,
}

impl Tree {
    fn has_dir(&self, path: &Path) -> bool {
        path.as_os_str().is_empty() || self.dirs.contains(path)
    }
}

impl MemoryFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style seeding; parent directories are created as needed.
    pub fn with_file(self, path: impl AsRef<Path>, content: &str) -> CleanArchResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.create_dir_all(parent)?;
        }
        self.write_file(path, content)?;
        Ok(self)
    }

    pub fn read_file(&self, path: &Path) -> Option<String> {
        self.tree.read().ok()?.files.get(path).cloned()
    }

    pub fn is_dir(&self, path: &Path) -> bool {
        self.tree.read().is_ok_and(|tree| tree.dirs.contains(path))
    }

    fn read_tree(&self) -> CleanArchResult<RwLockReadGuard<'_, Tree>> {
        Ok(self.tree.read().map_err(|_| ApplicationError::LockPoisoned)?)
    }

    fn write_tree(&self) -> CleanArchResult<RwLockWriteGuard<'_, Tree>> {
        Ok(self.tree.write().map_err(|_| ApplicationError::LockPoisoned)?)
    }
}

fn missing(path: &Path, reason: &str) -> ApplicationError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> CleanArchResult<()> {
        let mut tree = self.write_tree()?;
        let mut prefix = PathBuf::new();
        for part in path.components() {
            prefix.push(part);
            tree.dirs.insert(prefix.clone());
        }
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> CleanArchResult<()> {
        let mut tree = self.write_tree()?;
        let parent = path.parent().unwrap_or(Path::new(""));
        if !tree.has_dir(parent) {
            return Err(missing(path, "Parent directory does not exist").into());
        }
        tree.files.insert(path.to_path_buf(), content.to_owned());
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> CleanArchResult<String> {
        self.read_tree()?
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| missing(path, "File does not exist").into())
    }

    fn exists(&self, path: &Path) -> bool {
        self.tree
            .read()
            .is_ok_and(|tree| tree.files.contains_key(path) || tree.dirs.contains(path))
    }
}
