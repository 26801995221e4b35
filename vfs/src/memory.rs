use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::VfsError;
use crate::provider::VfsProvider;

/// In-memory VFS provider for tests and built-in assets.
///
/// Cloning shares the same storage, so a handle kept after mounting still
/// sees writes made through the [`Vfs`](crate::Vfs).
///
/// Directories are implicit: they exist whenever a file path contains
/// that directory prefix.
///
/// ```ignore
/// let builtin = MemoryProvider::new();
/// builtin.insert("shaders/fs_missing_textures.glsl", source.into());
///
/// let mut vfs = Vfs::new();
/// vfs.mount("builtin", builtin);
/// ```
#[derive(Clone, Default)]
pub struct MemoryProvider {
    files: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MemoryProvider {
    /// Create an empty in-memory provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a file, overwriting any existing one.
    ///
    /// The path should use forward slashes and have no leading slash.
    pub fn insert(&self, path: impl Into<String>, data: Vec<u8>) {
        self.files
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.into(), data);
    }

    /// Remove a file, returning its data if it existed.
    pub fn remove(&self, path: &str) -> Option<Vec<u8>> {
        self.files
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(path)
    }

    /// Number of stored files.
    pub fn len(&self) -> usize {
        self.files.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether no files are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl VfsProvider for MemoryProvider {
    fn read(&self, path: &str) -> Result<Vec<u8>, VfsError> {
        let files = self.files.read().unwrap_or_else(PoisonError::into_inner);
        files
            .get(path)
            .cloned()
            .ok_or_else(|| VfsError::NotFound(path.to_owned()))
    }

    fn exists(&self, path: &str) -> Result<bool, VfsError> {
        let files = self.files.read().unwrap_or_else(PoisonError::into_inner);
        Ok(files.contains_key(path))
    }

    fn list_dir(&self, path: &str) -> Result<Vec<String>, VfsError> {
        let files = self.files.read().unwrap_or_else(PoisonError::into_inner);
        let prefix = if path.is_empty() {
            String::new()
        } else {
            format!("{path}/")
        };

        let children: BTreeSet<&str> = files
            .keys()
            .filter_map(|key| key.strip_prefix(&prefix))
            .map(|rest| rest.split('/').next().unwrap_or(rest))
            .filter(|child| !child.is_empty())
            .collect();

        Ok(children.into_iter().map(str::to_owned).collect())
    }

    fn is_read_only(&self) -> bool {
        false
    }

    fn write(&self, path: &str, data: &[u8]) -> Result<(), VfsError> {
        self.insert(path, data.to_vec());
        Ok(())
    }

    fn delete(&self, path: &str) -> Result<(), VfsError> {
        self.remove(path)
            .map(|_| ())
            .ok_or_else(|| VfsError::NotFound(path.to_owned()))
    }

    fn create_dir(&self, _path: &str) -> Result<(), VfsError> {
        Ok(())
    }
}
