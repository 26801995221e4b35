use std::collections::HashMap;
use std::sync::Arc;

use crate::error::VfsError;
use crate::path;
use crate::provider::VfsProvider;

/// Virtual file system that routes paths to mounted providers.
///
/// Paths are structured as `"source_name/rest/of/path"`. The first path
/// segment selects the provider. If no source name matches, the default
/// source (if set) is tried with the full path.
///
/// `Clone` is cheap (Arc internals). Thread-safe (`Send + Sync`).
///
/// # Example
///
/// ```ignore
/// let mut vfs = Vfs::new();
/// vfs.mount("assets", FileSystemProvider::new("./assets"));
/// vfs.mount("artifacts", FileSystemProvider::new("./artifacts"));
/// vfs.set_default("assets");
///
/// let source = vfs.read("assets/shaders/fs_pbr.glsl")?;
/// // Same file through the default source:
/// let source = vfs.read("shaders/fs_pbr.glsl")?;
/// ```
#[derive(Clone)]
pub struct Vfs {
    inner: Arc<VfsInner>,
}

struct VfsInner {
    sources: HashMap<String, Box<dyn VfsProvider>>,
    default_source: Option<String>,
}

impl Vfs {
    /// Create an empty VFS with no mounted sources.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(VfsInner {
                sources: HashMap::new(),
                default_source: None,
            }),
        }
    }

    /// Mount a provider under the given source name.
    ///
    /// Replaces any previously mounted provider with the same name.
    ///
    /// # Panics
    ///
    /// Panics if the `Vfs` has already been cloned. All mounting must
    /// happen during the configuration phase before sharing the `Vfs`.
    pub fn mount(&mut self, name: impl Into<String>, provider: impl VfsProvider) {
        let name = name.into();
        log::debug!("Mounting VFS source '{name}'");
        let inner = Arc::get_mut(&mut self.inner).expect("cannot mount after Vfs has been cloned");
        inner.sources.insert(name, Box::new(provider));
    }

    /// Set the default source used when a path does not match any mount.
    ///
    /// # Panics
    ///
    /// Panics if the `Vfs` has already been cloned.
    pub fn set_default(&mut self, name: impl Into<String>) {
        let inner =
            Arc::get_mut(&mut self.inner).expect("cannot set default after Vfs has been cloned");
        inner.default_source = Some(name.into());
    }

    /// Whether a source with this name is mounted.
    pub fn is_mounted(&self, name: &str) -> bool {
        self.inner.sources.contains_key(name)
    }

    /// Read the entire contents of a file.
    pub fn read(&self, raw_path: &str) -> Result<Vec<u8>, VfsError> {
        let (provider, path) = self.resolve(raw_path)?;
        provider.read(&path)
    }

    /// Read a file as UTF-8 text.
    pub fn read_to_string(&self, raw_path: &str) -> Result<String, VfsError> {
        let bytes = self.read(raw_path)?;
        String::from_utf8(bytes)
            .map_err(|e| VfsError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
    }

    /// Check whether a file exists.
    pub fn exists(&self, raw_path: &str) -> Result<bool, VfsError> {
        let (provider, path) = self.resolve(raw_path)?;
        provider.exists(&path)
    }

    /// List the immediate children of a directory.
    pub fn list_dir(&self, raw_path: &str) -> Result<Vec<String>, VfsError> {
        let (provider, path) = self.resolve(raw_path)?;
        provider.list_dir(&path)
    }

    /// Write data to a file.
    ///
    /// Returns [`VfsError::ReadOnly`] if the resolved provider does not
    /// support writes.
    pub fn write(&self, raw_path: &str, data: &[u8]) -> Result<(), VfsError> {
        let (provider, path) = self.resolve(raw_path)?;
        provider.write(&path, data)
    }

    /// Delete a file.
    pub fn delete(&self, raw_path: &str) -> Result<(), VfsError> {
        let (provider, path) = self.resolve(raw_path)?;
        provider.delete(&path)
    }

    /// Create a directory.
    pub fn create_dir(&self, raw_path: &str) -> Result<(), VfsError> {
        let (provider, path) = self.resolve(raw_path)?;
        provider.create_dir(&path)
    }

    /// Check if the provider for a given path is read-only.
    pub fn is_read_only(&self, raw_path: &str) -> Result<bool, VfsError> {
        let (provider, _) = self.resolve(raw_path)?;
        Ok(provider.is_read_only())
    }

    /// Resolve a raw path to a provider and the path within that provider.
    fn resolve(&self, raw_path: &str) -> Result<(&dyn VfsProvider, String), VfsError> {
        let normalized = path::normalize(raw_path)?;
        let (source, rest) = path::split_source(&normalized);

        if let Some(provider) = self.inner.sources.get(source) {
            return Ok((provider.as_ref(), rest.to_owned()));
        }

        let default = self
            .inner
            .default_source
            .as_ref()
            .and_then(|name| self.inner.sources.get(name));
        match default {
            Some(provider) => Ok((provider.as_ref(), normalized)),
            None => Err(VfsError::NoProvider(source.to_owned())),
        }
    }
}

impl Default for Vfs {
    fn default() -> Self {
        Self::new()
    }
}
