use std::path::PathBuf;

use crate::error::VfsError;
use crate::provider::VfsProvider;

/// File system VFS provider for reading and writing assets on disk.
///
/// The root path is joined with the VFS path to form the actual filesystem
/// path. Path traversal is prevented by the VFS path normalization which
/// rejects `..` segments before they reach the provider.
///
/// ```ignore
/// let mut vfs = Vfs::new();
/// vfs.mount("assets", FileSystemProvider::new("./assets"));
///
/// // Reads ./assets/textures/brick.png
/// let bytes = vfs.read("assets/textures/brick.png")?;
/// ```
pub struct FileSystemProvider {
    root: PathBuf,
}

impl FileSystemProvider {
    /// Create a provider rooted at the given directory.
    ///
    /// The directory does not need to exist yet.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory on disk.
    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

impl VfsProvider for FileSystemProvider {
    fn read(&self, path: &str) -> Result<Vec<u8>, VfsError> {
        Ok(std::fs::read(self.resolve(path))?)
    }

    fn exists(&self, path: &str) -> Result<bool, VfsError> {
        Ok(self.resolve(path).exists())
    }

    fn list_dir(&self, path: &str) -> Result<Vec<String>, VfsError> {
        let full_path = self.resolve(path);
        if !full_path.is_dir() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(full_path)? {
            if let Some(name) = entry?.file_name().to_str() {
                entries.push(name.to_owned());
            }
        }
        entries.sort();
        Ok(entries)
    }

    fn is_read_only(&self) -> bool {
        false
    }

    fn write(&self, path: &str, data: &[u8]) -> Result<(), VfsError> {
        let full_path = self.resolve(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(full_path, data)?;
        Ok(())
    }

    fn delete(&self, path: &str) -> Result<(), VfsError> {
        std::fs::remove_file(self.resolve(path))?;
        Ok(())
    }

    fn create_dir(&self, path: &str) -> Result<(), VfsError> {
        std::fs::create_dir_all(self.resolve(path))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("ember_vfs_test_{name}"));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn write_creates_parent_dirs() {
        let dir = temp_dir("write_parents");
        let provider = FileSystemProvider::new(&dir);
        provider
            .write("shaders/dummy/vs_pbr.bin", b"blob")
            .unwrap();
        assert_eq!(provider.read("shaders/dummy/vs_pbr.bin").unwrap(), b"blob");
        assert!(dir.join("shaders/dummy/vs_pbr.bin").is_file());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = temp_dir("missing");
        let provider = FileSystemProvider::new(&dir);
        assert!(provider.read("nope.bin").unwrap_err().is_not_found());
        assert!(!provider.exists("nope.bin").unwrap());
    }

    #[test]
    fn list_dir_sorted() {
        let dir = temp_dir("list");
        let provider = FileSystemProvider::new(&dir);
        provider.write("b.txt", b"").unwrap();
        provider.write("a.txt", b"").unwrap();
        provider.create_dir("sub").unwrap();
        assert_eq!(provider.list_dir("").unwrap(), vec!["a.txt", "b.txt", "sub"]);
        assert!(provider.list_dir("absent").unwrap().is_empty());

        provider.delete("a.txt").unwrap();
        assert_eq!(provider.list_dir("").unwrap(), vec!["b.txt", "sub"]);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
