use crate::VfsError;

/// Trait for virtual file system backends.
///
/// All operations block the calling thread. Providers must be `Send + Sync`
/// because build tasks read sources and write artifacts from worker threads.
///
/// # Read vs Write
///
/// All providers must implement read operations (`read`, `exists`, `list_dir`).
/// Write operations (`write`, `delete`, `create_dir`) default to
/// [`VfsError::ReadOnly`].
///
/// # Path Contract
///
/// Paths passed to provider methods are already normalized by the [`Vfs`](crate::Vfs)
/// router: forward slashes, no leading/trailing slashes, no `..` or `.` segments.
/// The path is relative to the provider's root (the source prefix has been stripped).
pub trait VfsProvider: Send + Sync + 'static {
    /// Read the entire contents of a file at the given path.
    fn read(&self, path: &str) -> Result<Vec<u8>, VfsError>;

    /// Check whether a file exists at the given path.
    fn exists(&self, path: &str) -> Result<bool, VfsError>;

    /// List the immediate children of a directory, sorted by name.
    ///
    /// Returns an empty vec for non-existent directories.
    fn list_dir(&self, path: &str) -> Result<Vec<String>, VfsError>;

    /// Whether this provider is read-only.
    fn is_read_only(&self) -> bool {
        true
    }

    /// Write data to a file, creating parent directories and overwriting it.
    fn write(&self, path: &str, _data: &[u8]) -> Result<(), VfsError> {
        Err(VfsError::ReadOnly(path.to_owned()))
    }

    /// Delete a file at the given path.
    fn delete(&self, path: &str) -> Result<(), VfsError> {
        Err(VfsError::ReadOnly(path.to_owned()))
    }

    /// Create a directory at the given path.
    fn create_dir(&self, path: &str) -> Result<(), VfsError> {
        Err(VfsError::ReadOnly(path.to_owned()))
    }
}
