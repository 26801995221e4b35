use std::fmt;

/// Errors returned by virtual file system operations.
#[derive(Debug)]
pub enum VfsError {
    /// Nothing exists at the path.
    NotFound(String),
    /// The provider hit an OS-level error.
    Io(std::io::Error),
    /// The path failed normalization.
    InvalidPath(String),
    /// The first path segment names no mounted provider and no default is set.
    NoProvider(String),
    /// A write reached a provider that only supports reads.
    ReadOnly(String),
}

impl VfsError {
    /// Whether the error means "the file is not there", as opposed to a
    /// failure while accessing it.
    pub fn is_not_found(&self) -> bool {
        matches!(self, VfsError::NotFound(_))
    }
}

impl fmt::Display for VfsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VfsError::NotFound(path) => write!(f, "file not found: {path}"),
            VfsError::Io(err) => write!(f, "IO error: {err}"),
            VfsError::InvalidPath(reason) => write!(f, "invalid path: {reason}"),
            VfsError::NoProvider(source) => write!(f, "no provider mounted for '{source}'"),
            VfsError::ReadOnly(path) => write!(f, "cannot write '{path}': provider is read-only"),
        }
    }
}

impl std::error::Error for VfsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VfsError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for VfsError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => VfsError::NotFound(err.to_string()),
            _ => VfsError::Io(err),
        }
    }
}
