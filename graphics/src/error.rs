//! Graphics error types.

use std::fmt;

use ember_vfs::VfsError;

/// Errors that can occur while building and loading render resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphicsError {
    /// GLSL parsing, validation or code generation failed.
    ShaderCompilationFailed(String),
    /// The device refused to create a shader or program.
    ShaderLinkFailed(String),
    /// A texture could not be decoded or encoded.
    TextureCompilationFailed(String),
    /// Reading a source or writing an artifact failed.
    Io(String),
    /// An invalid parameter was provided.
    InvalidParameter(String),
    /// The pipeline configuration could not be read.
    Config(String),
}

impl fmt::Display for GraphicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShaderCompilationFailed(msg) => write!(f, "shader compilation failed: {msg}"),
            Self::ShaderLinkFailed(msg) => write!(f, "shader link failed: {msg}"),
            Self::TextureCompilationFailed(msg) => write!(f, "texture compilation failed: {msg}"),
            Self::Io(msg) => write!(f, "io error: {msg}"),
            Self::InvalidParameter(msg) => write!(f, "invalid parameter: {msg}"),
            Self::Config(msg) => write!(f, "config error: {msg}"),
        }
    }
}

impl std::error::Error for GraphicsError {}

impl From<VfsError> for GraphicsError {
    fn from(err: VfsError) -> Self {
        Self::Io(err.to_string())
    }
}
