//! Graphics backend identity and the shader device seam.
//!
//! The pipeline never draws. What it needs from a GPU API is narrow: turn a
//! compiled shader blob into a shader object, and link a vertex/fragment
//! pair into a program. [`ShaderDevice`] is that seam. [`DummyDevice`]
//! implements it without a GPU for tests and headless imports.
//!
//! # Available Backends
//!
//! - `Dummy`: no GPU; artifacts are WGSL text
//! - `Wgpu`: artifacts are WGSL text
//! - `Vulkan`: artifacts are SPIR-V words

pub mod dummy;

use serde::{Deserialize, Serialize};

use crate::error::GraphicsError;
use crate::shader::ShaderStage;

pub use dummy::DummyDevice;

/// Graphics API the artifacts are compiled for.
///
/// The backend name keys the artifact directory, so switching backend needs
/// a fresh artifact set but leaves sources untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GraphicsBackend {
    #[default]
    Dummy,
    Vulkan,
    Wgpu,
}

/// Code format written for compiled shaders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderFormat {
    Wgsl,
    SpirV,
}

impl GraphicsBackend {
    /// Directory name used for this backend's artifacts.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Dummy => "dummy",
            Self::Vulkan => "vulkan",
            Self::Wgpu => "wgpu",
        }
    }

    /// Shader code format this backend consumes.
    pub fn shader_format(&self) -> ShaderFormat {
        match self {
            Self::Vulkan => ShaderFormat::SpirV,
            Self::Dummy | Self::Wgpu => ShaderFormat::Wgsl,
        }
    }
}

impl std::fmt::Display for GraphicsBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Handle to a device shader object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderHandle(pub u32);

/// Handle to a linked vertex + fragment program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramHandle(pub u32);

/// Creates shader objects and programs from compiled blobs.
pub trait ShaderDevice: Send {
    /// Create a shader object from a compiled blob.
    fn create_shader(
        &mut self,
        stage: ShaderStage,
        blob: &[u8],
        label: &str,
    ) -> Result<ShaderHandle, GraphicsError>;

    /// Link a vertex and a fragment shader into a program.
    fn create_program(
        &mut self,
        vertex: ShaderHandle,
        fragment: ShaderHandle,
    ) -> Result<ProgramHandle, GraphicsError>;

    /// Backend the device consumes artifacts for.
    fn backend(&self) -> GraphicsBackend;
}
