//! Dummy shader device for testing and headless imports.
//!
//! Hands out sequential handles and records what it was asked to create.
//! Empty blobs are rejected, matching a real device refusing bad bytecode.

use crate::error::GraphicsError;
use crate::shader::ShaderStage;

use super::{GraphicsBackend, ProgramHandle, ShaderDevice, ShaderHandle};

/// Dummy shader device.
#[derive(Debug, Default)]
pub struct DummyDevice {
    backend: GraphicsBackend,
    shaders: Vec<(ShaderStage, String)>,
    programs: Vec<(ShaderHandle, ShaderHandle)>,
}

impl DummyDevice {
    /// Create a dummy device for the dummy backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dummy device that claims to consume another backend's artifacts.
    pub fn for_backend(backend: GraphicsBackend) -> Self {
        Self {
            backend,
            ..Self::default()
        }
    }

    /// Number of shader objects created so far.
    pub fn shader_count(&self) -> usize {
        self.shaders.len()
    }

    /// Number of programs linked so far.
    pub fn program_count(&self) -> usize {
        self.programs.len()
    }

    /// Label a shader was created with.
    pub fn shader_label(&self, handle: ShaderHandle) -> Option<&str> {
        self.shaders
            .get(handle.0 as usize)
            .map(|(_, label)| label.as_str())
    }
}

impl ShaderDevice for DummyDevice {
    fn create_shader(
        &mut self,
        stage: ShaderStage,
        blob: &[u8],
        label: &str,
    ) -> Result<ShaderHandle, GraphicsError> {
        if blob.is_empty() {
            return Err(GraphicsError::ShaderLinkFailed(format!(
                "empty {stage:?} blob for {label}"
            )));
        }
        let handle = ShaderHandle(self.shaders.len() as u32);
        log::trace!(
            "DummyDevice: creating {stage:?} shader {label} ({} bytes) -> {handle:?}",
            blob.len()
        );
        self.shaders.push((stage, label.to_owned()));
        Ok(handle)
    }

    fn create_program(
        &mut self,
        vertex: ShaderHandle,
        fragment: ShaderHandle,
    ) -> Result<ProgramHandle, GraphicsError> {
        let stage_of = |h: ShaderHandle| self.shaders.get(h.0 as usize).map(|(stage, _)| *stage);
        if stage_of(vertex) != Some(ShaderStage::Vertex)
            || stage_of(fragment) != Some(ShaderStage::Fragment)
        {
            return Err(GraphicsError::ShaderLinkFailed(format!(
                "cannot link {vertex:?} with {fragment:?}"
            )));
        }
        let handle = ProgramHandle(self.programs.len() as u32);
        log::trace!("DummyDevice: linking {vertex:?} + {fragment:?} -> {handle:?}");
        self.programs.push((vertex, fragment));
        Ok(handle)
    }

    fn backend(&self) -> GraphicsBackend {
        self.backend
    }
}
