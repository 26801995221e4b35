//! Deterministic artifact paths.

use ember_vfs::path::{file_stem, join, parent};

use crate::backend::GraphicsBackend;

/// VFS mount holding source assets.
pub const ASSET_MOUNT: &str = "assets";

/// VFS mount holding compiled artifacts.
pub const ARTIFACT_MOUNT: &str = "artifacts";

/// Maps a source path plus backend and option string to its artifact path.
///
/// ```ignore
/// let paths = PathResolver::new(GraphicsBackend::Vulkan);
/// assert_eq!(
///     paths.shader_output_path("builtin/shaders/fs_pbr.glsl", "EMISSIVE_MAP;IBL"),
///     "artifacts/shaders/vulkan/fs_pbr_EMISSIVE_MAP_IBL.bin",
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathResolver {
    backend: GraphicsBackend,
}

impl PathResolver {
    pub fn new(backend: GraphicsBackend) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> GraphicsBackend {
        self.backend
    }

    /// `artifacts/shaders/<backend>/<stem>[_<opt>...].bin`
    pub fn shader_output_path(&self, input: &str, options: &str) -> String {
        let mut name = file_stem(input).to_string();
        for token in options.split(';').filter(|t| !t.is_empty()) {
            name.push('_');
            name.push_str(token);
        }
        name.push_str(".bin");
        join(&self.shader_dir(), &name)
    }

    /// `artifacts/textures/<dir>/<stem>.dds`, mirroring the source directory
    /// below the asset mount so same-named files never share an artifact.
    pub fn texture_output_path(&self, input: &str) -> String {
        let relative = input
            .strip_prefix(ASSET_MOUNT)
            .and_then(|rest| rest.strip_prefix('/'))
            .unwrap_or(input);
        let dir = join(&join(ARTIFACT_MOUNT, "textures"), parent(relative));
        join(&dir, &format!("{}.dds", file_stem(relative)))
    }

    pub fn shader_dir(&self) -> String {
        join(&join(ARTIFACT_MOUNT, "shaders"), self.backend.name())
    }

    /// VFS path of a scene texture, whose path is relative to the asset root.
    pub fn texture_source_path(&self, relative: &str) -> String {
        join(ASSET_MOUNT, relative)
    }

    /// Sidecar recording the inputs an artifact was built from.
    pub fn sidecar_path(output: &str) -> String {
        format!("{output}.crc")
    }
}
