//! Built-in shader sources, embedded at compile time.
//!
//! Two kinds of file live in `graphics/shaders/`:
//!
//! | Kind | Location | Use |
//! |------|----------|-----|
//! | include | `ember/*.glsl` | resolved by `#include "ember/..."` |
//! | entry point | `vs_*`, `fs_*` | material shaders, mounted under `builtin/shaders/` |

use ember_vfs::MemoryProvider;

const COMMON_INCLUDE: &str = include_str!("../../shaders/ember/common.glsl");
const BRDF_INCLUDE: &str = include_str!("../../shaders/ember/brdf.glsl");

/// Entry-point shaders keyed by file name.
const BUILTIN_SHADERS: &[(&str, &str)] = &[
    ("vs_pbr.glsl", include_str!("../../shaders/vs_pbr.glsl")),
    ("fs_pbr.glsl", include_str!("../../shaders/fs_pbr.glsl")),
    ("vs_animation.glsl", include_str!("../../shaders/vs_animation.glsl")),
    ("fs_animation.glsl", include_str!("../../shaders/fs_animation.glsl")),
    ("vs_terrain.glsl", include_str!("../../shaders/vs_terrain.glsl")),
    ("fs_terrain.glsl", include_str!("../../shaders/fs_terrain.glsl")),
    ("vs_ddgi.glsl", include_str!("../../shaders/vs_ddgi.glsl")),
    ("fs_ddgi.glsl", include_str!("../../shaders/fs_ddgi.glsl")),
    (
        "fs_missing_textures.glsl",
        include_str!("../../shaders/fs_missing_textures.glsl"),
    ),
    ("fs_loading.glsl", include_str!("../../shaders/fs_loading.glsl")),
];

/// VFS directory the built-in entry points are mounted under.
pub const BUILTIN_SHADER_DIR: &str = "builtin/shaders";

/// Collection of includable shader modules.
pub struct ShaderLibrary {
    includes: Vec<(&'static str, &'static str)>,
}

impl ShaderLibrary {
    /// The `ember/*` includes shipped with the crate.
    pub fn builtin() -> Self {
        Self {
            includes: vec![
                ("ember/common.glsl", COMMON_INCLUDE),
                ("ember/brdf.glsl", BRDF_INCLUDE),
            ],
        }
    }

    pub fn empty() -> Self {
        Self {
            includes: Vec::new(),
        }
    }

    pub fn includes(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.includes.iter().copied()
    }

    pub fn with_include(mut self, path: &'static str, source: &'static str) -> Self {
        self.includes.push((path, source));
        self
    }

    /// Entry-point shaders as `(file name, source)`.
    pub fn builtin_shaders() -> impl Iterator<Item = (&'static str, &'static str)> {
        BUILTIN_SHADERS.iter().copied()
    }

    /// Memory provider holding every entry-point shader under `shaders/`,
    /// ready to be mounted as `builtin`.
    pub fn builtin_provider() -> MemoryProvider {
        let provider = MemoryProvider::new();
        for (name, source) in Self::builtin_shaders() {
            provider.insert(format!("shaders/{name}"), source.as_bytes().to_vec());
        }
        provider
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::GraphicsBackend;
    use crate::shader::{ShaderComposer, ShaderStage};
    use ember_vfs::VfsProvider;
    use rstest::rstest;

    #[test]
    fn test_builtin_includes() {
        let library = ShaderLibrary::builtin();
        let paths: Vec<_> = library.includes().map(|(path, _)| path).collect();
        assert_eq!(paths, ["ember/common.glsl", "ember/brdf.glsl"]);
    }

    #[test]
    fn test_includes_have_no_version_line() {
        for (path, source) in ShaderLibrary::builtin().includes() {
            assert!(!source.contains("#version"), "{path} declares a version");
        }
    }

    #[test]
    fn test_builtin_provider_contents() {
        let provider = ShaderLibrary::builtin_provider();
        assert_eq!(provider.len(), BUILTIN_SHADERS.len());
        assert!(provider.exists("shaders/fs_missing_textures.glsl").unwrap());
        let listed = provider.list_dir("shaders").unwrap();
        assert!(listed.iter().all(|name| name.starts_with("vs_") || name.starts_with("fs_")));
    }

    #[rstest]
    #[case::pbr_base("fs_pbr.glsl", "")]
    #[case::pbr_emissive_ibl("fs_pbr.glsl", "EMISSIVE_MAP;IBL")]
    #[case::pbr_atm("fs_pbr.glsl", "ATM")]
    #[case::animation("fs_animation.glsl", "")]
    #[case::terrain("fs_terrain.glsl", "DEFAULT")]
    #[case::ddgi_base("fs_ddgi.glsl", "")]
    #[case::ddgi_full("fs_ddgi.glsl", "ALBEDO_MAP;NORMAL_MAP;ORM_MAP;EMISSIVE_MAP")]
    #[case::missing("fs_missing_textures.glsl", "")]
    #[case::loading("fs_loading.glsl", "")]
    fn test_fragment_shaders_compile(#[case] name: &str, #[case] options: &str) {
        compile_builtin(name, ShaderStage::Fragment, options);
    }

    #[rstest]
    #[case::pbr("vs_pbr.glsl")]
    #[case::animation("vs_animation.glsl")]
    #[case::terrain("vs_terrain.glsl")]
    #[case::ddgi("vs_ddgi.glsl")]
    fn test_vertex_shaders_compile(#[case] name: &str) {
        compile_builtin(name, ShaderStage::Vertex, "");
    }

    fn compile_builtin(name: &str, stage: ShaderStage, options: &str) {
        let (_, source) = ShaderLibrary::builtin_shaders()
            .find(|(file, _)| *file == name)
            .unwrap();
        let composer = ShaderComposer::with_builtin_library();
        let result = composer.compile(source, stage, options, GraphicsBackend::Dummy);
        assert!(result.is_ok(), "{name} [{options}]: {:?}", result.err());
    }
}
