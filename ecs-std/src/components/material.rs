use std::collections::BTreeMap;

use ember_core::material::SceneMaterial;
use ember_core::StringCrc;
use ember_graphics::{ProgramHandle, ResolvedMaterial, ShaderStatus};

/// A material instance resolved against its material type.
///
/// Holds the selected shader variant, the linked program and the loaded
/// texture blobs, plus the factors the fragment shader reads as uniforms.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Name of the material type this was resolved against.
    pub material_type: String,
    /// Source material, `None` for types that take no instance data.
    pub material: Option<SceneMaterial>,
    pub fingerprint: StringCrc,
    pub program: Option<ProgramHandle>,
    /// Texture blobs by slot. Slots with no loaded texture are absent.
    pub textures: BTreeMap<u32, Vec<u8>>,

    pub base_color_factor: [f32; 4],
    pub emissive_factor: [f32; 3],
    pub metallic_factor: f32,
    pub roughness_factor: f32,
    pub two_sided: bool,
    pub uv_offset: [f32; 2],
    pub uv_scale: [f32; 2],
}

impl Material {
    pub fn new(
        material_type: impl Into<String>,
        material: Option<&SceneMaterial>,
        resolved: ResolvedMaterial,
    ) -> Self {
        let defaults = SceneMaterial::new("");
        let source = material.unwrap_or(&defaults);
        Self {
            material_type: material_type.into(),
            material: material.cloned(),
            fingerprint: resolved.fingerprint,
            program: resolved.program,
            textures: resolved.textures,
            base_color_factor: source.base_color_factor,
            emissive_factor: source.emissive_factor,
            metallic_factor: source.metallic_factor,
            roughness_factor: source.roughness_factor,
            two_sided: source.two_sided,
            uv_offset: source.uv_offset,
            uv_scale: source.uv_scale,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.material.as_ref().map(|m| m.name.as_str())
    }

    pub fn texture(&self, slot: u32) -> Option<&[u8]> {
        self.textures.get(&slot).map(Vec::as_slice)
    }

    /// Whether this resolved to the missing-textures fallback.
    pub fn is_missing_textures(&self) -> bool {
        self.fingerprint == ShaderStatus::MissingTextures.fingerprint()
    }
}
