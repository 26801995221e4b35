//! Material data types.

use std::collections::BTreeMap;

/// Semantic kind of a texture bound to a material.
///
/// Declaration order is the canonical iteration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MaterialTextureType {
    BaseColor,
    Normal,
    Occlusion,
    Roughness,
    Metallic,
    Emissive,
    Elevation,
    AlphaMap,
}

impl MaterialTextureType {
    /// Every texture kind in declaration order.
    pub const ALL: [Self; 8] = [
        Self::BaseColor,
        Self::Normal,
        Self::Occlusion,
        Self::Roughness,
        Self::Metallic,
        Self::Emissive,
        Self::Elevation,
        Self::AlphaMap,
    ];

    /// Human readable name, used in log messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::BaseColor => "BaseColor",
            Self::Normal => "Normal",
            Self::Occlusion => "Occlusion",
            Self::Roughness => "Roughness",
            Self::Metallic => "Metallic",
            Self::Emissive => "Emissive",
            Self::Elevation => "Elevation",
            Self::AlphaMap => "AlphaMap",
        }
    }

    /// Whether texels hold color (sRGB encoded) rather than linear data.
    pub const fn is_color(self) -> bool {
        matches!(self, Self::BaseColor | Self::Emissive)
    }
}

/// A material instance from an imported scene.
///
/// Texture references are indices into [`crate::scene::Scene::textures`].
/// Several kinds may reference the same texture (packed channels).
#[derive(Debug, Clone, PartialEq)]
pub struct SceneMaterial {
    /// Material name.
    pub name: String,
    /// Texture index per kind.
    pub textures: BTreeMap<MaterialTextureType, usize>,
    /// Base color multiplier (linear RGBA).
    pub base_color_factor: [f32; 4],
    /// Emissive color multiplier (linear RGB).
    pub emissive_factor: [f32; 3],
    /// Metallic multiplier.
    pub metallic_factor: f32,
    /// Roughness multiplier.
    pub roughness_factor: f32,
    /// Disable back-face culling.
    pub two_sided: bool,
    /// UV offset applied before sampling.
    pub uv_offset: [f32; 2],
    /// UV scale applied before sampling.
    pub uv_scale: [f32; 2],
}

impl SceneMaterial {
    /// Create a material with default factors and no textures.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            textures: BTreeMap::new(),
            base_color_factor: [1.0, 1.0, 1.0, 1.0],
            emissive_factor: [0.0, 0.0, 0.0],
            metallic_factor: 1.0,
            roughness_factor: 1.0,
            two_sided: false,
            uv_offset: [0.0, 0.0],
            uv_scale: [1.0, 1.0],
        }
    }

    /// Reference a texture for a kind.
    #[must_use]
    pub fn with_texture(mut self, kind: MaterialTextureType, texture: usize) -> Self {
        self.textures.insert(kind, texture);
        self
    }

    /// Set the base color factor.
    #[must_use]
    pub fn with_base_color_factor(mut self, factor: [f32; 4]) -> Self {
        self.base_color_factor = factor;
        self
    }

    /// Set metallic and roughness factors.
    #[must_use]
    pub fn with_metallic_roughness(mut self, metallic: f32, roughness: f32) -> Self {
        self.metallic_factor = metallic;
        self.roughness_factor = roughness;
        self
    }

    /// Set the emissive factor.
    #[must_use]
    pub fn with_emissive_factor(mut self, factor: [f32; 3]) -> Self {
        self.emissive_factor = factor;
        self
    }

    /// Set the two-sided flag.
    #[must_use]
    pub fn with_two_sided(mut self, two_sided: bool) -> Self {
        self.two_sided = two_sided;
        self
    }

    /// Set UV offset and scale.
    #[must_use]
    pub fn with_uv_transform(mut self, offset: [f32; 2], scale: [f32; 2]) -> Self {
        self.uv_offset = offset;
        self.uv_scale = scale;
        self
    }

    /// Texture index for a kind, if the material references one.
    pub fn texture(&self, kind: MaterialTextureType) -> Option<usize> {
        self.textures.get(&kind).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_material_has_no_textures() {
        let material = SceneMaterial::new("plain");
        assert_eq!(material.name, "plain");
        assert!(material.textures.is_empty());
        assert_eq!(material.base_color_factor, [1.0; 4]);
        assert_eq!(material.uv_scale, [1.0, 1.0]);
    }

    #[test]
    fn packed_kinds_share_texture() {
        let material = SceneMaterial::new("orm")
            .with_texture(MaterialTextureType::Roughness, 4)
            .with_texture(MaterialTextureType::Metallic, 4);
        assert_eq!(material.texture(MaterialTextureType::Roughness), Some(4));
        assert_eq!(material.texture(MaterialTextureType::Metallic), Some(4));
        assert_eq!(material.texture(MaterialTextureType::Occlusion), None);
    }

    #[test]
    fn color_kinds() {
        assert!(MaterialTextureType::BaseColor.is_color());
        assert!(MaterialTextureType::Emissive.is_color());
        assert!(!MaterialTextureType::Normal.is_color());
        assert!(!MaterialTextureType::Elevation.is_color());
    }
}
