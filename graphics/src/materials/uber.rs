//! Uber-shader options and their fingerprints.

use std::fmt;

use ember_core::material::MaterialTextureType;
use ember_core::StringCrc;

/// A fragment-shader feature toggle.
///
/// Declaration order is the canonical sort order used when fingerprinting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Uber {
    AlbedoMap,
    NormalMap,
    OrmMap,
    EmissiveMap,
    Ibl,
    Atm,
    Default,
}

impl Uber {
    pub const ALL: [Self; 7] = [
        Self::AlbedoMap,
        Self::NormalMap,
        Self::OrmMap,
        Self::EmissiveMap,
        Self::Ibl,
        Self::Atm,
        Self::Default,
    ];

    /// Preprocessor token, as seen by `#ifdef` in the shader.
    pub const fn token(self) -> &'static str {
        match self {
            Self::AlbedoMap => "ALBEDO_MAP",
            Self::NormalMap => "NORMAL_MAP",
            Self::OrmMap => "ORM_MAP",
            Self::EmissiveMap => "EMISSIVE_MAP",
            Self::Ibl => "IBL",
            Self::Atm => "ATM",
            Self::Default => "DEFAULT",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|uber| uber.token() == token)
    }

    /// Option switched on when a texture of `kind` is bound.
    pub const fn for_texture(kind: MaterialTextureType) -> Option<Self> {
        match kind {
            MaterialTextureType::BaseColor => Some(Self::AlbedoMap),
            MaterialTextureType::Normal => Some(Self::NormalMap),
            MaterialTextureType::Occlusion
            | MaterialTextureType::Roughness
            | MaterialTextureType::Metallic => Some(Self::OrmMap),
            MaterialTextureType::Emissive => Some(Self::EmissiveMap),
            MaterialTextureType::Elevation | MaterialTextureType::AlphaMap => None,
        }
    }
}

impl fmt::Display for Uber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Ordered set of active options for one resolution.
///
/// Insertion order is kept for logging. The option string and fingerprint
/// sort by [`Uber`] declaration order, so they do not depend on the order
/// options were pushed in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UberOptions {
    active: Vec<Uber>,
}

impl UberOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate an option. Returns `false` if it was already active.
    pub fn push(&mut self, uber: Uber) -> bool {
        if self.active.contains(&uber) {
            return false;
        }
        self.active.push(uber);
        true
    }

    /// Deactivate an option. Returns `false` if it was not active.
    pub fn remove(&mut self, uber: Uber) -> bool {
        match self.active.iter().position(|u| *u == uber) {
            Some(index) => {
                self.active.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }

    pub fn contains(&self, uber: Uber) -> bool {
        self.active.contains(&uber)
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Uber> + '_ {
        self.active.iter().copied()
    }

    /// Options in canonical order.
    pub fn sorted(&self) -> Vec<Uber> {
        let mut sorted = self.active.clone();
        sorted.sort();
        sorted
    }

    /// Canonical option string, e.g. `"EMISSIVE_MAP;IBL"`.
    pub fn option_string(&self) -> String {
        self.sorted()
            .into_iter()
            .map(Uber::token)
            .collect::<Vec<_>>()
            .join(";")
    }

    pub fn fingerprint(&self) -> StringCrc {
        StringCrc::new(&self.option_string())
    }
}

impl FromIterator<Uber> for UberOptions {
    fn from_iter<I: IntoIterator<Item = Uber>>(iter: I) -> Self {
        let mut options = Self::new();
        for uber in iter {
            options.push(uber);
        }
        options
    }
}

impl From<&[Uber]> for UberOptions {
    fn from(options: &[Uber]) -> Self {
        options.iter().copied().collect()
    }
}

/// Special fragment variant outside the option space, addressed by the
/// fingerprint of its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStatus {
    /// A required texture was missing or had no slot.
    MissingTextures,
    /// Resources are still being built.
    Loading,
}

impl ShaderStatus {
    pub const fn name(self) -> &'static str {
        match self {
            Self::MissingTextures => "MissingTextures",
            Self::Loading => "Loading",
        }
    }

    pub fn fingerprint(self) -> StringCrc {
        StringCrc::new(self.name())
    }

    /// Built-in fragment shader for this status.
    pub const fn fragment_path(self) -> &'static str {
        match self {
            Self::MissingTextures => "builtin/shaders/fs_missing_textures.glsl",
            Self::Loading => "builtin/shaders/fs_loading.glsl",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::base(&[], "")]
    #[case::single(&[Uber::EmissiveMap], "EMISSIVE_MAP")]
    #[case::sorted(&[Uber::Ibl, Uber::EmissiveMap], "EMISSIVE_MAP;IBL")]
    #[case::orm_before_emissive(&[Uber::EmissiveMap, Uber::OrmMap, Uber::AlbedoMap], "ALBEDO_MAP;ORM_MAP;EMISSIVE_MAP")]
    fn test_option_string(#[case] options: &[Uber], #[case] expected: &str) {
        assert_eq!(UberOptions::from(options).option_string(), expected);
    }

    #[test]
    fn test_fingerprint_ignores_push_order() {
        let a: UberOptions = [Uber::Ibl, Uber::EmissiveMap].into_iter().collect();
        let b: UberOptions = [Uber::EmissiveMap, Uber::Ibl].into_iter().collect();
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint(), StringCrc::new("EMISSIVE_MAP;IBL"));
    }

    #[test]
    fn test_base_fingerprint_is_empty_crc() {
        assert_eq!(UberOptions::new().fingerprint(), StringCrc::EMPTY);
    }

    #[test]
    fn test_push_remove_clear() {
        let mut options = UberOptions::new();
        assert!(options.push(Uber::OrmMap));
        assert!(!options.push(Uber::OrmMap));
        assert!(options.push(Uber::Atm));
        assert_eq!(options.len(), 2);

        assert!(options.remove(Uber::OrmMap));
        assert!(!options.remove(Uber::OrmMap));
        assert_eq!(options.iter().collect::<Vec<_>>(), [Uber::Atm]);

        options.clear();
        assert!(options.is_empty());
    }

    #[rstest]
    #[case(MaterialTextureType::BaseColor, Some(Uber::AlbedoMap))]
    #[case(MaterialTextureType::Normal, Some(Uber::NormalMap))]
    #[case(MaterialTextureType::Occlusion, Some(Uber::OrmMap))]
    #[case(MaterialTextureType::Roughness, Some(Uber::OrmMap))]
    #[case(MaterialTextureType::Metallic, Some(Uber::OrmMap))]
    #[case(MaterialTextureType::Emissive, Some(Uber::EmissiveMap))]
    #[case(MaterialTextureType::Elevation, None)]
    #[case(MaterialTextureType::AlphaMap, None)]
    fn test_texture_mapping(#[case] kind: MaterialTextureType, #[case] expected: Option<Uber>) {
        assert_eq!(Uber::for_texture(kind), expected);
    }

    #[test]
    fn test_token_round_trip() {
        for uber in Uber::ALL {
            assert_eq!(Uber::from_token(uber.token()), Some(uber));
        }
        assert_eq!(Uber::from_token("MissingTextures"), None);
    }

    #[test]
    fn test_status_fingerprints() {
        assert_eq!(
            ShaderStatus::MissingTextures.fingerprint(),
            StringCrc::new("MissingTextures")
        );
        assert_ne!(
            ShaderStatus::Loading.fingerprint(),
            UberOptions::new().fingerprint()
        );
    }
}
