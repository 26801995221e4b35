//! Texture slot resolution.
//!
//! [`resolve_textures`] decides, without side effects, which textures a
//! material instance needs compiled and which uber options they switch on.
//! [`resolve_material`] then compiles and loads what was decided.
//!
//! Rules, in order:
//!
//! 1. Required kinds are scanned in registration order. The first one that
//!    is absent from the material, has no slot, or points at a texture the
//!    scene does not have degrades the whole material to
//!    [`ShaderStatus::MissingTextures`] with no textures at all.
//! 2. Optional kinds are scanned in registration order. An absent one is
//!    skipped. One without a slot degrades like rule 1.
//! 3. A present optional kind activates its [`Uber`] option if the schema
//!    registered it, otherwise the option is skipped with a warning.
//! 4. Each slot is compiled once. The first kind scanned in a shared slot
//!    owns it and its texture is the one loaded.

use std::collections::{BTreeMap, BTreeSet};

use ember_core::material::{MaterialTextureType, SceneMaterial};
use ember_core::scene::SceneTexture;
use ember_core::StringCrc;

use crate::backend::ProgramHandle;
use crate::build::{BuildTask, ColorSpace};
use crate::context::BuildContext;
use crate::path::PathResolver;

use super::material_type::MaterialType;
use super::uber::{ShaderStatus, Uber, UberOptions};

/// A texture chosen to back one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTexture {
    pub slot: u32,
    /// Kind that owns the slot.
    pub kind: MaterialTextureType,
    /// Index into the scene texture table.
    pub texture: usize,
    pub input: String,
    pub output: String,
}

/// Fragment variant a resolution selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedVariant {
    Options(UberOptions),
    Status(ShaderStatus),
}

impl ResolvedVariant {
    pub fn fingerprint(&self) -> StringCrc {
        match self {
            Self::Options(options) => options.fingerprint(),
            Self::Status(status) => status.fingerprint(),
        }
    }
}

/// Outcome of [`resolve_textures`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureResolution {
    pub variant: ResolvedVariant,
    /// Textures to compile and load, one per slot, in scan order.
    pub textures: Vec<ResolvedTexture>,
}

impl TextureResolution {
    fn missing_textures() -> Self {
        Self {
            variant: ResolvedVariant::Status(ShaderStatus::MissingTextures),
            textures: Vec::new(),
        }
    }

    pub fn fingerprint(&self) -> StringCrc {
        self.variant.fingerprint()
    }

    pub fn is_missing_textures(&self) -> bool {
        self.variant == ResolvedVariant::Status(ShaderStatus::MissingTextures)
    }
}

/// Why a texture kind could not be used.
enum Lookup {
    Found(usize, u32),
    Absent,
    NoSlot,
    Dangling(usize),
}

fn lookup(
    material: Option<&SceneMaterial>,
    ty: &MaterialType,
    textures: &[SceneTexture],
    kind: MaterialTextureType,
) -> Lookup {
    let Some(texture) = material.and_then(|m| m.texture(kind)) else {
        return Lookup::Absent;
    };
    let Some(slot) = ty.texture_slot(kind) else {
        return Lookup::NoSlot;
    };
    if texture >= textures.len() {
        return Lookup::Dangling(texture);
    }
    Lookup::Found(texture, slot)
}

/// Decide textures and uber options for `material` against `ty`.
///
/// Pure: the same inputs always produce the same resolution.
pub fn resolve_textures(
    material: Option<&SceneMaterial>,
    ty: &MaterialType,
    textures: &[SceneTexture],
    paths: &PathResolver,
) -> TextureResolution {
    let label = material.map_or("<none>", |m| m.name.as_str());
    let mut owned_slots = BTreeSet::new();
    let mut chosen = Vec::new();

    let mut choose = |kind: MaterialTextureType,
                      texture: usize,
                      slot: u32,
                      chosen: &mut Vec<ResolvedTexture>| {
        if !owned_slots.insert(slot) {
            log::trace!("{label}: slot {slot} already compiled, {} shares it", kind.name());
            return;
        }
        let input = paths.texture_source_path(&textures[texture].path);
        let output = paths.texture_output_path(&input);
        chosen.push(ResolvedTexture {
            slot,
            kind,
            texture,
            input,
            output,
        });
    };

    for &kind in ty.required_texture_types() {
        match lookup(material, ty, textures, kind) {
            Lookup::Found(texture, slot) => choose(kind, texture, slot, &mut chosen),
            Lookup::Absent => {
                log::error!(
                    "Material {label} lacks required {} texture for {}",
                    kind.name(),
                    ty.name()
                );
                return TextureResolution::missing_textures();
            }
            Lookup::NoSlot => {
                log::error!("{} has no slot for required {} texture", ty.name(), kind.name());
                return TextureResolution::missing_textures();
            }
            Lookup::Dangling(texture) => {
                log::error!(
                    "Material {label} references missing texture {texture} for {}",
                    kind.name()
                );
                return TextureResolution::missing_textures();
            }
        }
    }

    let mut options = UberOptions::new();
    for &kind in ty.optional_texture_types() {
        match lookup(material, ty, textures, kind) {
            Lookup::Found(texture, slot) => {
                match Uber::for_texture(kind) {
                    Some(uber) if ty.schema().is_option_registered(uber) => {
                        options.push(uber);
                    }
                    Some(uber) => log::warn!(
                        "{}: option {uber} for {} is not registered",
                        ty.name(),
                        kind.name()
                    ),
                    None => log::warn!(
                        "{}: {} texture has no uber option",
                        ty.name(),
                        kind.name()
                    ),
                }
                choose(kind, texture, slot, &mut chosen);
            }
            Lookup::Absent => {
                log::warn!("Material {label} has no optional {} texture", kind.name());
            }
            Lookup::NoSlot => {
                log::error!("{} has no slot for optional {} texture", ty.name(), kind.name());
                return TextureResolution::missing_textures();
            }
            Lookup::Dangling(texture) => {
                log::warn!(
                    "Material {label} references missing texture {texture} for optional {}",
                    kind.name()
                );
            }
        }
    }

    TextureResolution {
        variant: ResolvedVariant::Options(options),
        textures: chosen,
    }
}

/// Compiled program and loaded textures for one material instance.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedMaterial {
    pub fingerprint: StringCrc,
    /// `None` if the variant failed to build; render with a fallback.
    pub program: Option<ProgramHandle>,
    /// Loaded texture blobs by slot. Slots whose blob was empty are omitted.
    pub textures: BTreeMap<u32, Vec<u8>>,
}

/// Resolve, then compile the chosen textures and fetch the program.
pub fn resolve_material(
    material: Option<&SceneMaterial>,
    ty: &mut MaterialType,
    scene_textures: &[SceneTexture],
    ctx: &mut BuildContext,
) -> ResolvedMaterial {
    ember_core::profile_scope!("resolve_material");

    let resolution = resolve_textures(material, ty, scene_textures, &ctx.paths);
    let program = match &resolution.variant {
        ResolvedVariant::Options(options) => ty.schema_mut().program_for_options(options, ctx),
        ResolvedVariant::Status(status) => ty.schema_mut().status_program(*status, ctx),
    };

    let mut textures = BTreeMap::new();
    if !resolution.textures.is_empty() {
        for texture in &resolution.textures {
            ctx.queue.submit(BuildTask::texture(
                ColorSpace::for_kind(texture.kind),
                texture.input.clone(),
                texture.output.clone(),
            ));
        }
        ctx.queue.flush();

        for texture in &resolution.textures {
            let blob = ctx.loader.load(&texture.output);
            if blob.is_empty() {
                log::error!(
                    "Skipping empty {} texture for slot {} ({})",
                    texture.kind.name(),
                    texture.slot,
                    texture.output
                );
                continue;
            }
            textures.insert(texture.slot, blob);
        }
    }

    ResolvedMaterial {
        fingerprint: resolution.fingerprint(),
        program,
        textures,
    }
}
