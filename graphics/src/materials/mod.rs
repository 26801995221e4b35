//! Material types, shader variants and texture slot resolution.
//!
//! - [`Uber`] / [`UberOptions`]: fragment feature toggles and their fingerprints
//! - [`ShaderSchema`]: per-type vertex shader plus fingerprint-keyed fragment programs
//! - [`MaterialType`] / [`MaterialTypeRegistry`]: layouts, texture slots, schemas
//! - [`resolve_textures`] / [`resolve_material`]: picking textures and a variant for an instance

pub mod builtin;
mod material_type;
mod registry;
mod resolver;
mod schema;
mod uber;

pub use material_type::MaterialType;
pub use registry::{MaterialTypeId, MaterialTypeRegistry};
pub use resolver::{
    resolve_material, resolve_textures, ResolvedMaterial, ResolvedTexture, ResolvedVariant,
    TextureResolution,
};
pub use schema::ShaderSchema;
pub use uber::{ShaderStatus, Uber, UberOptions};
