//! The material types every scene world starts with.

use ember_core::material::MaterialTextureType::*;
use ember_core::mesh::VertexLayout;

use crate::shader::library::BUILTIN_SHADER_DIR;

use super::material_type::MaterialType;
use super::schema::ShaderSchema;
use super::uber::{ShaderStatus, Uber};

pub const PBR: &str = "pbr";
pub const ANIMATION: &str = "animation";
pub const TERRAIN: &str = "terrain";
pub const DDGI: &str = "ddgi";

fn builtin_schema(vertex: &str, fragment: &str) -> ShaderSchema {
    ShaderSchema::new(
        format!("{BUILTIN_SHADER_DIR}/{vertex}.glsl"),
        format!("{BUILTIN_SHADER_DIR}/{fragment}.glsl"),
    )
}

/// Metallic-roughness PBR with packed occlusion/roughness/metallic.
pub fn pbr() -> MaterialType {
    let mut schema = builtin_schema("vs_pbr", "fs_pbr");
    for uber in [Uber::EmissiveMap, Uber::Ibl, Uber::Atm] {
        schema.register_option(uber);
    }
    let combines: [&[Uber]; 6] = [
        &[],
        &[Uber::EmissiveMap],
        &[Uber::Ibl],
        &[Uber::EmissiveMap, Uber::Ibl],
        &[Uber::Atm],
        &[Uber::EmissiveMap, Uber::Atm],
    ];
    for combine in combines {
        schema.add_combine(combine);
    }
    schema.add_status(ShaderStatus::Loading);

    let mut ty = MaterialType::new(PBR, VertexLayout::position_normal_tangent_uv(), schema);
    ty.add_required_texture_type(BaseColor, 0);
    ty.add_required_texture_type(Normal, 1);
    ty.add_required_texture_type(Occlusion, 2);
    ty.add_required_texture_type(Roughness, 2);
    ty.add_required_texture_type(Metallic, 2);
    ty.add_optional_texture_type(Emissive, 3);
    ty
}

/// Skinned meshes. No textures, no options.
pub fn animation() -> MaterialType {
    MaterialType::new(
        ANIMATION,
        VertexLayout::skinned(),
        builtin_schema("vs_animation", "fs_animation"),
    )
}

/// Height-displaced terrain.
pub fn terrain() -> MaterialType {
    let mut schema = builtin_schema("vs_terrain", "fs_terrain");
    schema.register_option(Uber::Default);
    schema.add_combine(&[Uber::Default]);

    let mut ty = MaterialType::new(TERRAIN, VertexLayout::position_normal_uv(), schema);
    ty.add_required_texture_type(Elevation, 1);
    ty.add_optional_texture_type(AlphaMap, 2);
    ty
}

/// Probe-ray shading for dynamic diffuse GI. Every PBR slot is optional.
pub fn ddgi() -> MaterialType {
    let mut schema = builtin_schema("vs_ddgi", "fs_ddgi");
    for uber in [Uber::AlbedoMap, Uber::NormalMap, Uber::OrmMap, Uber::EmissiveMap] {
        schema.register_option(uber);
    }

    let mut ty = MaterialType::new(DDGI, VertexLayout::position_normal_tangent_uv(), schema);
    ty.add_optional_texture_type(BaseColor, 0);
    ty.add_optional_texture_type(Normal, 1);
    ty.add_optional_texture_type(Occlusion, 2);
    ty.add_optional_texture_type(Roughness, 2);
    ty.add_optional_texture_type(Metallic, 2);
    ty.add_optional_texture_type(Emissive, 3);
    ty
}
