//! glTF 2.0 scene importer.
//!
//! Reads `.gltf`/`.glb` metadata into a [`Scene`] description. Vertex data
//! is not decoded here: the description only carries mesh statistics,
//! material texture references and animation tracks.
//!
//! # Texture references
//!
//! Only images referenced by URI become [`SceneTexture`](crate::scene::SceneTexture)
//! entries, since texture build tasks read their source from the asset tree.
//! Embedded images are skipped with a warning and the material slot is left empty.
//!
//! The packed `metallicRoughness` texture is referenced by both
//! [`MaterialTextureType::Roughness`](crate::material::MaterialTextureType::Roughness)
//! and [`MaterialTextureType::Metallic`](crate::material::MaterialTextureType::Metallic).
//!
//! # Example
//!
//! ```ignore
//! use ember_core::gltf::import_gltf;
//!
//! let data = std::fs::read("assets/models/helmet.gltf")?;
//! let scene = import_gltf(&data)?;
//! println!("Meshes: {}", scene.meshes.len());
//! ```

mod error;
mod importer;

pub use error::GltfError;

use crate::scene::Scene;

/// Import a glTF document from binary data.
///
/// Node ids are the glTF node indices. Each primitive becomes one scene mesh.
pub fn import_gltf(data: &[u8]) -> Result<Scene, GltfError> {
    crate::profile_function!();

    let gltf = gltf_dep::Gltf::from_slice(data)?;
    let blob = gltf.blob.clone();
    let mut ctx = importer::ImportContext::new(gltf.document, blob);

    ctx.import_materials();
    ctx.import_meshes()?;
    ctx.import_nodes()?;
    ctx.import_animations();

    let scene = ctx.finish();
    log::info!(
        "Imported glTF scene: {} nodes, {} meshes, {} materials, {} textures, {} animations",
        scene.nodes.len(),
        scene.meshes.len(),
        scene.materials.len(),
        scene.textures.len(),
        scene.animations.len()
    );
    Ok(scene)
}
