//! Internal glTF import logic.
//!
//! The [`ImportContext`] holds the parsed document and the scene being
//! assembled. Import order matters: materials before meshes (mesh material
//! indices are validated), meshes before nodes (nodes reference the flattened
//! primitive list).

use std::collections::HashMap;

use crate::material::{MaterialTextureType, SceneMaterial};
use crate::scene::{
    AnimationProperty, AnimationTrack, NodeTransform, Scene, SceneAnimation, SceneMesh, SceneNode,
    SceneTexture,
};

use super::error::GltfError;

/// Joint influences per vertex for primitives carrying `JOINTS_0`.
const GLTF_JOINT_INFLUENCES: u32 = 4;

pub(crate) struct ImportContext {
    document: gltf_dep::Document,
    /// GLB binary chunk, used to read animation keyframes.
    blob: Option<Vec<u8>>,
    scene: Scene,
    /// glTF image index → scene texture index.
    image_textures: HashMap<usize, usize>,
    /// glTF mesh index → scene mesh indices (one per primitive).
    mesh_index_map: Vec<Vec<usize>>,
}

/// Scene texture table plus the glTF image lookup that dedupes it.
struct TextureTable<'a> {
    textures: &'a mut Vec<SceneTexture>,
    by_image: &'a mut HashMap<usize, usize>,
}

impl TextureTable<'_> {
    /// Scene texture index for a glTF texture, registering it on first use.
    fn resolve(&mut self, texture: gltf_dep::Texture<'_>, kind: MaterialTextureType) -> Option<usize> {
        let image = texture.source();
        if let Some(&index) = self.by_image.get(&image.index()) {
            return Some(index);
        }

        match image.source() {
            gltf_dep::image::Source::Uri { uri, .. } if !uri.starts_with("data:") => {
                let index = self.textures.len();
                self.textures.push(SceneTexture::new(kind, uri));
                self.by_image.insert(image.index(), index);
                Some(index)
            }
            _ => {
                log::warn!(
                    "glTF image {} is embedded; {} texture is not imported",
                    image.index(),
                    kind.name()
                );
                None
            }
        }
    }
}

impl ImportContext {
    pub fn new(document: gltf_dep::Document, blob: Option<Vec<u8>>) -> Self {
        Self {
            document,
            blob,
            scene: Scene::new(),
            image_textures: HashMap::new(),
            mesh_index_map: Vec::new(),
        }
    }

    pub fn finish(self) -> Scene {
        self.scene
    }

    pub fn import_materials(&mut self) {
        let mut textures = TextureTable {
            textures: &mut self.scene.textures,
            by_image: &mut self.image_textures,
        };

        for (index, material) in self.document.materials().enumerate() {
            let name = material
                .name()
                .map(String::from)
                .unwrap_or_else(|| format!("material_{index}"));
            let pbr = material.pbr_metallic_roughness();

            let mut out = SceneMaterial::new(name)
                .with_base_color_factor(pbr.base_color_factor())
                .with_metallic_roughness(pbr.metallic_factor(), pbr.roughness_factor())
                .with_emissive_factor(material.emissive_factor())
                .with_two_sided(material.double_sided());

            let metallic_roughness = pbr.metallic_roughness_texture().map(|info| info.texture());
            let bindings = [
                (
                    MaterialTextureType::BaseColor,
                    pbr.base_color_texture().map(|info| info.texture()),
                ),
                (
                    MaterialTextureType::Normal,
                    material.normal_texture().map(|info| info.texture()),
                ),
                (
                    MaterialTextureType::Occlusion,
                    material.occlusion_texture().map(|info| info.texture()),
                ),
                // Packed: G = roughness, B = metallic.
                (MaterialTextureType::Roughness, metallic_roughness.clone()),
                (MaterialTextureType::Metallic, metallic_roughness),
                (
                    MaterialTextureType::Emissive,
                    material.emissive_texture().map(|info| info.texture()),
                ),
            ];

            for (kind, texture) in bindings {
                if let Some(texture_index) = texture.and_then(|t| textures.resolve(t, kind)) {
                    out.textures.insert(kind, texture_index);
                }
            }

            self.scene.materials.push(out);
        }
    }

    pub fn import_meshes(&mut self) -> Result<(), GltfError> {
        let material_count = self.scene.materials.len();
        for mesh in self.document.meshes() {
            let base_name = mesh
                .name()
                .map(String::from)
                .unwrap_or_else(|| format!("mesh_{}", mesh.index()));
            let primitive_count = mesh.primitives().len();
            let mut indices = Vec::with_capacity(primitive_count);

            for primitive in mesh.primitives() {
                let positions = primitive.get(&gltf_dep::Semantic::Positions).ok_or(
                    GltfError::MissingPositions {
                        mesh: mesh.index(),
                        primitive: primitive.index(),
                    },
                )?;
                let vertex_count = positions.count() as u32;
                let index_count = primitive
                    .indices()
                    .map(|a| a.count() as u32)
                    .unwrap_or(vertex_count);
                let polygon_count = match polygon_count(primitive.mode(), index_count) {
                    Ok(count) => count,
                    Err(e) => {
                        log::warn!(
                            "Skipping mesh {} primitive {}: {e}",
                            mesh.index(),
                            primitive.index()
                        );
                        continue;
                    }
                };

                let name = if primitive_count > 1 {
                    format!("{base_name}_{}", primitive.index())
                } else {
                    base_name.clone()
                };
                let mut out = SceneMesh::new(name, vertex_count, polygon_count);

                if let Some(material) = primitive.material().index() {
                    if material >= material_count {
                        return Err(GltfError::InvalidReference(format!(
                            "mesh {} references material {material}",
                            mesh.index()
                        )));
                    }
                    out = out.with_material(material);
                }
                if primitive.get(&gltf_dep::Semantic::Joints(0)).is_some() {
                    out = out.with_influences(GLTF_JOINT_INFLUENCES);
                }

                indices.push(self.scene.meshes.len());
                self.scene.meshes.push(out);
            }

            self.mesh_index_map.push(indices);
        }
        Ok(())
    }

    pub fn import_nodes(&mut self) -> Result<(), GltfError> {
        for node in self.document.nodes() {
            let (translation, rotation, scale) = node.transform().decomposed();
            let transform = NodeTransform::IDENTITY
                .with_translation(translation)
                .with_rotation(rotation)
                .with_scale(scale);

            let meshes = match node.mesh() {
                Some(mesh) => self
                    .mesh_index_map
                    .get(mesh.index())
                    .cloned()
                    .ok_or_else(|| {
                        GltfError::InvalidReference(format!(
                            "node {} references mesh {}",
                            node.index(),
                            mesh.index()
                        ))
                    })?,
                None => Vec::new(),
            };

            let mut out = SceneNode::new(node.index() as u32)
                .with_transform(transform)
                .with_meshes(meshes);
            if let Some(name) = node.name() {
                out = out.with_name(name);
            }
            self.scene.nodes.push(out);
        }
        Ok(())
    }

    pub fn import_animations(&mut self) {
        use gltf_dep::animation::util::ReadOutputs;

        let blob = self.blob.as_deref();
        for animation in self.document.animations() {
            let mut duration = 0.0f32;
            let mut tracks = Vec::new();

            for channel in animation.channels() {
                let property = match channel.target().property() {
                    gltf_dep::animation::Property::Translation => AnimationProperty::Translation,
                    gltf_dep::animation::Property::Rotation => AnimationProperty::Rotation,
                    gltf_dep::animation::Property::Scale => AnimationProperty::Scale,
                    gltf_dep::animation::Property::MorphTargetWeights => {
                        log::debug!("Skipping morph target channel");
                        continue;
                    }
                };

                let input = channel.sampler().input();
                let input_max = input
                    .max()
                    .and_then(|max| max.get(0).and_then(|v| v.as_f64()))
                    .unwrap_or(0.0) as f32;

                let reader = channel.reader(|buffer| match buffer.source() {
                    gltf_dep::buffer::Source::Bin => blob,
                    gltf_dep::buffer::Source::Uri(_) => None,
                });
                let times: Vec<f32> = reader
                    .read_inputs()
                    .map(|iter| iter.collect())
                    .unwrap_or_default();
                let values: Vec<f32> = match reader.read_outputs() {
                    Some(ReadOutputs::Translations(iter)) | Some(ReadOutputs::Scales(iter)) => {
                        iter.flatten().collect()
                    }
                    Some(ReadOutputs::Rotations(rotations)) => {
                        rotations.into_f32().flatten().collect()
                    }
                    _ => Vec::new(),
                };

                let times_max = times.iter().copied().fold(0.0f32, f32::max);
                duration = duration.max(input_max).max(times_max);

                tracks.push(AnimationTrack {
                    node: channel.target().node().index() as u32,
                    property,
                    times,
                    values,
                });
            }

            // glTF keyframe times are in seconds.
            let mut out = SceneAnimation::new(duration, 1.0).with_tracks(tracks);
            if let Some(name) = animation.name() {
                out = out.with_name(name);
            }
            self.scene.animations.push(out);
        }
    }
}

/// Triangles described by `index_count` indices drawn with `mode`.
fn polygon_count(mode: gltf_dep::mesh::Mode, index_count: u32) -> Result<u32, GltfError> {
    match mode {
        gltf_dep::mesh::Mode::Triangles => Ok(index_count / 3),
        gltf_dep::mesh::Mode::TriangleStrip | gltf_dep::mesh::Mode::TriangleFan => {
            Ok(index_count.saturating_sub(2))
        }
        other => Err(GltfError::UnsupportedTopology(format!("{other:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::super::import_gltf;
    use crate::material::MaterialTextureType;
    use crate::scene::AnimationProperty;

    const HELMET: &str = r#"{
        "asset": { "version": "2.0" },
        "scene": 0,
        "scenes": [{ "nodes": [0, 1] }],
        "nodes": [
            { "name": "helmet", "mesh": 0, "translation": [1.0, 2.0, 3.0] },
            { "name": "rig", "mesh": 1 }
        ],
        "meshes": [
            { "name": "helmet", "primitives": [{ "attributes": { "POSITION": 0 }, "indices": 1, "material": 0 }] },
            { "name": "body", "primitives": [{ "attributes": { "POSITION": 0, "JOINTS_0": 2, "WEIGHTS_0": 3 } }] }
        ],
        "materials": [{
            "name": "visor",
            "pbrMetallicRoughness": {
                "baseColorTexture": { "index": 0 },
                "metallicRoughnessTexture": { "index": 1 },
                "metallicFactor": 0.5,
                "roughnessFactor": 0.25
            },
            "normalTexture": { "index": 2 },
            "doubleSided": true
        }],
        "textures": [{ "source": 0 }, { "source": 1 }, { "source": 2 }],
        "images": [
            { "uri": "textures/helmet_albedo.png" },
            { "uri": "textures/helmet_orm.png" },
            { "uri": "textures/helmet_normal.png" }
        ],
        "accessors": [
            { "componentType": 5126, "count": 3, "type": "VEC3", "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0] },
            { "componentType": 5123, "count": 6, "type": "SCALAR" },
            { "componentType": 5123, "count": 3, "type": "VEC4" },
            { "componentType": 5126, "count": 3, "type": "VEC4" },
            { "componentType": 5126, "count": 2, "type": "SCALAR", "min": [0.0], "max": [2.0] },
            { "componentType": 5126, "count": 2, "type": "VEC3" }
        ],
        "animations": [{
            "name": "walk",
            "samplers": [{ "input": 4, "output": 5 }],
            "channels": [{ "sampler": 0, "target": { "node": 1, "path": "translation" } }]
        }]
    }"#;

    #[test]
    fn imports_nodes_and_meshes() {
        let scene = import_gltf(HELMET.as_bytes()).unwrap();
        assert_eq!(scene.nodes.len(), 2);
        assert_eq!(scene.nodes[0].id, 0);
        assert_eq!(scene.nodes[0].transform.translation, [1.0, 2.0, 3.0]);
        assert_eq!(scene.nodes[1].meshes, vec![1]);

        assert_eq!(scene.meshes[0].vertex_count, 3);
        assert_eq!(scene.meshes[0].polygon_count, 2);
        assert_eq!(scene.meshes[0].material, Some(0));
        assert!(!scene.meshes[0].is_skinned());
        assert!(scene.meshes[1].is_skinned());
    }

    #[test]
    fn packed_metallic_roughness_shares_texture() {
        let scene = import_gltf(HELMET.as_bytes()).unwrap();
        let material = &scene.materials[0];
        assert_eq!(material.name, "visor");
        assert!(material.two_sided);
        assert_eq!(material.metallic_factor, 0.5);
        assert_eq!(
            material.texture(MaterialTextureType::Roughness),
            material.texture(MaterialTextureType::Metallic)
        );
        assert_eq!(material.texture(MaterialTextureType::Occlusion), None);
        assert_eq!(scene.textures.len(), 3);

        let albedo = material.texture(MaterialTextureType::BaseColor).unwrap();
        assert_eq!(scene.textures[albedo].path, "textures/helmet_albedo.png");
        assert_eq!(scene.textures[albedo].kind, MaterialTextureType::BaseColor);
    }

    #[test]
    fn animation_duration_from_accessor_max() {
        let scene = import_gltf(HELMET.as_bytes()).unwrap();
        let animation = &scene.animations[0];
        assert_eq!(animation.name.as_deref(), Some("walk"));
        assert_eq!(animation.duration, 2.0);
        assert_eq!(animation.tracks.len(), 1);
        assert_eq!(animation.tracks[0].node, 1);
        assert_eq!(animation.tracks[0].property, AnimationProperty::Translation);
    }

    const MIXED_TOPOLOGY: &str = r#"{
        "asset": { "version": "2.0" },
        "nodes": [{ "name": "mixed", "mesh": 0 }],
        "meshes": [{
            "name": "mixed",
            "primitives": [
                { "attributes": { "POSITION": 0 }, "mode": 4 },
                { "attributes": { "POSITION": 0 }, "mode": 0 },
                { "attributes": { "POSITION": 0 }, "mode": 1 },
                { "attributes": { "POSITION": 0 }, "mode": 5 }
            ]
        }],
        "accessors": [
            { "componentType": 5126, "count": 4, "type": "VEC3", "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0] }
        ]
    }"#;

    #[test]
    fn non_triangle_primitives_are_skipped() {
        let scene = import_gltf(MIXED_TOPOLOGY.as_bytes()).unwrap();
        let names: Vec<_> = scene.meshes.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["mixed_0", "mixed_3"]);
        // Four triangle-list vertices make one triangle; a four-vertex strip makes two.
        assert_eq!(scene.meshes[0].polygon_count, 1);
        assert_eq!(scene.meshes[1].polygon_count, 2);
        assert_eq!(scene.nodes[0].meshes, vec![0, 1]);
    }

    #[rstest::rstest]
    #[case::list(gltf_dep::mesh::Mode::Triangles, 6, 2)]
    #[case::strip(gltf_dep::mesh::Mode::TriangleStrip, 5, 3)]
    #[case::fan(gltf_dep::mesh::Mode::TriangleFan, 2, 0)]
    fn triangle_topologies_count_polygons(
        #[case] mode: gltf_dep::mesh::Mode,
        #[case] indices: u32,
        #[case] expected: u32,
    ) {
        assert_eq!(super::polygon_count(mode, indices).unwrap(), expected);
    }

    #[test]
    fn line_topology_is_unsupported() {
        let err = super::polygon_count(gltf_dep::mesh::Mode::Lines, 4).unwrap_err();
        assert!(err.to_string().starts_with("unsupported topology"));
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let err = import_gltf(b"{ not gltf").unwrap_err();
        assert!(err.to_string().starts_with("glTF parse error"));
    }
}
