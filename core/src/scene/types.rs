//! Scene data types.
//!
//! All types use plain arrays (`[f32; 3]`, `[f32; 4]`, etc.) instead of
//! math library types to keep the core crate free of `glam`.
//! Cross references are indices into the owning [`Scene`]'s tables.

use crate::material::{MaterialTextureType, SceneMaterial};

/// Node transform decomposed into translation, rotation, and scale.
///
/// Uses plain arrays for portability. Convert to `glam` types as needed:
/// `Vec3::from(t.translation)`, `Quat::from_array(t.rotation)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeTransform {
    /// Translation [x, y, z].
    pub translation: [f32; 3],
    /// Rotation quaternion [x, y, z, w].
    pub rotation: [f32; 4],
    /// Scale [x, y, z].
    pub scale: [f32; 3],
}

impl NodeTransform {
    /// Identity transform: no translation, identity rotation, unit scale.
    pub const IDENTITY: Self = Self {
        translation: [0.0, 0.0, 0.0],
        rotation: [0.0, 0.0, 0.0, 1.0],
        scale: [1.0, 1.0, 1.0],
    };

    /// Returns this transform with a different translation.
    #[must_use]
    pub const fn with_translation(mut self, translation: [f32; 3]) -> Self {
        self.translation = translation;
        self
    }

    /// Returns this transform with a different rotation.
    #[must_use]
    pub const fn with_rotation(mut self, rotation: [f32; 4]) -> Self {
        self.rotation = rotation;
        self
    }

    /// Returns this transform with a different scale.
    #[must_use]
    pub const fn with_scale(mut self, scale: [f32; 3]) -> Self {
        self.scale = scale;
        self
    }
}

impl Default for NodeTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A node in the scene.
///
/// Node ids are assigned by the importer and grow monotonically when a scene
/// is appended to, which lets a consumer skip nodes it has already seen.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    /// Source identity of the node.
    pub id: u32,
    /// Node name, if any.
    pub name: Option<String>,
    /// Local transform relative to parent.
    pub transform: NodeTransform,
    /// Indices into [`Scene::meshes`].
    pub meshes: Vec<usize>,
}

impl SceneNode {
    /// Creates a node with identity transform and no meshes.
    pub fn new(id: u32) -> Self {
        Self {
            id,
            name: None,
            transform: NodeTransform::IDENTITY,
            meshes: Vec::new(),
        }
    }

    /// Set the node name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the local transform.
    #[must_use]
    pub fn with_transform(mut self, transform: NodeTransform) -> Self {
        self.transform = transform;
        self
    }

    /// Set the mesh indices.
    #[must_use]
    pub fn with_meshes(mut self, meshes: Vec<usize>) -> Self {
        self.meshes = meshes;
        self
    }
}

/// Mesh statistics as seen by the consumer.
///
/// Vertex data itself is streamed separately and is not part of the description.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneMesh {
    pub name: String,
    pub vertex_count: u32,
    pub polygon_count: u32,
    /// Index into [`Scene::materials`].
    pub material: Option<usize>,
    /// Number of joint influences per vertex. Zero for static meshes.
    pub vertex_influence_count: u32,
}

impl SceneMesh {
    /// Creates a static mesh without a material.
    pub fn new(name: impl Into<String>, vertex_count: u32, polygon_count: u32) -> Self {
        Self {
            name: name.into(),
            vertex_count,
            polygon_count,
            material: None,
            vertex_influence_count: 0,
        }
    }

    /// Set the material index.
    #[must_use]
    pub fn with_material(mut self, material: usize) -> Self {
        self.material = Some(material);
        self
    }

    /// Set the number of joint influences per vertex.
    #[must_use]
    pub fn with_influences(mut self, count: u32) -> Self {
        self.vertex_influence_count = count;
        self
    }

    /// Whether the mesh carries skinning data.
    pub fn is_skinned(&self) -> bool {
        self.vertex_influence_count > 0
    }

    /// Whether the mesh has at least one vertex and one polygon.
    pub fn has_geometry(&self) -> bool {
        self.vertex_count > 0 && self.polygon_count > 0
    }
}

/// A source texture file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneTexture {
    /// Kind the importer first saw this texture used as.
    pub kind: MaterialTextureType,
    /// Source path, relative to the asset root.
    pub path: String,
}

impl SceneTexture {
    pub fn new(kind: MaterialTextureType, path: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }
}

/// Property animated by a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationProperty {
    Translation,
    Rotation,
    Scale,
}

/// Keyframes targeting one node property.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationTrack {
    /// Target node id.
    pub node: u32,
    pub property: AnimationProperty,
    /// Keyframe times in ticks.
    pub times: Vec<f32>,
    /// Flattened keyframe values (3 or 4 components per key).
    pub values: Vec<f32>,
}

/// A keyframe animation.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneAnimation {
    pub name: Option<String>,
    /// Duration in ticks.
    pub duration: f32,
    pub ticks_per_second: f32,
    pub tracks: Vec<AnimationTrack>,
}

impl SceneAnimation {
    /// Creates an animation without tracks.
    pub fn new(duration: f32, ticks_per_second: f32) -> Self {
        Self {
            name: None,
            duration,
            ticks_per_second,
            tracks: Vec::new(),
        }
    }

    /// Set the animation name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the tracks.
    #[must_use]
    pub fn with_tracks(mut self, tracks: Vec<AnimationTrack>) -> Self {
        self.tracks = tracks;
        self
    }

    /// Duration in seconds.
    pub fn duration_seconds(&self) -> f32 {
        if self.ticks_per_second > 0.0 {
            self.duration / self.ticks_per_second
        } else {
            self.duration
        }
    }
}

/// An imported scene.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    /// Scene name, if any.
    pub name: Option<String>,
    pub nodes: Vec<SceneNode>,
    pub meshes: Vec<SceneMesh>,
    pub materials: Vec<SceneMaterial>,
    pub textures: Vec<SceneTexture>,
    pub animations: Vec<SceneAnimation>,
}

impl Scene {
    /// Creates a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scene name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the nodes.
    #[must_use]
    pub fn with_nodes(mut self, nodes: Vec<SceneNode>) -> Self {
        self.nodes = nodes;
        self
    }

    /// Set the meshes.
    #[must_use]
    pub fn with_meshes(mut self, meshes: Vec<SceneMesh>) -> Self {
        self.meshes = meshes;
        self
    }

    /// Set the materials.
    #[must_use]
    pub fn with_materials(mut self, materials: Vec<SceneMaterial>) -> Self {
        self.materials = materials;
        self
    }

    /// Set the textures.
    #[must_use]
    pub fn with_textures(mut self, textures: Vec<SceneTexture>) -> Self {
        self.textures = textures;
        self
    }

    /// Set the animations.
    #[must_use]
    pub fn with_animations(mut self, animations: Vec<SceneAnimation>) -> Self {
        self.animations = animations;
        self
    }

    /// Next free node id, for appending nodes to an existing scene.
    pub fn next_node_id(&self) -> u32 {
        self.nodes
            .iter()
            .map(|n| n.id.saturating_add(1))
            .max()
            .unwrap_or(0)
    }

    /// Append a node, returning its id.
    pub fn push_node(&mut self, mut node: SceneNode) -> u32 {
        node.id = self.next_node_id();
        let id = node.id;
        self.nodes.push(node);
        id
    }
}
