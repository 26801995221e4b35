//! Imported scene description.
//!
//! These types are format-agnostic and can be produced by any importer
//! or built programmatically. They are read-only input to the scene consumer.
//!
//! - [`Scene`] - Flat tables of nodes, meshes, materials, textures and animations
//! - [`SceneNode`] - A node with a local transform and mesh references
//! - [`SceneMesh`] - Mesh statistics, material reference and skinning influence
//! - [`SceneTexture`] - A source texture file
//! - [`SceneAnimation`] / [`AnimationTrack`] - Keyframe animations

mod types;

pub use types::{
    AnimationProperty, AnimationTrack, NodeTransform, Scene, SceneAnimation, SceneMesh, SceneNode,
    SceneTexture,
};
