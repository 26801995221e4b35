//! # Ember ECS Standard
//!
//! Runtime representation of imported scenes: the standard components, a
//! world with one store per component kind, and the consumer that turns a
//! [`Scene`](ember_core::scene::Scene) into shader-bound entities.
//!
//! ## Components
//!
//! - [`Transform`] - Local TRS of the source node
//! - [`Name`] - Mesh name
//! - [`StaticMesh`] - Mesh statistics and the vertex layout of its material type
//! - [`Material`] - Resolved shader variant, program and texture blobs
//! - [`Animation`] - Playback state for skinned meshes
//!
//! ## Import
//!
//! - [`SceneWorld`] - World plus material type registry and import bookkeeping
//! - [`SceneConsumer`] - Creates entities and resolves materials

pub mod components;
mod consumer;
mod scene_world;
pub mod world;

pub use components::*;
pub use consumer::SceneConsumer;
pub use scene_world::SceneWorld;
pub use world::{Component, ComponentKind, World};
