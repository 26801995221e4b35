//! Material descriptions as they arrive from an importer.
//!
//! - [`MaterialTextureType`] - Semantic kind of a texture input
//! - [`SceneMaterial`] - Per-instance texture references and factors

mod types;

pub use types::{MaterialTextureType, SceneMaterial};
