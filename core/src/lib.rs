//! # Ember Core
//!
//! Scene descriptions, texture kinds, vertex layouts and string fingerprints
//! shared by the Ember asset pipeline.

pub mod crc;
#[cfg(feature = "gltf")]
pub mod gltf;
pub mod material;
pub mod mesh;
pub mod profiling;
pub mod scene;

pub use crc::StringCrc;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
