//! # Ember Graphics
//!
//! Turns material descriptions into compiled, linked shader programs and
//! compiled textures for one graphics backend.
//!
//! ## Overview
//!
//! This crate provides:
//! - [`ShaderComposer`] - GLSL `#include` resolution and naga compilation
//! - [`BuildQueue`] - Two-phase submit/flush compile protocol, with
//!   [`BuildTaskQueue`] as the real implementation
//! - [`ShaderSchema`] - Uber-shader variants of one material type
//! - [`MaterialTypeRegistry`] - Material archetypes and their texture slots
//! - [`resolve_material`] - Texture slot resolution for a material instance
//!
//! ## Example
//!
//! ```ignore
//! let config = PipelineConfig::load("pipeline.ron")?;
//! let mut ctx = BuildContext::from_config(&config);
//! let mut registry = MaterialTypeRegistry::with_builtin_types();
//!
//! let pbr = registry.find(materials::builtin::PBR).unwrap();
//! let ty = registry.get_mut(pbr).unwrap();
//! ty.schema_mut().build_all(&mut ctx);
//! let resolved = resolve_material(Some(&material), ty, &scene.textures, &mut ctx);
//! ```

pub mod backend;
pub mod build;
pub mod config;
pub mod context;
pub mod error;
pub mod loader;
pub mod materials;
pub mod path;
pub mod shader;

pub use backend::{DummyDevice, GraphicsBackend, ProgramHandle, ShaderDevice, ShaderHandle};
pub use build::{BuildKind, BuildQueue, BuildReport, BuildTask, BuildTaskQueue, PlaceholderQueue};
pub use config::PipelineConfig;
pub use context::BuildContext;
pub use error::GraphicsError;
pub use loader::ResourceLoader;
pub use materials::{
    resolve_material, resolve_textures, MaterialType, MaterialTypeId, MaterialTypeRegistry,
    ResolvedMaterial, ShaderSchema, ShaderStatus, TextureResolution, Uber, UberOptions,
};
pub use path::PathResolver;
pub use shader::{ShaderComposer, ShaderStage};

/// Graphics library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
