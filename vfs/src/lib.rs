//! Virtual file system for the Ember asset pipeline.
//!
//! Provides a unified, blocking API for reading and writing assets from
//! several storage backends through the [`VfsProvider`] trait and the
//! [`Vfs`] router.
//!
//! # Mount points
//!
//! The pipeline mounts three sources:
//!
//! - `assets`: source shaders and textures (usually a [`FileSystemProvider`])
//! - `artifacts`: compiled shader and texture output, keyed by backend
//! - `builtin`: shaders compiled into the binary (a [`MemoryProvider`])
//!
//! # Read-Only vs Read-Write
//!
//! All providers must implement read operations. Write operations are optional
//! and default to returning [`VfsError::ReadOnly`]. Use
//! [`VfsProvider::is_read_only()`] to check capability.

mod error;
#[cfg(feature = "filesystem")]
mod filesystem;
mod memory;
pub mod path;
mod provider;
mod vfs;

pub use error::VfsError;
#[cfg(feature = "filesystem")]
pub use filesystem::FileSystemProvider;
pub use memory::MemoryProvider;
pub use provider::VfsProvider;
pub use vfs::Vfs;
