//! # Ember ECS
//!
//! Minimal entity storage: generational [`Entity`] handles issued by an
//! [`EntityAllocator`], and typed [`SparseSet`] component stores.
//!
//! Worlds built on top of this crate own one `SparseSet` per component
//! kind, which keeps the set of component types closed and checked at
//! compile time.

mod entity;
mod sparse_set;

pub use entity::{Entity, EntityAllocator};
pub use sparse_set::SparseSet;
