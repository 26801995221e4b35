//! Vertex layout descriptions.
//!
//! - [`VertexLayout`] - Interleaved vertex attributes required by a material type
//! - [`VertexAttribute`] - A single attribute with semantic, format and offset

mod layout;

pub use layout::{VertexAttribute, VertexAttributeFormat, VertexAttributeSemantic, VertexLayout};
