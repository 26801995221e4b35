//! Vertex layout types.
//!
//! A [`VertexLayout`] lists interleaved attributes in a single vertex stream.
//! Offsets are assigned in insertion order, so two layouts built with the
//! same attribute sequence are equal.

/// Semantic meaning of a vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexAttributeSemantic {
    /// Vertex position.
    Position,
    /// Vertex normal.
    Normal,
    /// Tangent vector with handedness in w.
    Tangent,
    /// First texture coordinate set.
    TexCoord0,
    /// Vertex color.
    Color,
    /// Skinning joint indices.
    Joints,
    /// Skinning joint weights.
    Weights,
}

/// Data format of a vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexAttributeFormat {
    Float2,
    Float3,
    Float4,
    Uint4,
    Unorm8x4,
}

impl VertexAttributeFormat {
    /// Size of one element in bytes.
    pub fn size(&self) -> u32 {
        match self {
            Self::Float2 => 8,
            Self::Float3 => 12,
            Self::Float4 | Self::Uint4 => 16,
            Self::Unorm8x4 => 4,
        }
    }
}

/// A single vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexAttribute {
    pub semantic: VertexAttributeSemantic,
    pub format: VertexAttributeFormat,
    /// Byte offset within the vertex.
    pub offset: u32,
}

/// Interleaved vertex layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct VertexLayout {
    attributes: Vec<VertexAttribute>,
    stride: u32,
}

impl VertexLayout {
    /// Create an empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an attribute after the existing ones.
    #[must_use]
    pub fn with_attribute(
        mut self,
        semantic: VertexAttributeSemantic,
        format: VertexAttributeFormat,
    ) -> Self {
        self.attributes.push(VertexAttribute {
            semantic,
            format,
            offset: self.stride,
        });
        self.stride += format.size();
        self
    }

    /// Position, normal, tangent and one UV set.
    pub fn position_normal_tangent_uv() -> Self {
        Self::new()
            .with_attribute(VertexAttributeSemantic::Position, VertexAttributeFormat::Float3)
            .with_attribute(VertexAttributeSemantic::Normal, VertexAttributeFormat::Float3)
            .with_attribute(VertexAttributeSemantic::Tangent, VertexAttributeFormat::Float4)
            .with_attribute(VertexAttributeSemantic::TexCoord0, VertexAttributeFormat::Float2)
    }

    /// Position, normal and one UV set.
    pub fn position_normal_uv() -> Self {
        Self::new()
            .with_attribute(VertexAttributeSemantic::Position, VertexAttributeFormat::Float3)
            .with_attribute(VertexAttributeSemantic::Normal, VertexAttributeFormat::Float3)
            .with_attribute(VertexAttributeSemantic::TexCoord0, VertexAttributeFormat::Float2)
    }

    /// Skinned layout: position, normal, UV, joints and weights.
    pub fn skinned() -> Self {
        Self::position_normal_uv()
            .with_attribute(VertexAttributeSemantic::Joints, VertexAttributeFormat::Uint4)
            .with_attribute(VertexAttributeSemantic::Weights, VertexAttributeFormat::Float4)
    }

    /// Attributes in stream order.
    pub fn attributes(&self) -> &[VertexAttribute] {
        &self.attributes
    }

    /// Size of one vertex in bytes.
    pub fn stride(&self) -> u32 {
        self.stride
    }

    /// Check if this layout has a specific semantic.
    pub fn has_semantic(&self, semantic: VertexAttributeSemantic) -> bool {
        self.attributes.iter().any(|attr| attr.semantic == semantic)
    }

    /// Get an attribute by semantic.
    pub fn get_attribute(&self, semantic: VertexAttributeSemantic) -> Option<&VertexAttribute> {
        self.attributes.iter().find(|attr| attr.semantic == semantic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_follow_insertion_order() {
        let layout = VertexLayout::position_normal_tangent_uv();
        let offsets: Vec<u32> = layout.attributes().iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 12, 24, 40]);
        assert_eq!(layout.stride(), 48);
    }

    #[test]
    fn skinned_has_joints_and_weights() {
        let layout = VertexLayout::skinned();
        assert!(layout.has_semantic(VertexAttributeSemantic::Joints));
        assert!(layout.has_semantic(VertexAttributeSemantic::Weights));
        assert!(!layout.has_semantic(VertexAttributeSemantic::Tangent));
        let weights = layout
            .get_attribute(VertexAttributeSemantic::Weights)
            .unwrap();
        assert_eq!(weights.offset, 48);
        assert_eq!(layout.stride(), 64);
    }

    #[test]
    fn empty_layout() {
        let layout = VertexLayout::new();
        assert!(layout.attributes().is_empty());
        assert_eq!(layout.stride(), 0);
    }
}
