use ember_core::mesh::VertexLayout;
use ember_core::scene::SceneMesh;

/// Links an entity to an imported mesh and the vertex layout its material
/// type expects.
///
/// Skinned meshes use the same component with a non-zero influence count;
/// their entity also carries an [`Animation`](super::Animation).
#[derive(Debug, Clone, PartialEq)]
pub struct StaticMesh {
    /// Index into the scene mesh table.
    pub mesh: usize,
    pub vertex_layout: VertexLayout,
    pub vertex_count: u32,
    pub polygon_count: u32,
    /// Joint influences per vertex. Zero for static meshes.
    pub vertex_influence_count: u32,
}

impl StaticMesh {
    pub fn new(mesh: usize, data: &SceneMesh, vertex_layout: VertexLayout) -> Self {
        Self {
            mesh,
            vertex_layout,
            vertex_count: data.vertex_count,
            polygon_count: data.polygon_count,
            vertex_influence_count: data.vertex_influence_count,
        }
    }

    pub fn is_skinned(&self) -> bool {
        self.vertex_influence_count > 0
    }

    /// Size of the interleaved vertex buffer this mesh needs.
    pub fn vertex_buffer_size(&self) -> u64 {
        u64::from(self.vertex_count) * u64::from(self.vertex_layout.stride())
    }
}
