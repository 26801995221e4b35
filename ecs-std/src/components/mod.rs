mod animation;
mod material;
mod mesh;
mod name;
mod transform;

pub use animation::{Animation, MAX_BONES};
pub use material::Material;
pub use mesh::StaticMesh;
pub use name::Name;
pub use transform::Transform;
