use std::collections::BTreeSet;

use ember_graphics::materials::builtin;
use ember_graphics::{MaterialType, MaterialTypeId, MaterialTypeRegistry};

use crate::world::World;

/// A [`World`] together with the material types its entities resolve
/// against and the scene nodes already imported into it.
///
/// The four built-in material types are registered on construction.
#[derive(Debug)]
pub struct SceneWorld {
    pub(crate) world: World,
    pub(crate) registry: MaterialTypeRegistry,
    /// Ids of consumed nodes. Ids are assumed append-only across imports.
    pub(crate) imported_nodes: BTreeSet<u32>,
    pbr: MaterialTypeId,
    animation: MaterialTypeId,
    terrain: MaterialTypeId,
    ddgi: MaterialTypeId,
}

impl SceneWorld {
    pub fn new() -> Self {
        let mut registry = MaterialTypeRegistry::new();
        let pbr = registry.register(builtin::pbr());
        let animation = registry.register(builtin::animation());
        let terrain = registry.register(builtin::terrain());
        let ddgi = registry.register(builtin::ddgi());
        Self {
            world: World::new(),
            registry,
            imported_nodes: BTreeSet::new(),
            pbr,
            animation,
            terrain,
            ddgi,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn registry(&self) -> &MaterialTypeRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut MaterialTypeRegistry {
        &mut self.registry
    }

    pub fn pbr_material_type(&self) -> MaterialTypeId {
        self.pbr
    }

    pub fn animation_material_type(&self) -> MaterialTypeId {
        self.animation
    }

    pub fn terrain_material_type(&self) -> MaterialTypeId {
        self.terrain
    }

    pub fn ddgi_material_type(&self) -> MaterialTypeId {
        self.ddgi
    }

    pub fn material_type(&self, id: MaterialTypeId) -> Option<&MaterialType> {
        self.registry.get(id)
    }

    /// Whether entities were already created for scene node `id`.
    pub fn is_node_imported(&self, id: u32) -> bool {
        self.imported_nodes.contains(&id)
    }

    pub fn imported_node_count(&self) -> usize {
        self.imported_nodes.len()
    }
}

impl Default for SceneWorld {
    fn default() -> Self {
        Self::new()
    }
}
