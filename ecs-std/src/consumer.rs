use ember_core::material::SceneMaterial;
use ember_core::scene::{Scene, SceneMesh, SceneNode};
use ember_ecs::Entity;
use ember_graphics::{resolve_material, BuildContext, MaterialType, MaterialTypeRegistry};

use crate::components::{Animation, Material, Name, StaticMesh, Transform};
use crate::scene_world::SceneWorld;
use crate::world::World;

/// Creates entities for the meshes of an imported [`Scene`].
///
/// Every mesh reference of every node at or above the minimum node id
/// becomes one entity with:
///
/// - **Transform**: the node's local transform
/// - **Name** + **StaticMesh**: from the scene mesh, with the vertex layout
///   of its material type
/// - **Material**: resolved against PBR for static meshes that reference a
///   material, or against the animation type with no instance for skinned
///   meshes
/// - **Animation**: skinned meshes only, bound to the scene's first animation
///
/// Meshes without vertices or polygons are logged and get no entity.
///
/// Nodes that were already imported into the [`SceneWorld`] are skipped, so
/// running the consumer again with the same minimum id adds nothing.
#[derive(Debug, Default)]
pub struct SceneConsumer {
    node_min_id: u32,
}

impl SceneConsumer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nodes with a lower id are left alone. Used when appending to a scene
    /// that was already consumed.
    pub fn set_node_min_id(&mut self, id: u32) {
        self.node_min_id = id;
    }

    pub fn node_min_id(&self) -> u32 {
        self.node_min_id
    }

    /// Consume `scene` into `scene_world`, returning the created entities.
    ///
    /// Compiles every PBR shader variant before the first entity is created.
    ///
    /// Node ids are treated as append-only within one `scene_world`: a node
    /// whose id was already imported, even from a different scene, is skipped.
    ///
    /// # Panics
    ///
    /// Panics if the scene declares no meshes.
    pub fn execute(
        &self,
        scene: &Scene,
        scene_world: &mut SceneWorld,
        ctx: &mut BuildContext,
    ) -> Vec<Entity> {
        ember_core::profile_scope!("scene_consumer_execute");

        let label = scene.name.as_deref().unwrap_or("<unnamed>");
        assert!(!scene.meshes.is_empty(), "Scene {label} declares no meshes");
        log::info!(
            "Importing scene {label}: {} nodes, {} meshes, from node {}",
            scene.nodes.len(),
            scene.meshes.len(),
            self.node_min_id
        );

        let pbr = scene_world.pbr_material_type();
        let animation = scene_world.animation_material_type();
        let SceneWorld {
            world,
            registry,
            imported_nodes,
            ..
        } = scene_world;

        if let Some(ty) = registry.get_mut(pbr) {
            let report = ty.schema_mut().build_all(ctx);
            log::info!("Material type {} shaders: {report}", ty.name());
        }

        let mut importer = NodeImporter {
            scene,
            world,
            registry,
            ctx,
            pbr,
            animation,
        };
        let mut created = Vec::new();
        for node in &scene.nodes {
            if node.id < self.node_min_id {
                continue;
            }
            if !imported_nodes.insert(node.id) {
                log::warn!("Node {} is already imported, skipping", node.id);
                continue;
            }
            importer.import_node(node, &mut created);
        }

        log::info!("Imported scene {label}: {} entities", created.len());
        created
    }
}

/// Per-run borrow of everything node import touches.
struct NodeImporter<'a> {
    scene: &'a Scene,
    world: &'a mut World,
    registry: &'a mut MaterialTypeRegistry,
    ctx: &'a mut BuildContext,
    pbr: ember_graphics::MaterialTypeId,
    animation: ember_graphics::MaterialTypeId,
}

impl NodeImporter<'_> {
    fn import_node(&mut self, node: &SceneNode, created: &mut Vec<Entity>) {
        for &mesh_index in &node.meshes {
            let Some(mesh) = self.scene.meshes.get(mesh_index) else {
                log::error!("Node {} references missing mesh {mesh_index}", node.id);
                continue;
            };
            if !mesh.has_geometry() {
                log::error!(
                    "Mesh {} ({mesh_index}) has no geometry: {} vertices, {} polygons",
                    mesh.name,
                    mesh.vertex_count,
                    mesh.polygon_count
                );
                continue;
            }

            let entity = self.world.create_entity();
            self.world
                .create_component(entity, Transform::from(node.transform));

            if mesh.is_skinned() {
                self.add_skin_mesh(entity, mesh_index, mesh);
            } else {
                self.add_static_mesh(entity, mesh_index, mesh);
            }
            created.push(entity);
        }
    }

    fn add_static_mesh(&mut self, entity: Entity, mesh_index: usize, mesh: &SceneMesh) {
        let Some(ty) = self.registry.get_mut(self.pbr) else {
            return;
        };
        add_mesh(self.world, entity, mesh_index, mesh, ty);

        let Some(material_index) = mesh.material else {
            log::debug!("Mesh {} has no material", mesh.name);
            return;
        };
        let Some(material) = self.scene.materials.get(material_index) else {
            log::error!(
                "Mesh {} references missing material {material_index}",
                mesh.name
            );
            return;
        };
        add_material(self.world, entity, Some(material), ty, self.scene, self.ctx);
    }

    fn add_skin_mesh(&mut self, entity: Entity, mesh_index: usize, mesh: &SceneMesh) {
        let Some(ty) = self.registry.get_mut(self.animation) else {
            return;
        };
        add_mesh(self.world, entity, mesh_index, mesh, ty);

        // One playable animation per import.
        match self.scene.animations.first() {
            Some(animation) => {
                self.world
                    .create_component(entity, Animation::new(0, animation));
            }
            None => log::warn!("Skinned mesh {} has no animation to play", mesh.name),
        }

        add_material(self.world, entity, None, ty, self.scene, self.ctx);
    }
}

fn add_mesh(
    world: &mut World,
    entity: Entity,
    mesh_index: usize,
    mesh: &SceneMesh,
    ty: &MaterialType,
) {
    world.create_component(entity, Name::for_mesh(&mesh.name, mesh_index));
    world.create_component(
        entity,
        StaticMesh::new(mesh_index, mesh, ty.vertex_layout().clone()),
    );
}

fn add_material(
    world: &mut World,
    entity: Entity,
    material: Option<&SceneMaterial>,
    ty: &mut MaterialType,
    scene: &Scene,
    ctx: &mut BuildContext,
) {
    let resolved = resolve_material(material, ty, &scene.textures, ctx);
    world.create_component(entity, Material::new(ty.name(), material, resolved));
}
