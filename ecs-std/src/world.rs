//! Entity world with a closed set of component stores.
//!
//! Each component type has its own [`SparseSet`]. The set of types is fixed
//! by [`ComponentKind`], so there is no runtime registration step and no
//! "component not registered" failure.

use ember_ecs::{Entity, EntityAllocator, SparseSet};

use crate::components::{Animation, Material, Name, StaticMesh, Transform};

/// Every component type the world can store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentKind {
    Transform,
    Name,
    StaticMesh,
    Material,
    Animation,
}

impl ComponentKind {
    pub const ALL: [Self; 5] = [
        Self::Transform,
        Self::Name,
        Self::StaticMesh,
        Self::Material,
        Self::Animation,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Transform => "Transform",
            Self::Name => "Name",
            Self::StaticMesh => "StaticMesh",
            Self::Material => "Material",
            Self::Animation => "Animation",
        }
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One typed store per [`ComponentKind`].
#[derive(Debug, Default)]
pub struct ComponentStores {
    transforms: SparseSet<Transform>,
    names: SparseSet<Name>,
    static_meshes: SparseSet<StaticMesh>,
    materials: SparseSet<Material>,
    animations: SparseSet<Animation>,
}

impl ComponentStores {
    fn contains(&self, kind: ComponentKind, index: u32) -> bool {
        match kind {
            ComponentKind::Transform => self.transforms.contains(index),
            ComponentKind::Name => self.names.contains(index),
            ComponentKind::StaticMesh => self.static_meshes.contains(index),
            ComponentKind::Material => self.materials.contains(index),
            ComponentKind::Animation => self.animations.contains(index),
        }
    }

    fn remove_all(&mut self, index: u32) {
        self.transforms.remove(index);
        self.names.remove(index);
        self.static_meshes.remove(index);
        self.materials.remove(index);
        self.animations.remove(index);
    }
}

/// A type stored in one of the world's component stores.
pub trait Component: Sized + 'static {
    const KIND: ComponentKind;

    fn store(stores: &ComponentStores) -> &SparseSet<Self>;

    fn store_mut(stores: &mut ComponentStores) -> &mut SparseSet<Self>;
}

macro_rules! impl_component {
    ($ty:ty, $kind:ident, $field:ident) => {
        impl Component for $ty {
            const KIND: ComponentKind = ComponentKind::$kind;

            fn store(stores: &ComponentStores) -> &SparseSet<Self> {
                &stores.$field
            }

            fn store_mut(stores: &mut ComponentStores) -> &mut SparseSet<Self> {
                &mut stores.$field
            }
        }
    };
}

impl_component!(Transform, Transform, transforms);
impl_component!(Name, Name, names);
impl_component!(StaticMesh, StaticMesh, static_meshes);
impl_component!(Material, Material, materials);
impl_component!(Animation, Animation, animations);

/// Entities and their components.
#[derive(Debug, Default)]
pub struct World {
    entities: EntityAllocator,
    stores: ComponentStores,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_entity(&mut self) -> Entity {
        self.entities.allocate()
    }

    /// Destroys an entity and all its components.
    ///
    /// Returns `false` if the entity was already dead.
    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        if !self.entities.deallocate(entity) {
            return false;
        }
        self.stores.remove_all(entity.index());
        true
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.is_alive(entity)
    }

    pub fn entity_count(&self) -> u32 {
        self.entities.count()
    }

    pub fn iter_entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.iter_alive()
    }

    /// Attach a component, replacing and returning any previous one.
    ///
    /// # Panics
    ///
    /// Panics if `entity` is not alive.
    pub fn create_component<T: Component>(&mut self, entity: Entity, component: T) -> Option<T> {
        assert!(
            self.entities.is_alive(entity),
            "Cannot create {} on dead entity {entity}",
            T::KIND
        );
        T::store_mut(&mut self.stores).insert(entity.index(), component)
    }

    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Option<T> {
        if !self.entities.is_alive(entity) {
            return None;
        }
        T::store_mut(&mut self.stores).remove(entity.index())
    }

    pub fn get<T: Component>(&self, entity: Entity) -> Option<&T> {
        if !self.entities.is_alive(entity) {
            return None;
        }
        T::store(&self.stores).get(entity.index())
    }

    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        if !self.entities.is_alive(entity) {
            return None;
        }
        T::store_mut(&mut self.stores).get_mut(entity.index())
    }

    pub fn has(&self, entity: Entity, kind: ComponentKind) -> bool {
        self.entities.is_alive(entity) && self.stores.contains(kind, entity.index())
    }

    /// Kinds attached to `entity`, in [`ComponentKind::ALL`] order.
    pub fn component_kinds(&self, entity: Entity) -> Vec<ComponentKind> {
        ComponentKind::ALL
            .into_iter()
            .filter(|&kind| self.has(entity, kind))
            .collect()
    }

    /// Number of entities with a `T`.
    pub fn count<T: Component>(&self) -> usize {
        T::store(&self.stores).len()
    }

    /// Iterate `(entity index, component)` pairs in storage order.
    pub fn iter<T: Component>(&self) -> impl Iterator<Item = (u32, &T)> {
        T::store(&self.stores).iter()
    }
}
