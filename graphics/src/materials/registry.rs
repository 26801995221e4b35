use std::collections::HashMap;

use super::builtin;
use super::material_type::MaterialType;

/// Index of a material type inside its [`MaterialTypeRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialTypeId(pub usize);

/// Owns the material types of a world, looked up by id or name.
#[derive(Debug, Default)]
pub struct MaterialTypeRegistry {
    types: Vec<MaterialType>,
    by_name: HashMap<String, MaterialTypeId>,
}

impl MaterialTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding PBR, Animation, Terrain and DDGI.
    pub fn with_builtin_types() -> Self {
        let mut registry = Self::new();
        registry.register(builtin::pbr());
        registry.register(builtin::animation());
        registry.register(builtin::terrain());
        registry.register(builtin::ddgi());
        registry
    }

    /// Add a material type. A name that is already taken keeps its
    /// original type and returns its id.
    pub fn register(&mut self, material_type: MaterialType) -> MaterialTypeId {
        if let Some(&id) = self.by_name.get(material_type.name()) {
            log::warn!(
                "Material type {} is already registered; keeping the first one",
                material_type.name()
            );
            return id;
        }
        let id = MaterialTypeId(self.types.len());
        log::info!(
            "Registered material type {} ({} required, {} optional textures)",
            material_type.name(),
            material_type.required_texture_types().len(),
            material_type.optional_texture_types().len()
        );
        self.by_name.insert(material_type.name().to_string(), id);
        self.types.push(material_type);
        id
    }

    pub fn find(&self, name: &str) -> Option<MaterialTypeId> {
        self.by_name.get(name).copied()
    }

    pub fn get(&self, id: MaterialTypeId) -> Option<&MaterialType> {
        self.types.get(id.0)
    }

    pub fn get_mut(&mut self, id: MaterialTypeId) -> Option<&mut MaterialType> {
        self.types.get_mut(id.0)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (MaterialTypeId, &MaterialType)> {
        self.types
            .iter()
            .enumerate()
            .map(|(index, ty)| (MaterialTypeId(index), ty))
    }
}
