use std::collections::BTreeMap;

use ember_core::material::MaterialTextureType;
use ember_core::mesh::VertexLayout;

use super::schema::ShaderSchema;

/// An archetype of materials: vertex layout, texture slots and shaders.
///
/// Required and optional texture kinds keep their registration order, which
/// fixes the order of texture compile tasks and option activation. Several
/// kinds may share one slot when their data is packed into a single image.
#[derive(Debug)]
pub struct MaterialType {
    name: String,
    vertex_layout: VertexLayout,
    required: Vec<MaterialTextureType>,
    optional: Vec<MaterialTextureType>,
    slots: BTreeMap<MaterialTextureType, u32>,
    schema: ShaderSchema,
}

impl MaterialType {
    pub fn new(name: impl Into<String>, vertex_layout: VertexLayout, schema: ShaderSchema) -> Self {
        Self {
            name: name.into(),
            vertex_layout,
            required: Vec::new(),
            optional: Vec::new(),
            slots: BTreeMap::new(),
            schema,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertex_layout(&self) -> &VertexLayout {
        &self.vertex_layout
    }

    pub fn schema(&self) -> &ShaderSchema {
        &self.schema
    }

    pub fn schema_mut(&mut self) -> &mut ShaderSchema {
        &mut self.schema
    }

    /// Require `kind` and bind it to `slot`.
    pub fn add_required_texture_type(&mut self, kind: MaterialTextureType, slot: u32) {
        if self.declare_required_texture_type(kind) {
            self.bind_texture_slot(kind, slot);
        }
    }

    /// Accept `kind` optionally and bind it to `slot`.
    pub fn add_optional_texture_type(&mut self, kind: MaterialTextureType, slot: u32) {
        if self.declare_optional_texture_type(kind) {
            self.bind_texture_slot(kind, slot);
        }
    }

    /// Require `kind` without binding a slot yet.
    ///
    /// Returns `false` if the kind was already declared.
    pub fn declare_required_texture_type(&mut self, kind: MaterialTextureType) -> bool {
        if self.is_declared(kind) {
            log::warn!("{}: texture type {} declared twice", self.name, kind.name());
            return false;
        }
        self.required.push(kind);
        true
    }

    /// Accept `kind` optionally without binding a slot yet.
    pub fn declare_optional_texture_type(&mut self, kind: MaterialTextureType) -> bool {
        if self.is_declared(kind) {
            log::warn!("{}: texture type {} declared twice", self.name, kind.name());
            return false;
        }
        self.optional.push(kind);
        true
    }

    pub fn bind_texture_slot(&mut self, kind: MaterialTextureType, slot: u32) {
        self.slots.insert(kind, slot);
    }

    fn is_declared(&self, kind: MaterialTextureType) -> bool {
        self.required.contains(&kind) || self.optional.contains(&kind)
    }

    /// Shader binding slot of a texture kind.
    pub fn texture_slot(&self, kind: MaterialTextureType) -> Option<u32> {
        self.slots.get(&kind).copied()
    }

    /// Required kinds in registration order.
    pub fn required_texture_types(&self) -> &[MaterialTextureType] {
        &self.required
    }

    /// Optional kinds in registration order.
    pub fn optional_texture_types(&self) -> &[MaterialTextureType] {
        &self.optional
    }

    /// Kinds bound to `slot`, in slot-table order.
    pub fn kinds_in_slot(&self, slot: u32) -> Vec<MaterialTextureType> {
        self.slots
            .iter()
            .filter(|(_, s)| **s == slot)
            .map(|(kind, _)| *kind)
            .collect()
    }
}
