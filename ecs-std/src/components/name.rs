/// Display name of an imported mesh entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name(pub String);

impl Name {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Name for the entity created from scene mesh `mesh`.
    ///
    /// Unnamed meshes get `mesh_<index>` so every entity is addressable.
    pub fn for_mesh(name: &str, mesh: usize) -> Self {
        if name.is_empty() {
            Self(format!("mesh_{mesh}"))
        } else {
            Self(name.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Name {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
