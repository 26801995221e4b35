//! Reads compiled artifacts into memory.

use ember_vfs::Vfs;

/// Loads compiled shader and texture blobs.
///
/// A failed read logs an error and yields an empty blob. Callers check
/// for emptiness before use.
#[derive(Clone)]
pub struct ResourceLoader {
    vfs: Vfs,
}

impl ResourceLoader {
    pub fn new(vfs: Vfs) -> Self {
        Self { vfs }
    }

    pub fn load(&self, path: &str) -> Vec<u8> {
        match self.vfs.read(path) {
            Ok(bytes) => {
                log::trace!("Loaded {} bytes from {path}", bytes.len());
                bytes
            }
            Err(err) => {
                log::error!("Failed to load {path}: {err}");
                Vec::new()
            }
        }
    }
}
