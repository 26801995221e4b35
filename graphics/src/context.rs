//! Collaborators a material build needs, bundled together.

use ember_vfs::{FileSystemProvider, Vfs};

use crate::backend::{DummyDevice, GraphicsBackend, ShaderDevice};
use crate::build::{BuildQueue, BuildTaskQueue};
use crate::config::PipelineConfig;
use crate::loader::ResourceLoader;
use crate::path::PathResolver;
use crate::shader::ShaderLibrary;

/// Build queue, artifact paths, loader and shader device for one backend.
///
/// The queue and device are trait objects so tests can swap in a queue that
/// completes instantly and a device that needs no GPU.
pub struct BuildContext {
    pub vfs: Vfs,
    pub paths: PathResolver,
    pub loader: ResourceLoader,
    pub queue: Box<dyn BuildQueue>,
    pub device: Box<dyn ShaderDevice>,
}

impl BuildContext {
    pub fn new(
        vfs: Vfs,
        backend: GraphicsBackend,
        queue: Box<dyn BuildQueue>,
        device: Box<dyn ShaderDevice>,
    ) -> Self {
        Self {
            loader: ResourceLoader::new(vfs.clone()),
            paths: PathResolver::new(backend),
            vfs,
            queue,
            device,
        }
    }

    /// Mount `assets`, `artifacts` and `builtin` from the config and compile
    /// with a [`BuildTaskQueue`] onto a [`DummyDevice`].
    pub fn from_config(config: &PipelineConfig) -> Self {
        let mut vfs = Vfs::new();
        vfs.mount("assets", FileSystemProvider::new(&config.asset_root));
        vfs.mount("artifacts", FileSystemProvider::new(&config.artifact_root));
        vfs.mount("builtin", ShaderLibrary::builtin_provider());
        vfs.set_default("assets");

        let queue = BuildTaskQueue::new(vfs.clone(), config.backend)
            .with_parallel(config.parallel_builds)
            .with_mipmaps(config.texture_mipmaps);
        log::info!(
            "Build context: backend {}, assets {}, artifacts {}",
            config.backend,
            config.asset_root.display(),
            config.artifact_root.display()
        );
        Self::new(
            vfs,
            config.backend,
            Box::new(queue),
            Box::new(DummyDevice::for_backend(config.backend)),
        )
    }

    pub fn backend(&self) -> GraphicsBackend {
        self.paths.backend()
    }
}
