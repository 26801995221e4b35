//! Shared fixtures for pipeline integration tests.
//!
//! Each fixture gets its own directory under the system temp dir with an
//! `assets/` and an `artifacts/` tree, mounted the way an import run mounts
//! them.

use std::path::PathBuf;

use ember_graphics::{BuildContext, GraphicsBackend, PipelineConfig};

/// A temp asset/artifact tree, removed on drop.
pub struct PipelineFixture {
    pub root: PathBuf,
    pub config: PipelineConfig,
}

impl PipelineFixture {
    pub fn new(name: &str, backend: GraphicsBackend) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let root = std::env::temp_dir().join(format!("ember_graphics_it_{name}"));
        let _ = std::fs::remove_dir_all(&root);
        std::fs::create_dir_all(root.join("assets")).unwrap();

        let config = PipelineConfig {
            backend,
            asset_root: root.join("assets"),
            artifact_root: root.join("artifacts"),
            parallel_builds: true,
            texture_mipmaps: true,
        };
        Self { root, config }
    }

    /// Write a source asset relative to the asset root.
    pub fn add_asset(&self, relative: &str, bytes: &[u8]) {
        let path = self.config.asset_root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, bytes).unwrap();
    }

    pub fn artifact(&self, relative: &str) -> PathBuf {
        self.config.artifact_root.join(relative)
    }

    /// A fresh context over the same directories, as a second import run would see.
    pub fn context(&self) -> BuildContext {
        BuildContext::from_config(&self.config)
    }
}

impl Drop for PipelineFixture {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.root);
    }
}

/// A solid-color PNG.
pub fn png(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let image = image::DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
        width,
        height,
        image::Rgba(rgba),
    ));
    let mut bytes = std::io::Cursor::new(Vec::new());
    image
        .write_to(&mut bytes, image::ImageOutputFormat::Png)
        .unwrap();
    bytes.into_inner()
}
