//! Scene and build-context fixtures for import tests.

#![allow(dead_code)]

use ember_core::material::{MaterialTextureType::*, SceneMaterial};
use ember_core::scene::{NodeTransform, Scene, SceneAnimation, SceneMesh, SceneNode, SceneTexture};
use ember_graphics::build::BuildHistory;
use ember_graphics::shader::ShaderLibrary;
use ember_graphics::{BuildContext, DummyDevice, GraphicsBackend, PlaceholderQueue};
use ember_vfs::{MemoryProvider, Vfs};

pub const HELMET_TEXTURES: [&str; 7] = [
    "helmet/albedo.png",
    "helmet/normal.png",
    "helmet/orm.png",
    "helmet/emissive.png",
    "helmet/roughness.png",
    "helmet/metallic.png",
    "helmet/occlusion.png",
];

/// A build context whose queue writes placeholder artifacts into memory.
pub struct Harness {
    pub ctx: BuildContext,
    pub history: BuildHistory,
    pub assets: MemoryProvider,
    pub artifacts: MemoryProvider,
}

impl Harness {
    pub fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let assets = MemoryProvider::new();
        for path in HELMET_TEXTURES {
            assets.insert(path, b"png".to_vec());
        }
        let artifacts = MemoryProvider::new();

        let mut vfs = Vfs::new();
        vfs.mount("assets", assets.clone());
        vfs.mount("artifacts", artifacts.clone());
        vfs.mount("builtin", ShaderLibrary::builtin_provider());

        let queue = PlaceholderQueue::new(vfs.clone());
        let history = queue.history();
        let ctx = BuildContext::new(
            vfs,
            GraphicsBackend::Dummy,
            Box::new(queue),
            Box::new(DummyDevice::new()),
        );
        Self {
            ctx,
            history,
            assets,
            artifacts,
        }
    }

    /// Executed texture tasks.
    pub fn texture_builds(&self) -> usize {
        self.history.count_outputs("artifacts/textures/")
    }
}

pub fn helmet_textures() -> Vec<SceneTexture> {
    vec![
        SceneTexture::new(BaseColor, HELMET_TEXTURES[0]),
        SceneTexture::new(Normal, HELMET_TEXTURES[1]),
        SceneTexture::new(Occlusion, HELMET_TEXTURES[2]),
        SceneTexture::new(Emissive, HELMET_TEXTURES[3]),
        SceneTexture::new(Roughness, HELMET_TEXTURES[4]),
        SceneTexture::new(Metallic, HELMET_TEXTURES[5]),
        SceneTexture::new(Occlusion, HELMET_TEXTURES[6]),
    ]
}

/// Every required PBR kind, packed into one ORM texture.
pub fn full_pbr_material() -> SceneMaterial {
    SceneMaterial::new("helmet")
        .with_texture(BaseColor, 0)
        .with_texture(Normal, 1)
        .with_texture(Occlusion, 2)
        .with_texture(Roughness, 2)
        .with_texture(Metallic, 2)
}

/// One node holding one static mesh that uses `material`.
pub fn static_scene(material: SceneMaterial) -> Scene {
    Scene::new()
        .with_name("helmet")
        .with_nodes(vec![SceneNode::new(0)
            .with_name("root")
            .with_transform(NodeTransform::IDENTITY.with_translation([0.0, 1.0, 0.0]))
            .with_meshes(vec![0])])
        .with_meshes(vec![SceneMesh::new("Helmet", 1024, 512).with_material(0)])
        .with_materials(vec![material])
        .with_textures(helmet_textures())
}

/// One node holding one skinned mesh, with one animation.
pub fn skinned_scene() -> Scene {
    Scene::new()
        .with_name("fox")
        .with_nodes(vec![SceneNode::new(0).with_meshes(vec![0])])
        .with_meshes(vec![SceneMesh::new("Fox", 1728, 576).with_influences(4)])
        .with_animations(vec![
            SceneAnimation::new(60.0, 30.0).with_name("Survey"),
            SceneAnimation::new(30.0, 30.0).with_name("Walk"),
        ])
}
