//! Build tasks: source assets compiled into backend-specific artifacts.
//!
//! The protocol has two explicit phases:
//!
//! 1. **Submit**: [`BuildQueue::submit`] records a task. Nothing runs yet.
//! 2. **Flush**: [`BuildQueue::flush`] drains every pending task and returns
//!    only once all of them have finished or failed.
//!
//! After a flush every artifact either exists on the artifact mount or is
//! absent because its task failed. A failure is logged and never propagated:
//! callers treat an absent artifact as "use fallback".

mod placeholder;
mod queue;
pub mod texture;

use std::ops::AddAssign;

use ember_vfs::Vfs;

use crate::path::PathResolver;
use crate::shader::ShaderStage;

pub use placeholder::{BuildHistory, PlaceholderQueue};
pub use queue::BuildTaskQueue;
pub use texture::ColorSpace;

/// What a task compiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildKind {
    Shader(ShaderStage),
    Texture(ColorSpace),
}

impl BuildKind {
    /// Stable tag mixed into the artifact fingerprint.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Shader(ShaderStage::Vertex) => "vs",
            Self::Shader(ShaderStage::Fragment) => "fs",
            Self::Shader(ShaderStage::Compute) => "cs",
            Self::Texture(ColorSpace::Srgb) => "tex_srgb",
            Self::Texture(ColorSpace::Linear) => "tex_linear",
        }
    }
}

/// A single compile request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildTask {
    pub kind: BuildKind,
    /// VFS path of the source.
    pub input: String,
    /// VFS path the artifact is written to.
    pub output: String,
    /// Variant option string, `;`-separated. Empty for textures and base shaders.
    pub options: String,
}

impl BuildTask {
    pub fn shader(
        stage: ShaderStage,
        input: impl Into<String>,
        output: impl Into<String>,
        options: impl Into<String>,
    ) -> Self {
        Self {
            kind: BuildKind::Shader(stage),
            input: input.into(),
            output: output.into(),
            options: options.into(),
        }
    }

    pub fn texture(
        color_space: ColorSpace,
        input: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Self {
            kind: BuildKind::Texture(color_space),
            input: input.into(),
            output: output.into(),
            options: String::new(),
        }
    }

    /// Identity used to collapse duplicate submissions.
    pub fn key(&self) -> (&str, &str) {
        (&self.input, &self.options)
    }
}

/// Outcome counts of one flush.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Tasks that ran the compiler and wrote an artifact.
    pub compiled: usize,
    /// Tasks skipped because their artifact was current.
    pub up_to_date: usize,
    /// Tasks that left their artifact absent.
    pub failed: usize,
    /// Submissions collapsed into an earlier identical task.
    pub deduplicated: usize,
}

impl BuildReport {
    /// Tasks that were actually executed.
    pub fn executed(&self) -> usize {
        self.compiled + self.up_to_date + self.failed
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

impl AddAssign for BuildReport {
    fn add_assign(&mut self, rhs: Self) {
        self.compiled += rhs.compiled;
        self.up_to_date += rhs.up_to_date;
        self.failed += rhs.failed;
        self.deduplicated += rhs.deduplicated;
    }
}

impl std::fmt::Display for BuildReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} compiled, {} up to date, {} failed, {} deduplicated",
            self.compiled, self.up_to_date, self.failed, self.deduplicated
        )
    }
}

/// Accepts compile requests and runs them at an explicit barrier.
///
/// Implementations must collapse duplicate `(input, options)` submissions
/// made before a flush into a single compile.
pub trait BuildQueue {
    fn submit(&mut self, task: BuildTask);

    /// Run every pending task. Returns once all of them are done.
    fn flush(&mut self) -> BuildReport;

    fn pending(&self) -> usize;
}

/// Queue one task per `vs_*`, `fs_*` and `cs_*` file in `dir`, then flush.
///
/// Files with any other prefix are skipped with a warning. Tasks carry no
/// options.
pub fn build_shader_folder(
    queue: &mut dyn BuildQueue,
    vfs: &Vfs,
    paths: &PathResolver,
    dir: &str,
) -> BuildReport {
    ember_core::profile_scope!("build_shader_folder");

    let entries = match vfs.list_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            log::error!("Cannot list shader folder {dir}: {err}");
            return BuildReport::default();
        }
    };

    for name in entries {
        let stage = if name.starts_with("vs_") {
            ShaderStage::Vertex
        } else if name.starts_with("fs_") {
            ShaderStage::Fragment
        } else if name.starts_with("cs_") {
            ShaderStage::Compute
        } else {
            log::warn!("Skipping {dir}/{name}: unknown shader prefix");
            continue;
        };
        let input = ember_vfs::path::join(dir, &name);
        let output = paths.shader_output_path(&input, "");
        queue.submit(BuildTask::shader(stage, input, output, ""));
    }

    queue.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_vfs::MemoryProvider;

    /// Records submissions and flushes without compiling.
    #[derive(Default)]
    struct RecordingQueue {
        pending: Vec<BuildTask>,
        flushed: Vec<BuildTask>,
    }

    impl BuildQueue for RecordingQueue {
        fn submit(&mut self, task: BuildTask) {
            self.pending.push(task);
        }

        fn flush(&mut self) -> BuildReport {
            let compiled = self.pending.len();
            self.flushed.append(&mut self.pending);
            BuildReport {
                compiled,
                ..Default::default()
            }
        }

        fn pending(&self) -> usize {
            self.pending.len()
        }
    }

    #[test]
    fn test_report_accumulates() {
        let mut total = BuildReport::default();
        total += BuildReport {
            compiled: 2,
            failed: 1,
            ..Default::default()
        };
        total += BuildReport {
            up_to_date: 3,
            deduplicated: 1,
            ..Default::default()
        };
        assert_eq!(total.executed(), 6);
        assert!(!total.is_success());
        assert_eq!(
            total.to_string(),
            "2 compiled, 3 up to date, 1 failed, 1 deduplicated"
        );
    }

    #[test]
    fn test_kind_tags_are_distinct() {
        let tags = [
            BuildKind::Shader(ShaderStage::Vertex).tag(),
            BuildKind::Shader(ShaderStage::Fragment).tag(),
            BuildKind::Shader(ShaderStage::Compute).tag(),
            BuildKind::Texture(ColorSpace::Srgb).tag(),
            BuildKind::Texture(ColorSpace::Linear).tag(),
        ];
        let unique: std::collections::HashSet<_> = tags.iter().collect();
        assert_eq!(unique.len(), tags.len());
    }

    #[test]
    fn test_shader_folder_prefixes() {
        let shaders = MemoryProvider::new();
        for name in ["vs_sky.glsl", "fs_sky.glsl", "cs_cull.glsl", "README.md"] {
            shaders.insert(format!("post/{name}"), Vec::new());
        }
        let mut vfs = Vfs::new();
        vfs.mount("assets", shaders);

        let mut queue = RecordingQueue::default();
        let paths = PathResolver::new(crate::backend::GraphicsBackend::Dummy);
        let report = build_shader_folder(&mut queue, &vfs, &paths, "assets/post");

        assert_eq!(report.compiled, 3);
        assert_eq!(queue.pending(), 0);
        let kinds: Vec<_> = queue.flushed.iter().map(|t| (t.kind, t.output.as_str())).collect();
        assert_eq!(
            kinds,
            [
                (
                    BuildKind::Shader(ShaderStage::Compute),
                    "artifacts/shaders/dummy/cs_cull.bin"
                ),
                (
                    BuildKind::Shader(ShaderStage::Fragment),
                    "artifacts/shaders/dummy/fs_sky.bin"
                ),
                (
                    BuildKind::Shader(ShaderStage::Vertex),
                    "artifacts/shaders/dummy/vs_sky.bin"
                ),
            ]
        );
        assert!(queue.flushed.iter().all(|t| t.options.is_empty()));
    }
}
