use std::collections::HashMap;

use ember_vfs::Vfs;

use crate::backend::GraphicsBackend;
use crate::build::texture::compile_texture;
use crate::build::{BuildKind, BuildQueue, BuildReport, BuildTask};
use crate::error::GraphicsError;
use crate::path::PathResolver;
use crate::shader::ShaderComposer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Compiled,
    UpToDate,
    Failed,
}

/// Build queue that compiles through naga and `image`, reading sources and
/// writing artifacts through a [`Vfs`].
///
/// Every artifact gets a `<artifact>.crc` sidecar holding a CRC32 over the
/// source bytes, the option string and the task kind. A task whose artifact
/// exists with a matching sidecar is not recompiled.
pub struct BuildTaskQueue {
    vfs: Vfs,
    backend: GraphicsBackend,
    composer: ShaderComposer,
    pending: Vec<BuildTask>,
    /// `(input, options)` -> index into `pending`.
    keys: HashMap<(String, String), usize>,
    deduplicated: usize,
    parallel: bool,
    mipmaps: bool,
}

impl BuildTaskQueue {
    pub fn new(vfs: Vfs, backend: GraphicsBackend) -> Self {
        Self {
            vfs,
            backend,
            composer: ShaderComposer::with_builtin_library(),
            pending: Vec::new(),
            keys: HashMap::new(),
            deduplicated: 0,
            parallel: cfg!(feature = "parallel"),
            mipmaps: true,
        }
    }

    /// Compile on the rayon pool during flush. Ignored without the
    /// `parallel` feature.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_mipmaps(mut self, mipmaps: bool) -> Self {
        self.mipmaps = mipmaps;
        self
    }

    pub fn backend(&self) -> GraphicsBackend {
        self.backend
    }

    fn fingerprint(&self, task: &BuildTask, source: &[u8]) -> u32 {
        let mut hasher = crc32fast::Hasher::new();
        hasher.update(source);
        hasher.update(task.options.as_bytes());
        hasher.update(task.kind.tag().as_bytes());
        if matches!(task.kind, BuildKind::Texture(_)) && self.mipmaps {
            hasher.update(b"mips");
        }
        hasher.finalize()
    }

    fn is_current(&self, task: &BuildTask, fingerprint: u32) -> bool {
        if !self.vfs.exists(&task.output).unwrap_or(false) {
            return false;
        }
        match self.vfs.read(&PathResolver::sidecar_path(&task.output)) {
            Ok(bytes) => bytes == format!("{fingerprint:08x}").into_bytes(),
            Err(_) => false,
        }
    }

    fn compile(&self, task: &BuildTask, source: &[u8]) -> Result<Vec<u8>, GraphicsError> {
        match task.kind {
            BuildKind::Shader(stage) => {
                let text = std::str::from_utf8(source).map_err(|e| {
                    GraphicsError::ShaderCompilationFailed(format!("source is not UTF-8: {e}"))
                })?;
                self.composer.compile(text, stage, &task.options, self.backend)
            }
            BuildKind::Texture(color_space) => compile_texture(source, color_space, self.mipmaps),
        }
    }

    fn run(&self, task: &BuildTask) -> Result<Outcome, GraphicsError> {
        let source = self.vfs.read(&task.input)?;
        let fingerprint = self.fingerprint(task, &source);
        if self.is_current(task, fingerprint) {
            log::trace!("{} is up to date", task.output);
            return Ok(Outcome::UpToDate);
        }

        log::debug!("Compiling {} [{}] -> {}", task.input, task.options, task.output);
        let artifact = self.compile(task, &source)?;
        self.vfs.write(&task.output, &artifact)?;
        self.vfs.write(
            &PathResolver::sidecar_path(&task.output),
            format!("{fingerprint:08x}").as_bytes(),
        )?;
        Ok(Outcome::Compiled)
    }

    fn execute(&self, task: &BuildTask) -> Outcome {
        match self.run(task) {
            Ok(outcome) => outcome,
            Err(err) => {
                log::error!("Build of {} [{}] failed: {err}", task.input, task.options);
                self.remove_stale(&task.output);
                Outcome::Failed
            }
        }
    }

    /// A failed task must not leave an older artifact behind.
    fn remove_stale(&self, output: &str) {
        for path in [output.to_string(), PathResolver::sidecar_path(output)] {
            if let Err(err) = self.vfs.delete(&path) {
                if !err.is_not_found() {
                    log::warn!("Could not remove stale artifact {path}: {err}");
                }
            }
        }
    }

    fn execute_all(&self, tasks: &[BuildTask]) -> Vec<Outcome> {
        #[cfg(feature = "parallel")]
        if self.parallel && tasks.len() > 1 {
            use rayon::prelude::*;
            return tasks.par_iter().map(|task| self.execute(task)).collect();
        }
        tasks.iter().map(|task| self.execute(task)).collect()
    }
}

impl BuildQueue for BuildTaskQueue {
    fn submit(&mut self, task: BuildTask) {
        let key = (task.input.clone(), task.options.clone());
        if let Some(&index) = self.keys.get(&key) {
            self.deduplicated += 1;
            let existing = &self.pending[index];
            if existing.output != task.output {
                log::warn!(
                    "Ignoring duplicate build of {} [{}]: output {} differs from queued {}",
                    task.input,
                    task.options,
                    task.output,
                    existing.output
                );
            } else {
                log::trace!("Deduplicated build of {} [{}]", task.input, task.options);
            }
            return;
        }
        self.keys.insert(key, self.pending.len());
        self.pending.push(task);
    }

    fn flush(&mut self) -> BuildReport {
        ember_core::profile_scope!("build_queue_flush");

        let tasks = std::mem::take(&mut self.pending);
        self.keys.clear();
        let mut report = BuildReport {
            deduplicated: std::mem::take(&mut self.deduplicated),
            ..Default::default()
        };
        if tasks.is_empty() {
            return report;
        }

        for outcome in self.execute_all(&tasks) {
            match outcome {
                Outcome::Compiled => report.compiled += 1,
                Outcome::UpToDate => report.up_to_date += 1,
                Outcome::Failed => report.failed += 1,
            }
        }

        log::info!("Build flush ({}): {report}", self.backend);
        report
    }

    fn pending(&self) -> usize {
        self.pending.len()
    }
}
