use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use ember_vfs::Vfs;

use crate::build::{BuildQueue, BuildReport, BuildTask};

/// Tasks a [`PlaceholderQueue`] has executed, shared with its creator.
#[derive(Clone, Default)]
pub struct BuildHistory {
    tasks: Arc<Mutex<Vec<BuildTask>>>,
}

impl BuildHistory {
    pub fn tasks(&self) -> Vec<BuildTask> {
        self.tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Executed tasks whose output starts with `prefix`.
    pub fn count_outputs(&self, prefix: &str) -> usize {
        self.tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|task| task.output.starts_with(prefix))
            .count()
    }

    fn record(&self, task: BuildTask) {
        self.tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(task);
    }
}

/// Build queue that completes instantly without running a compiler.
///
/// Each task whose source exists gets a small text artifact naming the task.
/// A task whose source is missing fails like a real compile would. Used for
/// headless dry runs and tests.
pub struct PlaceholderQueue {
    vfs: Vfs,
    pending: Vec<BuildTask>,
    keys: HashSet<(String, String)>,
    deduplicated: usize,
    history: BuildHistory,
}

impl PlaceholderQueue {
    pub fn new(vfs: Vfs) -> Self {
        Self {
            vfs,
            pending: Vec::new(),
            keys: HashSet::new(),
            deduplicated: 0,
            history: BuildHistory::default(),
        }
    }

    pub fn history(&self) -> BuildHistory {
        self.history.clone()
    }
}

impl BuildQueue for PlaceholderQueue {
    fn submit(&mut self, task: BuildTask) {
        if self.keys.insert((task.input.clone(), task.options.clone())) {
            self.pending.push(task);
        } else {
            self.deduplicated += 1;
        }
    }

    fn flush(&mut self) -> BuildReport {
        let mut report = BuildReport {
            deduplicated: std::mem::take(&mut self.deduplicated),
            ..Default::default()
        };
        self.keys.clear();

        for task in std::mem::take(&mut self.pending) {
            let placeholder = format!("{}:{}[{}]", task.kind.tag(), task.input, task.options);
            let written = match self.vfs.exists(&task.input) {
                Ok(true) => self.vfs.write(&task.output, placeholder.as_bytes()),
                Ok(false) => Err(ember_vfs::VfsError::NotFound(task.input.clone())),
                Err(err) => Err(err),
            };
            match written {
                Ok(()) => report.compiled += 1,
                Err(err) => {
                    log::error!("Placeholder build of {} failed: {err}", task.input);
                    let _ = self.vfs.delete(&task.output);
                    report.failed += 1;
                }
            }
            self.history.record(task);
        }
        report
    }

    fn pending(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::ShaderStage;
    use ember_vfs::{MemoryProvider, VfsProvider};

    #[test]
    fn test_placeholder_flush() {
        let assets = MemoryProvider::new();
        let artifacts = MemoryProvider::new();
        assets.insert("fs_a.glsl", b"src".to_vec());
        let mut vfs = Vfs::new();
        vfs.mount("assets", assets);
        vfs.mount("artifacts", artifacts.clone());

        let mut queue = PlaceholderQueue::new(vfs);
        let history = queue.history();
        let task = BuildTask::shader(ShaderStage::Fragment, "assets/fs_a.glsl", "artifacts/fs_a.bin", "");
        queue.submit(task.clone());
        queue.submit(task);
        queue.submit(BuildTask::shader(
            ShaderStage::Fragment,
            "assets/fs_gone.glsl",
            "artifacts/fs_gone.bin",
            "",
        ));

        let report = queue.flush();
        assert_eq!(report.compiled, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(report.deduplicated, 1);
        assert_eq!(history.len(), 2);
        assert_eq!(history.count_outputs("artifacts/fs_a"), 1);
        assert_eq!(
            artifacts.read("fs_a.bin").unwrap(),
            b"fs:assets/fs_a.glsl[]"
        );
        assert!(!artifacts.exists("fs_gone.bin").unwrap());
    }
}
