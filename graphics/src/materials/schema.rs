//! Shader variant schema: one vertex shader, many fragment variants.

use std::collections::{BTreeSet, HashMap};

use ember_core::StringCrc;
use ember_vfs::path::file_stem;

use crate::backend::{ProgramHandle, ShaderHandle};
use crate::build::{BuildReport, BuildTask};
use crate::context::BuildContext;
use crate::shader::ShaderStage;

use super::uber::{ShaderStatus, Uber, UberOptions};

#[derive(Debug, Clone)]
enum VariantSource {
    Combine(UberOptions),
    Status(ShaderStatus),
}

#[derive(Debug, Clone)]
struct Variant {
    source: VariantSource,
    /// Whether a build has been attempted.
    built: bool,
    program: Option<ProgramHandle>,
}

/// Vertex and fragment sources of a material type plus the table of
/// compiled programs, keyed by option fingerprint.
///
/// The vertex shader is option-independent. Fragment variants are either a
/// curated *combine* of registered [`Uber`] options or a [`ShaderStatus`].
/// The program table only grows.
#[derive(Debug)]
pub struct ShaderSchema {
    vertex_path: String,
    fragment_path: String,
    options: BTreeSet<Uber>,
    combines: Vec<StringCrc>,
    statuses: Vec<ShaderStatus>,
    variants: HashMap<StringCrc, Variant>,
    vertex_built: bool,
    vertex: Option<ShaderHandle>,
}

impl ShaderSchema {
    pub fn new(vertex_path: impl Into<String>, fragment_path: impl Into<String>) -> Self {
        let mut schema = Self {
            vertex_path: vertex_path.into(),
            fragment_path: fragment_path.into(),
            options: BTreeSet::new(),
            combines: Vec::new(),
            statuses: Vec::new(),
            variants: HashMap::new(),
            vertex_built: false,
            vertex: None,
        };
        schema.add_combine(&[]);
        schema
    }

    pub fn vertex_path(&self) -> &str {
        &self.vertex_path
    }

    pub fn fragment_path(&self) -> &str {
        &self.fragment_path
    }

    /// Register an option token. Returns `false` if it was already known.
    pub fn register_option(&mut self, uber: Uber) -> bool {
        if self.vertex_built {
            log::warn!(
                "Option {uber} registered on {} after its variants were built",
                self.fragment_path
            );
        }
        self.options.insert(uber)
    }

    pub fn is_option_registered(&self, uber: Uber) -> bool {
        self.options.contains(&uber)
    }

    pub fn registered_options(&self) -> impl Iterator<Item = Uber> + '_ {
        self.options.iter().copied()
    }

    /// Add a curated fragment variant. The base combine `[]` always exists.
    ///
    /// # Panics
    ///
    /// Panics if any option has not been registered.
    pub fn add_combine(&mut self, options: &[Uber]) -> StringCrc {
        for uber in options {
            assert!(
                self.options.contains(uber),
                "combine option {uber} is not registered on {}",
                self.fragment_path
            );
        }
        let combine = UberOptions::from(options);
        let fingerprint = combine.fingerprint();
        if !self.combines.contains(&fingerprint) {
            self.combines.push(fingerprint);
            self.insert_variant(fingerprint, VariantSource::Combine(combine));
        }
        fingerprint
    }

    /// Add a status variant built from its built-in fragment shader.
    pub fn add_status(&mut self, status: ShaderStatus) -> StringCrc {
        let fingerprint = status.fingerprint();
        if !self.statuses.contains(&status) {
            self.statuses.push(status);
            self.insert_variant(fingerprint, VariantSource::Status(status));
        }
        fingerprint
    }

    fn insert_variant(&mut self, fingerprint: StringCrc, source: VariantSource) {
        self.variants.entry(fingerprint).or_insert(Variant {
            source,
            built: false,
            program: None,
        });
    }

    /// Fingerprints of the curated combines, in registration order.
    pub fn combines(&self) -> &[StringCrc] {
        &self.combines
    }

    pub fn statuses(&self) -> &[ShaderStatus] {
        &self.statuses
    }

    /// Whether the fingerprint names a combine or status of this schema.
    pub fn is_known(&self, fingerprint: StringCrc) -> bool {
        self.variants.contains_key(&fingerprint)
    }

    /// Number of variants with a linked program.
    pub fn program_count(&self) -> usize {
        self.variants
            .values()
            .filter(|v| v.program.is_some())
            .count()
    }

    /// Compiled program for a fingerprint.
    ///
    /// Returns `None` while the variant is unbuilt or if its build failed.
    ///
    /// # Panics
    ///
    /// Panics if the fingerprint is neither a combine nor a status of this
    /// schema. That is a programming error, not missing data.
    pub fn program(&self, fingerprint: StringCrc) -> Option<ProgramHandle> {
        match self.variants.get(&fingerprint) {
            Some(variant) => variant.program,
            None => panic!(
                "shader variant {fingerprint} is neither a combine nor a status of {}",
                self.fragment_path
            ),
        }
    }

    /// Compile the vertex shader and every unbuilt combine and status.
    pub fn build_all(&mut self, ctx: &mut BuildContext) -> BuildReport {
        ember_core::profile_scope!("shader_schema_build_all");

        let pending: Vec<StringCrc> = self
            .combines
            .iter()
            .copied()
            .chain(self.statuses.iter().map(|s| s.fingerprint()))
            .filter(|fp| !self.variants[fp].built)
            .collect();
        let report = self.build_variants(&pending, ctx);
        log::info!(
            "{} has {} shader variants ({} linked)",
            self.fragment_path,
            self.variants.len(),
            self.program_count()
        );
        report
    }

    /// Program for an option set, compiling it on first use.
    ///
    /// Sets that are not curated combines are added as combines lazily.
    ///
    /// # Panics
    ///
    /// Panics if any option has not been registered.
    pub fn program_for_options(
        &mut self,
        options: &UberOptions,
        ctx: &mut BuildContext,
    ) -> Option<ProgramHandle> {
        let fingerprint = options.fingerprint();
        if !self.is_known(fingerprint) {
            log::debug!(
                "Compiling uncurated variant [{}] of {}",
                options.option_string(),
                self.fragment_path
            );
            self.add_combine(&options.sorted());
        }
        self.ensure_built(fingerprint, ctx)
    }

    /// Program for a status variant, registering and compiling it once.
    pub fn status_program(
        &mut self,
        status: ShaderStatus,
        ctx: &mut BuildContext,
    ) -> Option<ProgramHandle> {
        let fingerprint = self.add_status(status);
        self.ensure_built(fingerprint, ctx)
    }

    fn ensure_built(
        &mut self,
        fingerprint: StringCrc,
        ctx: &mut BuildContext,
    ) -> Option<ProgramHandle> {
        if !self.variants[&fingerprint].built {
            self.build_variants(&[fingerprint], ctx);
        }
        self.program(fingerprint)
    }

    /// `(input, options)` of a variant's fragment task.
    fn fragment_source(&self, source: &VariantSource) -> (String, String) {
        match source {
            VariantSource::Combine(options) => {
                (self.fragment_path.clone(), options.option_string())
            }
            VariantSource::Status(status) => (status.fragment_path().to_string(), String::new()),
        }
    }

    fn build_variants(&mut self, fingerprints: &[StringCrc], ctx: &mut BuildContext) -> BuildReport {
        let build_vertex = !self.vertex_built;
        let vertex_output = ctx.paths.shader_output_path(&self.vertex_path, "");
        if build_vertex {
            ctx.queue.submit(BuildTask::shader(
                ShaderStage::Vertex,
                self.vertex_path.clone(),
                vertex_output.clone(),
                "",
            ));
        }

        let mut outputs = Vec::with_capacity(fingerprints.len());
        for fingerprint in fingerprints {
            let (input, options) = self.fragment_source(&self.variants[fingerprint].source);
            let output = ctx.paths.shader_output_path(&input, &options);
            ctx.queue.submit(BuildTask::shader(
                ShaderStage::Fragment,
                input.clone(),
                output.clone(),
                options.clone(),
            ));
            outputs.push((*fingerprint, format!("{}[{options}]", file_stem(&input)), output));
        }

        let report = ctx.queue.flush();

        if build_vertex {
            self.vertex_built = true;
            self.vertex = create_shader(ctx, ShaderStage::Vertex, &vertex_output, file_stem(&self.vertex_path));
        }

        for (fingerprint, label, output) in outputs {
            let program = self.vertex.and_then(|vertex| {
                let fragment = create_shader(ctx, ShaderStage::Fragment, &output, &label)?;
                match ctx.device.create_program(vertex, fragment) {
                    Ok(program) => Some(program),
                    Err(err) => {
                        log::error!("Linking {label} failed: {err}");
                        None
                    }
                }
            });
            if let Some(variant) = self.variants.get_mut(&fingerprint) {
                variant.built = true;
                variant.program = program;
            }
        }
        report
    }
}

/// Load a compiled blob and hand it to the device. Absent or rejected blobs
/// are logged and yield `None`.
fn create_shader(
    ctx: &mut BuildContext,
    stage: ShaderStage,
    path: &str,
    label: &str,
) -> Option<ShaderHandle> {
    let blob = ctx.loader.load(path);
    if blob.is_empty() {
        log::error!("No compiled {stage} shader for {label} at {path}");
        return None;
    }
    match ctx.device.create_shader(stage, &blob, label) {
        Ok(handle) => Some(handle),
        Err(err) => {
            log::error!("Creating {stage} shader {label} failed: {err}");
            None
        }
    }
}
