//! GLSL shader composition and compilation.
//!
//! [`ShaderComposer`] expands `#include` directives against a [`ShaderLibrary`],
//! turns a variant option string into preprocessor defines and runs the result
//! through naga. The output format depends on the [`GraphicsBackend`]:
//! SPIR-V for Vulkan, WGSL text for wgpu and the dummy backend.
//!
//! ```ignore
//! let composer = ShaderComposer::with_builtin_library();
//! let blob = composer.compile(source, ShaderStage::Fragment, "EMISSIVE_MAP;IBL", GraphicsBackend::Vulkan)?;
//! ```

pub mod library;

use std::collections::{HashMap, HashSet};

use ember_core::profile_scope;

use crate::backend::{GraphicsBackend, ShaderFormat};
use crate::error::GraphicsError;

pub use library::ShaderLibrary;

/// Pipeline stage a shader source is compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShaderStage {
    Vertex,
    Fragment,
    Compute,
}

impl ShaderStage {
    /// Preprocessor define injected for this stage.
    pub fn define(self) -> &'static str {
        match self {
            Self::Vertex => "VERTEX",
            Self::Fragment => "FRAGMENT",
            Self::Compute => "COMPUTE",
        }
    }

    fn to_naga(self) -> naga::ShaderStage {
        match self {
            Self::Vertex => naga::ShaderStage::Vertex,
            Self::Fragment => naga::ShaderStage::Fragment,
            Self::Compute => naga::ShaderStage::Compute,
        }
    }
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Vertex => write!(f, "vertex"),
            Self::Fragment => write!(f, "fragment"),
            Self::Compute => write!(f, "compute"),
        }
    }
}

/// Shader definition value for compile-time conditionals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderDef {
    /// `#ifdef` / `#ifndef` switch.
    Bool(bool),
    /// `#if NAME == 5` style value.
    Int(i32),
    UInt(u32),
}

impl ShaderDef {
    fn value(&self) -> Option<String> {
        match self {
            ShaderDef::Bool(true) => Some(String::new()),
            ShaderDef::Bool(false) => None,
            ShaderDef::Int(v) => Some(v.to_string()),
            ShaderDef::UInt(v) => Some(v.to_string()),
        }
    }
}

impl From<bool> for ShaderDef {
    fn from(v: bool) -> Self {
        ShaderDef::Bool(v)
    }
}

impl From<i32> for ShaderDef {
    fn from(v: i32) -> Self {
        ShaderDef::Int(v)
    }
}

impl From<u32> for ShaderDef {
    fn from(v: u32) -> Self {
        ShaderDef::UInt(v)
    }
}

/// Split a variant option string (`"EMISSIVE_MAP;IBL"`, `"MAX_LIGHTS=8"`)
/// into shader definitions. Empty tokens are ignored.
pub fn parse_options(options: &str) -> Result<Vec<(String, ShaderDef)>, GraphicsError> {
    let mut defs = Vec::new();
    for token in options.split(';').map(str::trim).filter(|t| !t.is_empty()) {
        match token.split_once('=') {
            Some((name, value)) => {
                let value = value.trim();
                let def = if let Ok(v) = value.parse::<i32>() {
                    ShaderDef::Int(v)
                } else if let Ok(v) = value.parse::<u32>() {
                    ShaderDef::UInt(v)
                } else {
                    return Err(GraphicsError::InvalidParameter(format!(
                        "shader option `{token}` has a non-integer value"
                    )));
                };
                defs.push((name.trim().to_string(), def));
            }
            None => defs.push((token.to_string(), ShaderDef::Bool(true))),
        }
    }
    Ok(defs)
}

/// Resolves includes and compiles GLSL through naga.
pub struct ShaderComposer {
    includes: HashMap<String, String>,
}

impl Default for ShaderComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl ShaderComposer {
    pub fn new() -> Self {
        Self {
            includes: HashMap::new(),
        }
    }

    /// Composer with every built-in include registered.
    pub fn with_builtin_library() -> Self {
        let mut composer = Self::new();
        composer.add_library(&ShaderLibrary::builtin());
        composer
    }

    pub fn add_library(&mut self, library: &ShaderLibrary) {
        for (path, source) in library.includes() {
            self.register_include(path, source);
        }
    }

    /// Register a single include. `path` is what appears in `#include "path"`.
    pub fn register_include(&mut self, path: &str, source: &str) {
        self.includes.insert(path.to_string(), source.to_string());
    }

    /// Expand `#include` directives without further processing.
    pub fn resolve_glsl(&self, source: &str) -> Result<String, GraphicsError> {
        let mut included = HashSet::new();
        self.resolve_includes(source, &mut included)
    }

    /// Build the define map for a stage and option string.
    pub fn build_defines(
        stage: ShaderStage,
        options: &str,
    ) -> Result<naga::FastHashMap<String, String>, GraphicsError> {
        let mut defines = naga::FastHashMap::default();
        defines.insert(stage.define().to_string(), String::new());
        for (name, def) in parse_options(options)? {
            if let Some(value) = def.value() {
                defines.insert(name, value);
            }
        }
        Ok(defines)
    }

    /// Parse and validate a GLSL source into a naga module.
    pub fn compose_to_naga(
        &self,
        source: &str,
        stage: ShaderStage,
        options: &str,
    ) -> Result<(naga::Module, naga::valid::ModuleInfo), GraphicsError> {
        profile_scope!("shader_compose_to_naga");

        let resolved = self.resolve_glsl(source)?;
        let glsl_options = naga::front::glsl::Options {
            stage: stage.to_naga(),
            defines: Self::build_defines(stage, options)?,
        };

        let mut frontend = naga::front::glsl::Frontend::default();
        let module = frontend.parse(&glsl_options, &resolved).map_err(|errors| {
            GraphicsError::ShaderCompilationFailed(format!("GLSL parse error:\n{errors}"))
        })?;

        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        );
        let info = validator.validate(&module).map_err(|e| {
            GraphicsError::ShaderCompilationFailed(format!("Validation error: {e}"))
        })?;

        Ok((module, info))
    }

    /// Compile to the artifact format `backend` consumes.
    pub fn compile(
        &self,
        source: &str,
        stage: ShaderStage,
        options: &str,
        backend: GraphicsBackend,
    ) -> Result<Vec<u8>, GraphicsError> {
        profile_scope!("shader_compile");

        let (module, info) = self.compose_to_naga(source, stage, options)?;
        match backend.shader_format() {
            ShaderFormat::SpirV => {
                let words = naga::back::spv::write_vec(
                    &module,
                    &info,
                    &naga::back::spv::Options::default(),
                    None,
                )
                .map_err(|e| {
                    GraphicsError::ShaderCompilationFailed(format!("SPIR-V generation error: {e}"))
                })?;
                Ok(bytemuck::cast_slice::<u32, u8>(&words).to_vec())
            }
            ShaderFormat::Wgsl => {
                let wgsl = naga::back::wgsl::write_string(
                    &module,
                    &info,
                    naga::back::wgsl::WriterFlags::empty(),
                )
                .map_err(|e| {
                    GraphicsError::ShaderCompilationFailed(format!("WGSL generation error: {e}"))
                })?;
                Ok(wgsl.into_bytes())
            }
        }
    }

    fn resolve_includes(
        &self,
        source: &str,
        included: &mut HashSet<String>,
    ) -> Result<String, GraphicsError> {
        let mut result = String::with_capacity(source.len());

        for line in source.lines() {
            match parse_include_directive(line.trim()) {
                Some(path) => {
                    if !included.insert(path.to_string()) {
                        continue;
                    }
                    let include_source = self.includes.get(path).ok_or_else(|| {
                        GraphicsError::ShaderCompilationFailed(format!(
                            "Include not found: \"{path}\""
                        ))
                    })?;
                    result.push_str(&self.resolve_includes(include_source, included)?);
                }
                None => result.push_str(line),
            }
            result.push('\n');
        }

        Ok(result)
    }
}

/// `#include "path"` or `#include <path>`.
fn parse_include_directive(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("#include")?.trim();
    if let Some(inner) = rest.strip_prefix('"') {
        inner.strip_suffix('"')
    } else if let Some(inner) = rest.strip_prefix('<') {
        inner.strip_suffix('>')
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const TINT_FS: &str = r#"#version 450
#include "test/tint.glsl"

layout(location = 0) out vec4 out_color;

void main() {
#ifdef USE_RED
    out_color = vec4(tint(1.0), 0.0, 0.0, 1.0);
#else
    out_color = vec4(0.0, tint(1.0), 0.0, 1.0);
#endif
}
"#;

    fn composer() -> ShaderComposer {
        let mut composer = ShaderComposer::new();
        composer.register_include("test/tint.glsl", "float tint(float x) { return x * 0.5; }");
        composer
    }

    #[rstest]
    #[case::flag("ALBEDO_MAP", vec![("ALBEDO_MAP", ShaderDef::Bool(true))])]
    #[case::value("MAX_LIGHTS=8", vec![("MAX_LIGHTS", ShaderDef::Int(8))])]
    #[case::unsigned("MASK=4000000000", vec![("MASK", ShaderDef::UInt(4_000_000_000))])]
    #[case::list(
        "EMISSIVE_MAP;IBL",
        vec![("EMISSIVE_MAP", ShaderDef::Bool(true)), ("IBL", ShaderDef::Bool(true))]
    )]
    #[case::empty("", vec![])]
    #[case::stray_separators(";ATM;", vec![("ATM", ShaderDef::Bool(true))])]
    fn test_parse_options(#[case] options: &str, #[case] expected: Vec<(&str, ShaderDef)>) {
        let parsed = parse_options(options).unwrap();
        let expected: Vec<(String, ShaderDef)> = expected
            .into_iter()
            .map(|(n, d)| (n.to_string(), d))
            .collect();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_parse_options_rejects_garbage_value() {
        assert!(matches!(
            parse_options("MAX_LIGHTS=many"),
            Err(GraphicsError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_build_defines_adds_stage() {
        let defines = ShaderComposer::build_defines(ShaderStage::Fragment, "IBL").unwrap();
        assert!(defines.contains_key("FRAGMENT"));
        assert!(defines.contains_key("IBL"));
        assert!(!defines.contains_key("VERTEX"));
    }

    #[rstest]
    #[case::wgsl(GraphicsBackend::Dummy)]
    #[case::wgpu(GraphicsBackend::Wgpu)]
    fn test_compile_wgsl(#[case] backend: GraphicsBackend) {
        let blob = composer()
            .compile(TINT_FS, ShaderStage::Fragment, "USE_RED", backend)
            .unwrap();
        let text = String::from_utf8(blob).unwrap();
        assert!(text.contains("@fragment"));
    }

    #[test]
    fn test_compile_spirv_magic() {
        let blob = composer()
            .compile(TINT_FS, ShaderStage::Fragment, "", GraphicsBackend::Vulkan)
            .unwrap();
        assert_eq!(blob.len() % 4, 0);
        assert_eq!(&blob[..4], &0x0723_0203u32.to_ne_bytes());
    }

    #[test]
    fn test_double_include_is_skipped() {
        let source = "#include \"test/tint.glsl\"\n#include \"test/tint.glsl\"\n";
        let resolved = composer().resolve_glsl(source).unwrap();
        assert_eq!(resolved.matches("float tint").count(), 1);
    }

    #[test]
    fn test_missing_include() {
        let source = "#version 450\n#include \"nonexistent/file.glsl\"\nvoid main() {}\n";
        let result = ShaderComposer::new().compile(
            source,
            ShaderStage::Fragment,
            "",
            GraphicsBackend::Dummy,
        );
        assert!(matches!(
            result,
            Err(GraphicsError::ShaderCompilationFailed(_))
        ));
    }

    #[test]
    fn test_syntax_error_is_reported() {
        let result = composer().compile(
            "#version 450\nvoid main() { this is not glsl }\n",
            ShaderStage::Fragment,
            "",
            GraphicsBackend::Dummy,
        );
        assert!(result.is_err());
    }

    #[rstest]
    #[case::quoted(r#"#include "foo/bar.glsl""#, Some("foo/bar.glsl"))]
    #[case::angled("#include <foo/bar.glsl>", Some("foo/bar.glsl"))]
    #[case::define("#define FOO", None)]
    #[case::comment("// comment", None)]
    fn test_parse_include_directive(#[case] line: &str, #[case] expected: Option<&str>) {
        assert_eq!(parse_include_directive(line), expected);
    }
}
