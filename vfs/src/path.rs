//! VFS path helpers.
//!
//! VFS paths always use forward slashes, never start or end with a slash
//! and never contain `.` or `..` segments once normalized.

use crate::VfsError;

/// Normalize a VFS path.
///
/// Backslashes become forward slashes. Empty and `.` segments are dropped.
/// `..` segments are rejected, as is a path with no segments left.
pub fn normalize(path: &str) -> Result<String, VfsError> {
    let replaced = path.replace('\\', "/");
    let mut segments = Vec::new();

    for segment in replaced.split('/') {
        match segment {
            "" | "." => continue,
            ".." => {
                return Err(VfsError::InvalidPath(format!(
                    "'{path}' escapes its root"
                )));
            }
            _ => segments.push(segment),
        }
    }

    if segments.is_empty() {
        return Err(VfsError::InvalidPath(format!("'{path}' is empty")));
    }

    Ok(segments.join("/"))
}

/// Split a normalized path into its first segment and the remainder.
pub(crate) fn split_source(path: &str) -> (&str, &str) {
    path.split_once('/').unwrap_or((path, ""))
}

/// Join two path fragments with a single separator.
pub fn join(base: &str, rest: &str) -> String {
    let base = base.trim_end_matches('/');
    let rest = rest.trim_start_matches('/');
    match (base.is_empty(), rest.is_empty()) {
        (true, _) => rest.to_owned(),
        (_, true) => base.to_owned(),
        _ => format!("{base}/{rest}"),
    }
}

/// Last segment of a path.
pub fn file_name(path: &str) -> &str {
    let path = path.trim_end_matches(['/', '\\']);
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// File name without its final extension.
pub fn file_stem(path: &str) -> &str {
    let name = file_name(path);
    match name.rfind('.') {
        Some(0) | None => name,
        Some(pos) => &name[..pos],
    }
}

/// Everything before the last segment, or an empty string.
pub fn parent(path: &str) -> &str {
    let path = path.trim_end_matches(['/', '\\']);
    match path.rfind(['/', '\\']) {
        Some(pos) => &path[..pos],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::simple("textures/brick.png", "textures/brick.png")]
    #[case::leading_slash("/textures/brick.png", "textures/brick.png")]
    #[case::trailing_slash("shaders/", "shaders")]
    #[case::redundant_slashes("shaders///vs_pbr.glsl", "shaders/vs_pbr.glsl")]
    #[case::dot_segments("shaders/./fs_pbr.glsl", "shaders/fs_pbr.glsl")]
    #[case::backslashes("textures\\albedo.png", "textures/albedo.png")]
    fn normalize_accepts(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize(input).unwrap(), expected);
    }

    #[rstest]
    #[case::traversal("textures/../secret.txt")]
    #[case::empty("")]
    #[case::only_slashes("///")]
    #[case::only_dots("././.")]
    fn normalize_rejects(#[case] input: &str) {
        assert!(matches!(normalize(input), Err(VfsError::InvalidPath(_))));
    }

    #[test]
    fn split_source_segments() {
        assert_eq!(
            split_source("assets/textures/brick.png"),
            ("assets", "textures/brick.png")
        );
        assert_eq!(split_source("file.txt"), ("file.txt", ""));
    }

    #[rstest]
    #[case::both("artifacts/shaders", "vulkan", "artifacts/shaders/vulkan")]
    #[case::slashes("artifacts/", "/textures", "artifacts/textures")]
    #[case::empty_base("", "textures", "textures")]
    #[case::empty_rest("textures", "", "textures")]
    fn join_fragments(#[case] base: &str, #[case] rest: &str, #[case] expected: &str) {
        assert_eq!(join(base, rest), expected);
    }

    #[test]
    fn name_stem_parent() {
        assert_eq!(file_name("assets/shaders/fs_pbr.glsl"), "fs_pbr.glsl");
        assert_eq!(file_stem("assets/shaders/fs_pbr.glsl"), "fs_pbr");
        assert_eq!(file_stem("textures/albedo.tar.png"), "albedo.tar");
        assert_eq!(file_stem(".hidden"), ".hidden");
        assert_eq!(parent("assets/shaders/fs_pbr.glsl"), "assets/shaders");
        assert_eq!(parent("fs_pbr.glsl"), "");
    }
}
