//! Path helpers for the backslash-oriented paths found in solution and
//! project files.

use std::path::{MAIN_SEPARATOR, Path, PathBuf};

/// Convert a path written with either separator to the host separator.
pub fn native_path(path: &str) -> PathBuf {
    PathBuf::from(
        path.chars()
            .map(|c| if c == '\\' || c == '/' { MAIN_SEPARATOR } else { c })
            .collect::<String>(),
    )
}

/// Resolve a solution- or project-relative path against `base`.
pub fn resolve_relative(base: &Path, relative: &str) -> PathBuf {
    base.join(native_path(relative))
}

/// Absolute form of `path`, without touching the filesystem.
///
/// Falls back to the path itself when the current directory is unavailable.
pub fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Whether `file` lives strictly below `dir` once both are canonicalized.
///
/// Paths that cannot be canonicalized are reported as outside.
pub fn is_within(file: &Path, dir: &Path) -> bool {
    match (file.canonicalize(), dir.canonicalize()) {
        (Ok(file), Ok(dir)) => file != dir && file.starts_with(&dir),
        _ => false,
    }
}
