//! Path helpers

use std::path::Path;

/// Final path component as a `String`, the key used by citations.
pub fn basename(path: &Path) -> String {
    path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default()
}

pub fn normalize_path(path: &str) -> String {
    // Convert backslashes to forward slashes so marker matching is portable
    path.replace('\\', "/")
}
