//! PathKey construction and path normalization utilities

use crate::error::ApiError;
use crate::types::PathKey;
use std::path::{Component, Path, PathBuf};
use unicode_normalization::UnicodeNormalization;

/// Canonicalize a scan root (resolves symlinks, `..`, `.`).
///
/// Uses dunce so Windows roots don't come back as `\\?\` verbatim paths.
pub fn canonicalize_root(path: &Path) -> Result<PathBuf, ApiError> {
    dunce::canonicalize(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ApiError::NotFound(path.to_path_buf())
        } else {
            ApiError::StorageError(e.into())
        }
    })
}

/// Build the PathKey for `file` found under `root`.
///
/// The key is root-relative and joins components with `/` regardless of
/// platform. Names are kept exactly as the filesystem reports them, so two
/// distinct files never share a key. Returns `None` when a component is not
/// valid UTF-8: such a name has no lossless key and the caller must report it.
/// Paths outside `root` fall back to their full form.
pub fn path_key(root: &Path, file: &Path) -> Option<PathKey> {
    let relative = file.strip_prefix(root).unwrap_or(file);
    let mut parts: Vec<&str> = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(name) => parts.push(name.to_str()?),
            Component::ParentDir => parts.push(".."),
            Component::RootDir | Component::Prefix(_) if relative == file => parts.push(""),
            _ => {}
        }
    }
    Some(PathKey::new(parts.join("/")))
}

/// Normalize a path string (without filesystem access)
///
/// Normalizes Unicode to NFC and strips trailing slashes (except root). Used to
/// compare user-typed patterns with on-disk names, never to build keys.
pub fn normalize_path_string(path: &str) -> String {
    let normalized: String = path.nfc().collect();

    let mut result = normalized;
    if result.len() > 1 {
        while result.ends_with('/') || result.ends_with('\\') {
            result.pop();
        }
    }

    result
}
