//! Path validation
//!
//! Handles path confinement and security checks. Every request-supplied
//! path is re-validated here before any filesystem access.

use std::path::{Component, Path, PathBuf};

use crate::error::StorageError;

/// Resolve a request-supplied relative path against the server root.
///
/// The relative path is walked component by component: `.` segments are
/// dropped, `..` segments pop the previously collected segment, and a pop
/// past the start of the relative path means the request tries to escape
/// the root. Absolute paths and drive prefixes are rejected outright.
///
/// The returned path is the root joined with the normalized remainder, so
/// it is always inside the root. The check is purely lexical; it does not
/// touch the filesystem. Targets that exist on disk get a second,
/// symlink-aware check via [`confine_existing`].
pub fn resolve_path(root: &Path, relative: &str) -> Result<PathBuf, StorageError> {
    let mut normalized = PathBuf::new();

    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => normalized.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    return Err(StorageError::PathTraversal(relative.to_string()));
                }
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(StorageError::PathTraversal(relative.to_string()));
            }
        }
    }

    if normalized.as_os_str().is_empty() {
        return Ok(root.to_path_buf());
    }

    Ok(root.join(normalized))
}

/// Verify that an existing path really lives under the server root.
///
/// Canonicalizes both sides so symlinks cannot smuggle a resolved path
/// outside the root even when the lexical check passed. Returns the
/// canonical path on success.
pub fn confine_existing(root: &Path, candidate: &Path) -> Result<PathBuf, StorageError> {
    let canonical_root = root.canonicalize()?;
    let canonical = candidate.canonicalize()?;

    if canonical.starts_with(&canonical_root) {
        Ok(canonical)
    } else {
        Err(StorageError::PathTraversal(
            candidate.to_string_lossy().to_string(),
        ))
    }
}

/// Sanitize an upload filename.
///
/// The filename names a single directory entry; separators, traversal
/// segments and control characters are rejected.
pub fn sanitize_filename(filename: &str) -> Result<String, StorageError> {
    let trimmed = filename.trim();

    if trimmed.is_empty()
        || trimmed.contains("..")
        || trimmed.contains(['/', '\\'])
        || trimmed.chars().any(|c| c.is_control())
    {
        return Err(StorageError::InvalidFilename(filename.to_string()));
    }

    Ok(trimmed.to_string())
}
