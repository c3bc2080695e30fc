//! Storage operations
//!
//! Handles file system operations for HTTP requests: directory listing,
//! markup document reads, and file uploads. The filesystem is the single
//! source of truth; nothing is cached between requests.

use log::{info, warn};
use std::fs;
use std::path::Path;

use crate::error::StorageError;
use crate::storage::results::{ListOutcome, Listing, StoreResult};
use crate::storage::validation::{confine_existing, resolve_path, sanitize_filename};

/// File extension served as a raw document instead of a directory listing
const DOCUMENT_EXTENSION: &str = ".html";

/// Stores an uploaded file under the server root.
///
/// Resolves the target directory, creates it (and all missing parents) if
/// absent, and writes the file, replacing any previous file of the same
/// name. Directories created here persist even when the write fails later.
///
/// Write failures surface as [`StorageError::IoError`]; they are never
/// reported as success.
pub fn store_file(
    root: &Path,
    relative_dir: &str,
    filename: &str,
    content: &[u8],
) -> Result<StoreResult, StorageError> {
    let target_dir = resolve_path(root, relative_dir)?;
    let filename = sanitize_filename(filename)?;

    // Idempotent: succeeds when the directory already exists
    fs::create_dir_all(&target_dir)?;

    // The directory exists now, so the symlink-aware check applies
    let target_dir = confine_existing(root, &target_dir)?;

    let file_path = target_dir.join(&filename);
    fs::write(&file_path, content)?;

    info!(
        "Stored {} ({} bytes, dir: {})",
        file_path.display(),
        content.len(),
        relative_dir
    );

    Ok(StoreResult { file_path })
}

/// Lists a request path under the server root.
///
/// Never fails: rejected or unreadable paths come back as an empty
/// [`Listing`] annotated with the reason, so the listing view always has
/// something to render. Paths naming a markup document are read and
/// returned raw instead of being enumerated.
pub fn list_path(root: &Path, relative: &str) -> ListOutcome {
    if relative.is_empty() {
        return ListOutcome::Page(Listing::annotated(
            String::new(),
            StorageError::EmptyPath.to_string(),
        ));
    }

    // Directory-oriented convention: requests address directories with a
    // trailing separator, and the rendered page links relative to it
    let mut base_path = relative.to_string();
    if !base_path.ends_with('/') {
        base_path.push('/');
    }

    let resolved = match resolve_path(root, relative) {
        Ok(path) => path,
        Err(e) => {
            warn!("Rejected listing path {}: {}", relative, e);
            return ListOutcome::Page(Listing::annotated(base_path, "Wrong directory path"));
        }
    };

    // A markup document is served raw through the same path grammar
    if base_path.trim_end_matches('/').ends_with(DOCUMENT_EXTENSION) {
        return match read_document(root, &resolved) {
            Ok(text) => ListOutcome::Document(text),
            Err(e) => {
                warn!("Failed to read document {}: {}", resolved.display(), e);
                ListOutcome::Page(Listing::annotated(base_path, e.to_string()))
            }
        };
    }

    match read_entries(root, &resolved) {
        Ok(entries) => {
            info!(
                "Listed directory {} (real: {}) - {} entries",
                relative,
                resolved.display(),
                entries.len()
            );
            ListOutcome::Page(Listing {
                base_path,
                entries,
                error: None,
            })
        }
        Err(e) => {
            warn!("Failed to list {} (real: {}): {}", relative, resolved.display(), e);
            ListOutcome::Page(Listing::annotated(base_path, e.to_string()))
        }
    }
}

/// Reads a markup document confined to the server root
fn read_document(root: &Path, resolved: &Path) -> Result<String, StorageError> {
    let confined = confine_existing(root, resolved)?;
    Ok(fs::read_to_string(confined)?)
}

/// Enumerates the immediate entries of a confined directory.
///
/// A synthetic `..` entry is pushed after the real entries and the whole
/// vector is reversed, so callers see `..` first followed by the entries
/// in reverse enumeration order. Enumeration order itself is whatever the
/// filesystem yields.
fn read_entries(root: &Path, resolved: &Path) -> Result<Vec<String>, StorageError> {
    let confined = confine_existing(root, resolved)?;

    if !confined.is_dir() {
        return Err(StorageError::NotADirectory(
            confined.to_string_lossy().to_string(),
        ));
    }

    let mut entries = Vec::new();
    for entry in fs::read_dir(confined)? {
        let entry = entry?;
        entries.push(entry.file_name().to_string_lossy().to_string());
    }

    entries.push("..".to_string());
    entries.reverse();

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_store_then_list_round_trip() {
        let root = TempDir::new().unwrap();

        let stored = store_file(root.path(), "a/b", "x.txt", b"hi").unwrap();
        assert_eq!(
            stored.file_path,
            root.path().canonicalize().unwrap().join("a/b/x.txt")
        );
        assert_eq!(fs::read(root.path().join("a/b/x.txt")).unwrap(), b"hi");

        match list_path(root.path(), "a/b/") {
            ListOutcome::Page(listing) => {
                assert_eq!(listing.entries, vec!["..", "x.txt"]);
                assert!(listing.error.is_none());
                assert_eq!(listing.base_path, "a/b/");
            }
            ListOutcome::Document(_) => panic!("expected a listing page"),
        }
    }

    #[test]
    fn test_store_creates_directories_idempotently() {
        let root = TempDir::new().unwrap();

        store_file(root.path(), "a/b", "first.txt", b"1").unwrap();
        // Second upload into the same directory must not fail
        store_file(root.path(), "a/b", "second.txt", b"2").unwrap();

        assert!(root.path().join("a/b/first.txt").exists());
        assert!(root.path().join("a/b/second.txt").exists());
    }

    #[test]
    fn test_store_replaces_existing_file() {
        let root = TempDir::new().unwrap();

        store_file(root.path(), "docs", "x.txt", b"old").unwrap();
        store_file(root.path(), "docs", "x.txt", b"new").unwrap();

        assert_eq!(fs::read(root.path().join("docs/x.txt")).unwrap(), b"new");
    }

    #[test]
    fn test_store_rejects_escaping_directory() {
        let root = TempDir::new().unwrap();

        let result = store_file(root.path(), "../../etc", "x.txt", b"hi");
        assert!(matches!(result, Err(StorageError::PathTraversal(_))));
        // Nothing may be created outside the root
        assert!(!root.path().join("../x.txt").exists());
    }

    #[test]
    fn test_store_rejects_bad_filename() {
        let root = TempDir::new().unwrap();

        let result = store_file(root.path(), "a", "../evil.txt", b"hi");
        assert!(matches!(result, Err(StorageError::InvalidFilename(_))));
    }

    #[test]
    fn test_list_empty_path_renders_with_error() {
        let root = TempDir::new().unwrap();

        match list_path(root.path(), "") {
            ListOutcome::Page(listing) => {
                assert!(listing.entries.is_empty());
                assert_eq!(listing.error.as_deref(), Some("No directory set"));
            }
            ListOutcome::Document(_) => panic!("expected a listing page"),
        }
    }

    #[test]
    fn test_list_traversal_renders_with_error() {
        let root = TempDir::new().unwrap();

        match list_path(root.path(), "../../etc") {
            ListOutcome::Page(listing) => {
                assert!(listing.entries.is_empty());
                assert_eq!(listing.error.as_deref(), Some("Wrong directory path"));
            }
            ListOutcome::Document(_) => panic!("expected a listing page"),
        }
    }

    #[test]
    fn test_list_missing_directory_renders_with_error() {
        let root = TempDir::new().unwrap();

        match list_path(root.path(), "nope/") {
            ListOutcome::Page(listing) => {
                assert!(listing.entries.is_empty());
                assert!(listing.error.is_some());
            }
            ListOutcome::Document(_) => panic!("expected a listing page"),
        }
    }

    #[test]
    fn test_list_file_where_directory_expected_renders_with_error() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join("plain.txt"), b"data").unwrap();

        match list_path(root.path(), "plain.txt") {
            ListOutcome::Page(listing) => {
                assert!(listing.entries.is_empty());
                assert!(listing.error.is_some());
            }
            ListOutcome::Document(_) => panic!("expected a listing page"),
        }
    }

    #[test]
    fn test_list_markup_document_returns_raw_text() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join("page.html"), "<h1>hello</h1>").unwrap();

        match list_path(root.path(), "page.html") {
            ListOutcome::Document(text) => assert_eq!(text, "<h1>hello</h1>"),
            ListOutcome::Page(_) => panic!("expected raw document"),
        }
    }

    #[test]
    fn test_list_missing_markup_document_renders_with_error() {
        let root = TempDir::new().unwrap();

        match list_path(root.path(), "missing.html") {
            ListOutcome::Page(listing) => {
                assert!(listing.entries.is_empty());
                assert!(listing.error.is_some());
            }
            ListOutcome::Document(_) => panic!("expected a listing page"),
        }
    }

    #[test]
    fn test_entry_order_is_parent_first_then_reversed() {
        let root = TempDir::new().unwrap();
        fs::create_dir(root.path().join("d")).unwrap();
        fs::write(root.path().join("d/one.txt"), b"1").unwrap();
        fs::write(root.path().join("d/two.txt"), b"2").unwrap();

        match list_path(root.path(), "d") {
            ListOutcome::Page(listing) => {
                assert_eq!(listing.entries[0], "..");
                assert_eq!(listing.entries.len(), 3);
                assert!(listing.entries.contains(&"one.txt".to_string()));
                assert!(listing.entries.contains(&"two.txt".to_string()));
            }
            ListOutcome::Document(_) => panic!("expected a listing page"),
        }
    }
}
