//! Suffix-optional path resolution.
//!
//! A record `john` of a JSON store lives at `users/john.json`, yet callers may
//! name it either way. Resolution tries the literal path first and falls back
//! to the suffixed one. Collections resolve the same way, which lets `delete`
//! treat "collection" and "collection/resource" uniformly.

use crate::error::StoreError;
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

/// Marker appended to the canonical file name while a write is in flight.
pub const TEMP_SUFFIX: &str = "tmp";

/// Returns the first existing path among `path` and `path.<suffix>`.
///
/// # Errors
///
/// Returns [`StoreError::NotFound`] when neither candidate exists.
pub fn resolve(path: impl AsRef<Path>, suffix: &str) -> Result<PathBuf, StoreError> {
    let path = path.as_ref();

    if path.exists() {
        return Ok(path.to_path_buf());
    }

    let suffixed = with_suffix(path, suffix);
    if suffixed.exists() {
        return Ok(suffixed);
    }

    Err(StoreError::NotFound { path: path.display().to_string().into(), context: None })
}

/// Builds the canonical `<dir>/<name>.<suffix>` record path.
#[must_use]
pub fn canonical(dir: &Path, name: impl AsRef<Path>, suffix: &str) -> PathBuf {
    with_suffix(&dir.join(name), suffix)
}

/// Builds the sibling temporary path used while `canonical` is being written.
#[must_use]
pub fn temp_path(canonical: &Path) -> PathBuf {
    with_suffix(canonical, TEMP_SUFFIX)
}

/// Whether `path` names an in-flight (or orphaned) temporary file.
#[must_use]
pub fn is_temp(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == TEMP_SUFFIX)
}

/// Lexically cleans a root directory path.
///
/// `.` segments and redundant separators disappear, `dir/..` pairs collapse,
/// and leading `..` segments of relative paths are kept. An empty result
/// becomes `.`.
#[must_use]
pub fn clean(path: impl AsRef<Path>) -> PathBuf {
    let mut out = PathBuf::new();

    for component in path.as_ref().components() {
        match component {
            Component::CurDir => {},
            Component::ParentDir => {
                let can_pop =
                    matches!(out.components().next_back(), Some(Component::Normal(_)));
                if can_pop {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            },
            other => out.push(other.as_os_str()),
        }
    }

    if out.as_os_str().is_empty() { PathBuf::from(".") } else { out }
}

/// Appends `.<suffix>` to the full file name (never replaces an extension).
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut raw: OsString = path.as_os_str().to_owned();
    raw.push(".");
    raw.push(suffix);
    PathBuf::from(raw)
}
