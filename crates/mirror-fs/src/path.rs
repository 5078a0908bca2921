//! Path helpers for cache and config locations

use std::path::{Component, Path, PathBuf};

use crate::{Error, Result};

/// Validate that `segment` can be used as a single directory name.
///
/// Project identifiers become directory names under the cache root, so they
/// must not be able to escape it or be mistaken for command-line flags.
pub fn validate_path_segment(segment: &str) -> Result<()> {
    if segment.trim().is_empty() {
        return Err(Error::invalid_segment(segment, "must not be empty"));
    }
    if segment != segment.trim() {
        return Err(Error::invalid_segment(
            segment,
            "must not have leading or trailing whitespace",
        ));
    }
    if segment == "." || segment == ".." {
        return Err(Error::invalid_segment(segment, "relative path component"));
    }
    if segment.contains(['/', '\\']) {
        return Err(Error::invalid_segment(segment, "must not contain path separators"));
    }
    if segment.starts_with('-') {
        return Err(Error::invalid_segment(segment, "must not start with '-'"));
    }
    if segment.chars().any(char::is_control) {
        return Err(Error::invalid_segment(segment, "must not contain control characters"));
    }

    // Catches anything platform-specific the checks above missed (e.g. `C:`).
    let mut components = Path::new(segment).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(Error::invalid_segment(segment, "not a single path component")),
    }
}

/// Expand a leading `~` to the user's home directory.
///
/// Paths without a leading `~`, or when no home directory is known, are
/// returned unchanged.
pub fn expand_home(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

/// Expand `~`, create the directory if needed, and canonicalize it.
pub fn resolve_dir(path: impl AsRef<Path>) -> Result<PathBuf> {
    let expanded = expand_home(path);
    if !expanded.exists() {
        tracing::debug!(path = %expanded.display(), "Creating directory");
        std::fs::create_dir_all(&expanded).map_err(|e| Error::io(&expanded, e))?;
    }
    dunce::canonicalize(&expanded).map_err(|e| Error::io(&expanded, e))
}
