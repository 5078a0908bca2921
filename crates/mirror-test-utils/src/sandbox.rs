//! [`Sandbox`] builder for sync scenarios.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::git;

/// A temporary directory laid out as:
///
/// ```text
/// upstream/<project-id>/   working repos standing in for the hosted service
/// cache/                   cache root for local mirrors
/// destinations/<name>.git  bare push targets
/// ```
///
/// Destination addresses are absolute paths, which the engine passes to git
/// verbatim.
pub struct Sandbox {
    temp_dir: TempDir,
}

impl Default for Sandbox {
    fn default() -> Self {
        Self::new()
    }
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Base URL to configure as the upstream host.
    pub fn upstream_base(&self) -> String {
        self.root().join("upstream").to_string_lossy().into_owned()
    }

    pub fn cache_root(&self) -> PathBuf {
        self.root().join("cache")
    }

    /// Path of the upstream repository for `id`.
    pub fn upstream_path(&self, id: &str) -> PathBuf {
        self.root().join("upstream").join(id)
    }

    /// Where the engine keeps the local mirror for `id`.
    pub fn mirror_path(&self, id: &str) -> PathBuf {
        self.cache_root().join(id)
    }

    /// Create an upstream project whose history lives on `branch`.
    /// Returns the initial commit id.
    pub fn create_project(&self, id: &str, branch: &str) -> String {
        git::init_with_commit(&self.upstream_path(id), branch)
    }

    /// Add a commit to the upstream project. Returns the new commit id.
    pub fn upstream_commit(&self, id: &str, file: &str, content: &str) -> String {
        git::commit_file(&self.upstream_path(id), file, content, &format!("Update {file}"))
    }

    /// Create a bare destination repository and return its address.
    pub fn destination(&self, name: &str) -> String {
        let path = self.destination_path(name);
        git::init_bare(&path);
        path.to_string_lossy().into_owned()
    }

    /// Address of a destination that does not exist, so pushes to it fail.
    pub fn missing_destination(&self, name: &str) -> String {
        self.destination_path(name).to_string_lossy().into_owned()
    }

    pub fn destination_path(&self, name: &str) -> PathBuf {
        self.root().join("destinations").join(format!("{name}.git"))
    }

    /// Commit id of `branch` in destination `name`, if it was pushed.
    pub fn destination_branch(&self, name: &str, branch: &str) -> Option<String> {
        git::resolve(&self.destination_path(name), &format!("refs/heads/{branch}"))
    }
}
