//! The on-disk mirror repository

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use git2::{ErrorCode, Oid, Repository, build::CheckoutBuilder};

use crate::{Error, Result};

/// What happened to a remote when it was set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteChange {
    Added,
    Updated,
    Unchanged,
}

/// Outcome of moving a local branch to an upstream commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FastForward {
    /// The local branch did not exist and was created at the upstream commit.
    Created(Oid),
    /// The local branch already contains the upstream commit.
    UpToDate(Oid),
    /// The local branch moved forward.
    Advanced { from: Oid, to: Oid },
}

/// A non-bare repository used as the intermediary between upstream and the
/// destinations.
pub struct LocalMirror {
    root: PathBuf,
    repo: Repository,
}

impl std::fmt::Debug for LocalMirror {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalMirror").field("root", &self.root).finish()
    }
}

impl LocalMirror {
    /// Open the repository at `root`, creating it when nothing is there yet.
    ///
    /// An empty directory is treated like a missing one (an earlier run may
    /// have been interrupted right after creating it). A non-empty directory
    /// without a repository, a bare repository, or a repository that git
    /// cannot read are all rejected rather than overwritten.
    ///
    /// Returns the mirror and whether it was newly created.
    pub fn open_or_init(root: &Path) -> Result<(Self, bool)> {
        if root.exists() && !root.is_dir() {
            return Err(Error::not_a_repository(root, "path exists and is not a directory"));
        }

        if !root.exists() || is_empty_dir(root)? {
            std::fs::create_dir_all(root).map_err(|e| mirror_fs::Error::io(root, e))?;
            let repo = Repository::init(root)?;
            tracing::info!(path = %root.display(), "Initialized mirror repository");
            return Ok((
                Self {
                    root: root.to_path_buf(),
                    repo,
                },
                true,
            ));
        }

        Self::open(root).map(|mirror| (mirror, false))
    }

    /// Open an existing mirror repository at `root`.
    pub fn open(root: &Path) -> Result<Self> {
        if !root.join(".git").exists() {
            return Err(Error::not_a_repository(root, "directory is not empty and has no .git"));
        }

        let repo = Repository::open(root)
            .map_err(|e| Error::not_a_repository(root, e.message().to_string()))?;

        if repo.is_bare() {
            return Err(Error::not_a_repository(root, "repository is bare"));
        }

        // An unborn HEAD is fine (fresh mirror); anything else unreadable is not.
        match repo.head() {
            Ok(_) => {}
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {}
            Err(e) => {
                return Err(Error::not_a_repository(root, e.message().to_string()));
            }
        }

        Ok(Self {
            root: root.to_path_buf(),
            repo,
        })
    }

    /// Working directory of the mirror.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Set a local config value (e.g. `credential.helper`).
    pub fn set_config(&self, key: &str, value: &str) -> Result<()> {
        self.repo.config()?.set_str(key, value)?;
        Ok(())
    }

    /// All remotes with their URLs, keyed by name.
    ///
    /// Remotes without a URL (or with a non UTF-8 one) map to an empty string.
    pub fn remotes(&self) -> Result<BTreeMap<String, String>> {
        let names = self.repo.remotes()?;
        let mut remotes = BTreeMap::new();
        for name in names.iter().flatten() {
            let remote = self.repo.find_remote(name)?;
            remotes.insert(name.to_string(), remote.url().unwrap_or_default().to_string());
        }
        Ok(remotes)
    }

    /// Point `name` at `url`, adding the remote if it does not exist.
    pub fn set_remote(&self, name: &str, url: &str) -> Result<RemoteChange> {
        match self.repo.find_remote(name) {
            Ok(remote) if remote.url() == Some(url) => Ok(RemoteChange::Unchanged),
            Ok(_) => {
                self.repo.remote_set_url(name, url)?;
                tracing::debug!(remote = %name, %url, "Updated remote URL");
                Ok(RemoteChange::Updated)
            }
            Err(e) if e.code() == ErrorCode::NotFound => {
                self.repo.remote(name, url)?;
                tracing::debug!(remote = %name, %url, "Added remote");
                Ok(RemoteChange::Added)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Delete remote `name` along with its tracking refs.
    pub fn remove_remote(&self, name: &str) -> Result<()> {
        self.repo.remote_delete(name).map_err(|e| {
            if e.code() == ErrorCode::NotFound {
                Error::RemoteNotFound {
                    name: name.to_string(),
                }
            } else {
                e.into()
            }
        })?;
        tracing::debug!(remote = %name, "Removed remote");
        Ok(())
    }

    /// Commit a remote-tracking branch points at, if the branch exists.
    pub fn remote_branch(&self, remote: &str, branch: &str) -> Result<Option<Oid>> {
        let refname = format!("refs/remotes/{remote}/{branch}");
        match self.repo.find_reference(&refname) {
            Ok(reference) => Ok(Some(reference.peel_to_commit()?.id())),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Commit a local branch points at, if the branch exists.
    pub fn local_branch(&self, branch: &str) -> Result<Option<Oid>> {
        let refname = format!("refs/heads/{branch}");
        match self.repo.find_reference(&refname) {
            Ok(reference) => Ok(Some(reference.peel_to_commit()?.id())),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Names of all local tags.
    pub fn tags(&self) -> Result<Vec<String>> {
        let names = self.repo.tag_names(None)?;
        Ok(names.iter().flatten().map(str::to_string).collect())
    }

    /// Move local `branch` to `target` without ever rewriting history, then
    /// check it out.
    ///
    /// Fails with [`Error::CannotFastForward`] when the local branch has
    /// commits that `target` does not contain.
    pub fn fast_forward(&self, branch: &str, target: Oid) -> Result<FastForward> {
        let refname = format!("refs/heads/{branch}");
        let outcome = match self.repo.find_reference(&refname) {
            Err(e) if e.code() == ErrorCode::NotFound => {
                self.repo
                    .reference(&refname, target, false, &format!("mirror: create {branch}"))?;
                FastForward::Created(target)
            }
            Err(e) => return Err(e.into()),
            Ok(mut reference) => {
                let local = reference.peel_to_commit()?.id();
                let annotated = self.repo.find_annotated_commit(target)?;
                let (analysis, _) = self
                    .repo
                    .merge_analysis_for_ref(&reference, &[&annotated])?;

                if analysis.is_up_to_date() {
                    FastForward::UpToDate(local)
                } else if analysis.is_fast_forward() {
                    reference.set_target(target, &format!("mirror: fast-forward to {target}"))?;
                    FastForward::Advanced {
                        from: local,
                        to: target,
                    }
                } else {
                    return Err(Error::CannotFastForward {
                        branch: branch.to_string(),
                        local: local.to_string(),
                        upstream: target.to_string(),
                    });
                }
            }
        };

        self.checkout(branch)?;
        Ok(outcome)
    }

    /// Point HEAD at local `branch` and force the working tree to match it.
    pub fn checkout(&self, branch: &str) -> Result<()> {
        let refname = format!("refs/heads/{branch}");
        if self.local_branch(branch)?.is_none() {
            return Err(Error::BranchNotFound {
                name: branch.to_string(),
            });
        }
        self.repo.set_head(&refname)?;
        self.repo
            .checkout_head(Some(CheckoutBuilder::default().force()))?;
        Ok(())
    }
}

fn is_empty_dir(path: &Path) -> Result<bool> {
    let mut entries = std::fs::read_dir(path).map_err(|e| mirror_fs::Error::io(path, e))?;
    Ok(entries.next().is_none())
}
