//! Network operations against remotes
//!
//! The [`Transport`] trait is the only way the sync engine reaches the
//! network. [`GitCommand`] implements it by running the `git` executable, so
//! whatever credential helper and SSH configuration the user has set up is
//! applied transparently.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::failure::FailureCategory;

/// Remote operation being performed, for logging and error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    FetchBranches,
    FetchTags,
    PushBranch,
    PushTags,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::FetchBranches => "fetch branches",
            Self::FetchTags => "fetch tags",
            Self::PushBranch => "push branch",
            Self::PushTags => "push tags",
        };
        f.write_str(name)
    }
}

/// A failed remote operation.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{operation} against '{remote}' failed ({category}): {message}")]
pub struct TransportError {
    pub operation: Operation,
    pub remote: String,
    pub category: FailureCategory,
    pub message: String,
}

impl TransportError {
    pub fn new(
        operation: Operation,
        remote: impl Into<String>,
        category: FailureCategory,
        message: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            remote: remote.into(),
            category,
            message: message.into(),
        }
    }

    /// Build an error from what git printed on stderr.
    pub fn from_stderr(operation: Operation, remote: impl Into<String>, stderr: &str) -> Self {
        let message = stderr.trim();
        let message = if message.is_empty() {
            "git exited with a failure status and no output"
        } else {
            message
        };
        Self::new(
            operation,
            remote,
            FailureCategory::from_stderr(message),
            message,
        )
    }
}

/// Credential-resolved access to remotes.
///
/// Implementations fetch into and push from the repository at `repo`, using
/// remotes already configured there by name. Branch pushes must never be
/// forced.
pub trait Transport {
    /// Fetch every branch of `remote` into `refs/remotes/<remote>/*`,
    /// dropping tracking refs for branches deleted upstream.
    fn fetch_branches(&self, repo: &Path, remote: &str) -> Result<(), TransportError>;

    /// Fetch every tag of `remote` into `refs/tags/*`.
    fn fetch_tags(&self, repo: &Path, remote: &str) -> Result<(), TransportError>;

    /// Push local `branch` to the branch of the same name on `remote`.
    fn push_branch(&self, repo: &Path, remote: &str, branch: &str) -> Result<(), TransportError>;

    /// Push all local tags to `remote`.
    fn push_tags(&self, repo: &Path, remote: &str) -> Result<(), TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn fetch_branches(&self, repo: &Path, remote: &str) -> Result<(), TransportError> {
        (**self).fetch_branches(repo, remote)
    }

    fn fetch_tags(&self, repo: &Path, remote: &str) -> Result<(), TransportError> {
        (**self).fetch_tags(repo, remote)
    }

    fn push_branch(&self, repo: &Path, remote: &str, branch: &str) -> Result<(), TransportError> {
        (**self).push_branch(repo, remote, branch)
    }

    fn push_tags(&self, repo: &Path, remote: &str) -> Result<(), TransportError> {
        (**self).push_tags(repo, remote)
    }
}

/// [`Transport`] backed by the `git` executable.
#[derive(Debug, Clone)]
pub struct GitCommand {
    program: PathBuf,
}

impl Default for GitCommand {
    fn default() -> Self {
        Self {
            program: PathBuf::from("git"),
        }
    }
}

impl GitCommand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific git executable instead of the one on `PATH`.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run(
        &self,
        repo: &Path,
        operation: Operation,
        remote: &str,
        args: &[&str],
    ) -> Result<(), TransportError> {
        tracing::debug!(
            repo = %repo.display(),
            %remote,
            %operation,
            args = ?args,
            "Running git"
        );

        let output = Command::new(&self.program)
            .args(args)
            .current_dir(repo)
            // Fail instead of waiting for a password nobody will type.
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                TransportError::new(
                    operation,
                    remote,
                    FailureCategory::Unknown,
                    format!("failed to run {}: {e}", self.program.display()),
                )
            })?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(TransportError::from_stderr(operation, remote, &stderr))
        }
    }
}

impl Transport for GitCommand {
    fn fetch_branches(&self, repo: &Path, remote: &str) -> Result<(), TransportError> {
        let refspec = format!("+refs/heads/*:refs/remotes/{remote}/*");
        self.run(
            repo,
            Operation::FetchBranches,
            remote,
            &["fetch", "--prune", "--no-tags", remote, &refspec],
        )
    }

    fn fetch_tags(&self, repo: &Path, remote: &str) -> Result<(), TransportError> {
        self.run(repo, Operation::FetchTags, remote, &["fetch", "--tags", remote])
    }

    fn push_branch(&self, repo: &Path, remote: &str, branch: &str) -> Result<(), TransportError> {
        let refspec = format!("refs/heads/{branch}:refs/heads/{branch}");
        self.run(repo, Operation::PushBranch, remote, &["push", remote, &refspec])
    }

    fn push_tags(&self, repo: &Path, remote: &str) -> Result<(), TransportError> {
        self.run(repo, Operation::PushTags, remote, &["push", "--tags", remote])
    }
}
