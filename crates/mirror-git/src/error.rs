//! Error types for mirror-git

use std::path::PathBuf;

/// Result type for mirror-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in mirror-git operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Filesystem error: {0}")]
    Fs(#[from] mirror_fs::Error),

    #[error("Not a usable repository at {path}: {message}")]
    NotARepository { path: PathBuf, message: String },

    #[error("Remote '{name}' not found")]
    RemoteNotFound { name: String },

    #[error("Branch '{name}' not found")]
    BranchNotFound { name: String },

    #[error("Cannot fast-forward {branch} from {local} to {upstream}")]
    CannotFastForward {
        branch: String,
        local: String,
        upstream: String,
    },
}

impl Error {
    pub(crate) fn not_a_repository(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::NotARepository {
            path: path.into(),
            message: message.into(),
        }
    }
}
