//! Failures recorded during a project sync

use std::path::PathBuf;

use mirror_git::FailureCategory;
use serde::Serialize;

/// Something that went wrong while syncing one project.
///
/// Fatal variants end the project's sync with `TotalFailure` before any
/// destination is contacted. [`SyncError::DestinationPush`] is scoped to a
/// single destination, and [`SyncError::TagFetch`] and [`SyncError::Cleanup`]
/// are only ever recorded as warnings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SyncError {
    #[error("Cannot prepare mirror at {}: {message}", path.display())]
    Initialization { path: PathBuf, message: String },

    #[error("Cannot reconcile destination remotes: {message}")]
    Reconcile { message: String },

    #[error("Fetching upstream failed ({category}): {message}")]
    UpstreamFetch {
        category: FailureCategory,
        message: String,
    },

    #[error("None of the primary branches exist upstream (tried {})", tried.join(", "))]
    NoPrimaryBranch { tried: Vec<String> },

    #[error("Local '{branch}' ({local}) has diverged from upstream ({upstream}); refusing to push")]
    DivergedHistory {
        branch: String,
        local: String,
        upstream: String,
    },

    /// Local repository failure while integrating upstream
    #[error("Repository error: {message}")]
    Repository { message: String },

    #[error("Push to '{remote}' failed ({category}): {message}")]
    DestinationPush {
        remote: String,
        category: FailureCategory,
        message: String,
    },

    #[error("Fetching upstream tags failed: {message}")]
    TagFetch { message: String },

    #[error("Cannot remove mirror at {}: {message}", path.display())]
    Cleanup { path: PathBuf, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_primary_branch_lists_candidates() {
        let error = SyncError::NoPrimaryBranch {
            tried: vec!["main".into(), "master".into()],
        };
        assert_eq!(
            error.to_string(),
            "None of the primary branches exist upstream (tried main, master)"
        );
    }
}
