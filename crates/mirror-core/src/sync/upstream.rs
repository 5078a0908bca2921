//! Fetching upstream and integrating the primary branch

use mirror_git::{FastForward, LocalMirror, Transport, UPSTREAM_REMOTE};

use super::error::SyncError;
use crate::PrimaryBranches;

/// Fetch upstream, pick the primary branch, and fast-forward it locally.
///
/// Tag fetch failures are pushed onto `warnings`. Returns the branch name.
pub(crate) fn fetch_and_integrate<T: Transport>(
    transport: &T,
    mirror: &LocalMirror,
    branches: &PrimaryBranches,
    warnings: &mut Vec<SyncError>,
) -> Result<String, SyncError> {
    transport
        .fetch_branches(mirror.root(), UPSTREAM_REMOTE)
        .map_err(|e| SyncError::UpstreamFetch {
            category: e.category,
            message: e.message,
        })?;

    if let Err(e) = transport.fetch_tags(mirror.root(), UPSTREAM_REMOTE) {
        tracing::warn!(error = %e, "Could not fetch upstream tags");
        warnings.push(SyncError::TagFetch { message: e.message });
    }

    let (branch, target) = resolve_primary(mirror, branches)?;

    let outcome = mirror.fast_forward(&branch, target).map_err(|e| match e {
        mirror_git::Error::CannotFastForward {
            branch,
            local,
            upstream,
        } => SyncError::DivergedHistory {
            branch,
            local,
            upstream,
        },
        other => SyncError::Repository {
            message: other.to_string(),
        },
    })?;

    match outcome {
        FastForward::Created(oid) => tracing::info!(%branch, commit = %oid, "Created local branch"),
        FastForward::UpToDate(oid) => tracing::debug!(%branch, commit = %oid, "Already up to date"),
        FastForward::Advanced { from, to } => {
            tracing::info!(%branch, %from, %to, "Fast-forwarded local branch")
        }
    }
    Ok(branch)
}

fn resolve_primary(
    mirror: &LocalMirror,
    branches: &PrimaryBranches,
) -> Result<(String, git2::Oid), SyncError> {
    for name in branches.iter() {
        let found = mirror
            .remote_branch(UPSTREAM_REMOTE, name)
            .map_err(|e| SyncError::Repository {
                message: e.to_string(),
            })?;
        if let Some(oid) = found {
            return Ok((name.to_string(), oid));
        }
    }
    Err(SyncError::NoPrimaryBranch {
        tried: branches.names().to_vec(),
    })
}
