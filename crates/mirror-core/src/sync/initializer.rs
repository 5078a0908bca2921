//! Local mirror creation and upstream wiring

use std::path::Path;

use mirror_git::{LocalMirror, RemoteChange, UPSTREAM_REMOTE};

use super::SyncOptions;
use super::error::SyncError;
use crate::{ProjectId, upstream_url};

/// Open or create the mirror for `project` under `cache_root` and point
/// `origin` at the canonical upstream URL.
///
/// Existing history is never touched. The credential helper, if any, is only
/// written into freshly created mirrors.
pub(crate) fn initialize(
    project: &ProjectId,
    cache_root: &Path,
    options: &SyncOptions,
) -> Result<LocalMirror, SyncError> {
    let path = cache_root.join(project.as_str());
    let failed = |e: mirror_git::Error| SyncError::Initialization {
        path: path.clone(),
        message: e.to_string(),
    };

    let (mirror, created) = LocalMirror::open_or_init(&path).map_err(failed)?;
    if created {
        tracing::info!(project = %project, path = %path.display(), "Created local mirror");
        if let Some(helper) = &options.credential_helper {
            mirror.set_config("credential.helper", helper).map_err(failed)?;
        }
    } else {
        tracing::debug!(project = %project, path = %path.display(), "Reusing local mirror");
    }

    let url = upstream_url(&options.upstream_base, project);
    match mirror.set_remote(UPSTREAM_REMOTE, &url).map_err(failed)? {
        RemoteChange::Unchanged => {}
        change => tracing::info!(project = %project, %url, ?change, "Configured upstream remote"),
    }

    Ok(mirror)
}
