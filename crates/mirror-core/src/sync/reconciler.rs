//! Destination remote reconciliation

use mirror_git::naming::{destination_index, destination_remote_name, is_destination_remote};
use mirror_git::{LocalMirror, RemoteChange};
use serde::Serialize;

use super::error::SyncError;
use crate::Destination;

/// Remote names touched while reconciling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileSummary {
    pub added: Vec<String>,
    pub updated: Vec<String>,
    pub removed: Vec<String>,
}

impl ReconcileSummary {
    pub fn is_unchanged(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty() && self.removed.is_empty()
    }
}

/// Make the mirror's `backup*` remotes exactly `backup0..backup{n-1}`,
/// pointing at `destinations` in order. Other remotes are left alone.
pub(crate) fn reconcile(
    mirror: &LocalMirror,
    destinations: &[Destination],
) -> Result<ReconcileSummary, SyncError> {
    let failed = |e: mirror_git::Error| SyncError::Reconcile {
        message: e.to_string(),
    };
    let mut summary = ReconcileSummary::default();

    for name in mirror.remotes().map_err(failed)?.into_keys() {
        if !is_destination_remote(&name) {
            continue;
        }
        let wanted = destination_index(&name).is_some_and(|i| i < destinations.len());
        if !wanted {
            mirror.remove_remote(&name).map_err(failed)?;
            summary.removed.push(name);
        }
    }

    for (index, destination) in destinations.iter().enumerate() {
        let name = destination_remote_name(index);
        match mirror
            .set_remote(&name, &destination.remote_url())
            .map_err(failed)?
        {
            RemoteChange::Added => summary.added.push(name),
            RemoteChange::Updated => summary.updated.push(name),
            RemoteChange::Unchanged => {}
        }
    }

    if !summary.is_unchanged() {
        tracing::info!(
            added = ?summary.added,
            updated = ?summary.updated,
            removed = ?summary.removed,
            "Reconciled destination remotes"
        );
    }
    Ok(summary)
}
