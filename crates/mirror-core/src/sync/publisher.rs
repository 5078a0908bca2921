//! Pushing the primary branch and tags to every destination

use mirror_git::naming::destination_remote_name;
use mirror_git::{LocalMirror, Transport};

use super::result::{DestinationOutcome, DestinationStatus};
use crate::Destination;

/// Push `branch` and then tags to each destination in order.
///
/// Every destination gets an outcome; a failure never stops the loop.
pub(crate) fn publish<T: Transport>(
    transport: &T,
    mirror: &LocalMirror,
    branch: &str,
    destinations: &[Destination],
) -> Vec<DestinationOutcome> {
    destinations
        .iter()
        .enumerate()
        .map(|(index, destination)| {
            let remote = destination_remote_name(index);
            let status = push_one(transport, mirror, &remote, branch);
            DestinationOutcome {
                remote,
                address: destination.address().to_string(),
                status,
            }
        })
        .collect()
}

fn push_one<T: Transport>(
    transport: &T,
    mirror: &LocalMirror,
    remote: &str,
    branch: &str,
) -> DestinationStatus {
    if let Err(e) = transport.push_branch(mirror.root(), remote, branch) {
        tracing::warn!(%remote, %branch, category = %e.category, error = %e.message, "Push failed");
        return DestinationStatus::Failed {
            category: e.category,
            message: e.message,
        };
    }
    tracing::info!(%remote, %branch, "Pushed branch");

    let tags_warning = match transport.push_tags(mirror.root(), remote) {
        Ok(()) => None,
        Err(e) => {
            tracing::warn!(%remote, error = %e.message, "Tag push failed");
            Some(e.message)
        }
    };
    DestinationStatus::Succeeded { tags_warning }
}
