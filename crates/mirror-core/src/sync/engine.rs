//! The sync orchestrator

use std::path::Path;

use chrono::Utc;
use mirror_git::{GitCommand, Transport};

use super::error::SyncError;
use super::result::{BatchReport, SyncResult, SyncStatus};
use super::{SyncOptions, initializer, publisher, reconciler, upstream};
use crate::{Destination, Project, ProjectId};

/// Runs the initialize, reconcile, fetch, and publish steps for projects.
///
/// Generic over the [`Transport`] so tests can inject failures; the default
/// shells out to `git`.
#[derive(Debug, Clone, Default)]
pub struct SyncEngine<T: Transport = GitCommand> {
    transport: T,
    options: SyncOptions,
}

impl<T: Transport> SyncEngine<T> {
    pub fn new(transport: T, options: SyncOptions) -> Self {
        Self { transport, options }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Sync one project. Never fails: problems end up in the result.
    ///
    /// With `clean`, the local mirror is deleted afterwards, but only if the
    /// sync was a full success.
    pub fn sync_one(
        &self,
        project: &ProjectId,
        cache_root: &Path,
        destinations: &[Destination],
        clean: bool,
    ) -> SyncResult {
        let span = tracing::info_span!("sync", project = %project);
        let _guard = span.enter();

        let mut result = SyncResult::start(project.clone());
        match self.run(project, cache_root, destinations, &mut result) {
            Ok(()) => result.status = SyncStatus::from_outcomes(&result.destinations),
            Err(error) => {
                tracing::error!(%error, "Sync aborted");
                result.status = SyncStatus::TotalFailure;
                result.error = Some(error);
            }
        }

        if clean && result.is_success() {
            let path = cache_root.join(project.as_str());
            match mirror_fs::io::remove_dir(&path) {
                Ok(()) => {
                    tracing::info!(path = %path.display(), "Removed local mirror");
                    result.cleaned = true;
                }
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Could not remove local mirror"
                    );
                    result.warnings.push(SyncError::Cleanup {
                        path,
                        message: e.to_string(),
                    });
                }
            }
        }

        result.finished_at = Utc::now();
        tracing::info!(status = %result.status, "Sync finished");
        result
    }

    /// Sync every project in order. One project's failure never stops the
    /// others.
    ///
    /// Entries sharing an id are synced once, with their destinations merged
    /// in first-seen order, so every id gets exactly one result.
    pub fn sync_all(&self, projects: &[Project], cache_root: &Path, clean: bool) -> BatchReport {
        let mut report = BatchReport::default();
        for (id, destinations) in merge_duplicates(projects) {
            let result = self.sync_one(&id, cache_root, &destinations, clean);
            report.results.insert(id, result);
        }
        tracing::info!(
            total = report.len(),
            failed = report.failed().len(),
            "Batch finished"
        );
        report
    }

    // The mirror handle is dropped when this returns, before any cleanup.
    fn run(
        &self,
        project: &ProjectId,
        cache_root: &Path,
        destinations: &[Destination],
        result: &mut SyncResult,
    ) -> Result<(), SyncError> {
        let mirror = initializer::initialize(project, cache_root, &self.options)?;
        result.remotes = reconciler::reconcile(&mirror, destinations)?;

        let branch = upstream::fetch_and_integrate(
            &self.transport,
            &mirror,
            &self.options.primary_branches,
            &mut result.warnings,
        )?;
        result.primary_branch = Some(branch.clone());

        if destinations.is_empty() {
            tracing::warn!("No destinations configured; nothing to push");
        }
        result.destinations = publisher::publish(&self.transport, &mirror, &branch, destinations);
        Ok(())
    }
}

fn merge_duplicates(projects: &[Project]) -> Vec<(ProjectId, Vec<Destination>)> {
    let mut merged: Vec<(ProjectId, Vec<Destination>)> = Vec::with_capacity(projects.len());
    for project in projects {
        match merged.iter_mut().find(|(id, _)| *id == project.id) {
            Some((_, destinations)) => {
                tracing::warn!(
                    project = %project.id,
                    "Project listed twice; merging destinations"
                );
                for destination in &project.destinations {
                    if !destinations.contains(destination) {
                        destinations.push(destination.clone());
                    }
                }
            }
            None => merged.push((project.id.clone(), project.destinations.clone())),
        }
    }
    merged
}

/// [`SyncEngine::sync_one`] with the `git` transport and default options.
pub fn sync_one(
    project: &ProjectId,
    cache_root: &Path,
    destinations: &[Destination],
    clean: bool,
) -> SyncResult {
    SyncEngine::<GitCommand>::default().sync_one(project, cache_root, destinations, clean)
}

/// [`SyncEngine::sync_all`] with the `git` transport and default options.
pub fn sync_all(projects: &[Project], cache_root: &Path, clean: bool) -> BatchReport {
    SyncEngine::<GitCommand>::default().sync_all(projects, cache_root, clean)
}
