//! Per-project and per-batch sync reports

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use mirror_git::FailureCategory;
use serde::Serialize;

use super::error::SyncError;
use super::reconciler::ReconcileSummary;
use crate::ProjectId;

/// Overall outcome of syncing one project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    Success,
    PartialFailure,
    TotalFailure,
}

impl SyncStatus {
    /// Aggregate destination outcomes.
    ///
    /// No destinations at all counts as success.
    pub fn from_outcomes(outcomes: &[DestinationOutcome]) -> Self {
        let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
        if succeeded == outcomes.len() {
            Self::Success
        } else if succeeded > 0 {
            Self::PartialFailure
        } else {
            Self::TotalFailure
        }
    }
}

impl std::fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Success => "success",
            Self::PartialFailure => "partial failure",
            Self::TotalFailure => "total failure",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DestinationStatus {
    /// Branch pushed. A tag push failure is carried along as a warning.
    Succeeded { tags_warning: Option<String> },
    Failed {
        category: FailureCategory,
        message: String,
    },
}

/// What happened to one destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DestinationOutcome {
    /// Remote name in the mirror (`backup{i}`)
    pub remote: String,
    /// Address as configured
    pub address: String,
    pub status: DestinationStatus,
}

impl DestinationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self.status, DestinationStatus::Succeeded { .. })
    }

    /// The push failure as a [`SyncError`], if the destination failed.
    pub fn error(&self) -> Option<SyncError> {
        match &self.status {
            DestinationStatus::Succeeded { .. } => None,
            DestinationStatus::Failed { category, message } => Some(SyncError::DestinationPush {
                remote: self.remote.clone(),
                category: *category,
                message: message.clone(),
            }),
        }
    }
}

/// Report for a single project.
#[derive(Debug, Clone, Serialize)]
pub struct SyncResult {
    pub project: ProjectId,
    pub status: SyncStatus,
    /// Fatal error that stopped the sync, if any
    pub error: Option<SyncError>,
    /// Primary branch, once resolved
    pub primary_branch: Option<String>,
    /// Destination remotes added, updated, or removed this run
    pub remotes: ReconcileSummary,
    pub destinations: Vec<DestinationOutcome>,
    pub warnings: Vec<SyncError>,
    /// Whether the local mirror was removed afterwards
    pub cleaned: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl SyncResult {
    pub(crate) fn start(project: ProjectId) -> Self {
        let now = Utc::now();
        Self {
            project,
            status: SyncStatus::TotalFailure,
            error: None,
            primary_branch: None,
            remotes: ReconcileSummary::default(),
            destinations: Vec::new(),
            warnings: Vec::new(),
            cleaned: false,
            started_at: now,
            finished_at: now,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == SyncStatus::Success
    }

    pub fn failed_destinations(&self) -> impl Iterator<Item = &DestinationOutcome> {
        self.destinations.iter().filter(|o| !o.is_success())
    }
}

/// Results of syncing many projects, keyed by project id.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub results: BTreeMap<ProjectId, SyncResult>,
}

impl BatchReport {
    /// `true` when every project synced successfully (vacuously for none).
    pub fn all_succeeded(&self) -> bool {
        self.results.values().all(SyncResult::is_success)
    }

    pub fn succeeded(&self) -> Vec<&ProjectId> {
        self.results
            .iter()
            .filter(|(_, r)| r.is_success())
            .map(|(id, _)| id)
            .collect()
    }

    pub fn failed(&self) -> Vec<&ProjectId> {
        self.results
            .iter()
            .filter(|(_, r)| !r.is_success())
            .map(|(id, _)| id)
            .collect()
    }

    pub fn get(&self, id: &ProjectId) -> Option<&SyncResult> {
        self.results.get(id)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn outcome(ok: bool) -> DestinationOutcome {
        DestinationOutcome {
            remote: "backup0".into(),
            address: "/tmp/x.git".into(),
            status: if ok {
                DestinationStatus::Succeeded { tags_warning: None }
            } else {
                DestinationStatus::Failed {
                    category: FailureCategory::Network,
                    message: "unreachable".into(),
                }
            },
        }
    }

    #[rstest]
    #[case(&[], SyncStatus::Success)]
    #[case(&[true, true], SyncStatus::Success)]
    #[case(&[true, false, true], SyncStatus::PartialFailure)]
    #[case(&[false, false], SyncStatus::TotalFailure)]
    fn test_status_from_outcomes(#[case] oks: &[bool], #[case] expected: SyncStatus) {
        let outcomes: Vec<_> = oks.iter().map(|ok| outcome(*ok)).collect();
        assert_eq!(SyncStatus::from_outcomes(&outcomes), expected);
    }

    #[test]
    fn test_tag_warning_keeps_destination_successful() {
        let outcome = DestinationOutcome {
            status: DestinationStatus::Succeeded {
                tags_warning: Some("tags rejected".into()),
            },
            ..outcome(true)
        };
        assert!(outcome.is_success());
        assert!(outcome.error().is_none());
    }

    #[test]
    fn test_failed_destination_error() {
        let error = outcome(false).error().unwrap();
        assert!(matches!(
            error,
            SyncError::DestinationPush {
                category: FailureCategory::Network,
                ..
            }
        ));
    }
}
