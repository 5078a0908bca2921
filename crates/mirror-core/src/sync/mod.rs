//! Project synchronization
//!
//! A sync runs four steps against one project's local mirror:
//!
//! - **initializer**: open or create the mirror, point `origin` upstream
//! - **reconciler**: make `backup*` remotes match the destination list
//! - **upstream**: fetch, pick the primary branch, fast-forward it
//! - **publisher**: push branch and tags to each destination
//!
//! Any error before publishing is fatal for that project. Push failures are
//! recorded per destination.

mod engine;
mod error;
mod initializer;
mod publisher;
mod reconciler;
mod result;
mod upstream;

pub use engine::{SyncEngine, sync_all, sync_one};
pub use error::SyncError;
pub use reconciler::ReconcileSummary;
pub use result::{BatchReport, DestinationOutcome, DestinationStatus, SyncResult, SyncStatus};

use crate::PrimaryBranches;
use crate::project::DEFAULT_UPSTREAM_BASE;

/// Settings shared by every project in a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOptions {
    /// Project URLs are `<upstream_base>/<project-id>`
    pub upstream_base: String,
    pub primary_branches: PrimaryBranches,
    /// Written to `credential.helper` in newly created mirrors
    pub credential_helper: Option<String>,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            upstream_base: DEFAULT_UPSTREAM_BASE.to_string(),
            primary_branches: PrimaryBranches::default(),
            credential_helper: None,
        }
    }
}
