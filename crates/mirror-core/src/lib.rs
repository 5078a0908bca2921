//! Sync engine for leaf-mirror
//!
//! Mirrors projects from a hosted Git-backed editor into backup repositories.
//! For each project the engine:
//!
//! 1. ensures a local mirror exists under the cache root, wired to upstream,
//! 2. makes the mirror's destination remotes match the configured list,
//! 3. fetches upstream and fast-forwards the primary branch,
//! 4. pushes the branch and tags to every destination independently.
//!
//! ```text
//!              mirror-cli
//!                  |
//!             mirror-core
//!              /        \
//!       mirror-git    mirror-fs
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use mirror_core::{Destination, ProjectId, sync_one};
//!
//! # fn main() -> mirror_core::Result<()> {
//! let id = ProjectId::new("662a5ab30650c57e5355029b")?;
//! let destinations = vec![Destination::new("gitlab-urz/group/paper.git")?];
//! let result = sync_one(&id, Path::new("/var/cache/leaf-mirror"), &destinations, false);
//! println!("{}: {}", result.project, result.status);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod project;
pub mod sync;

pub use config::{MirrorConfig, ProjectEntry, Settings};
pub use error::{Error, Result};
pub use project::{
    DEFAULT_UPSTREAM_BASE, Destination, PrimaryBranches, Project, ProjectId, upstream_url,
};
pub use sync::{
    BatchReport, DestinationOutcome, DestinationStatus, ReconcileSummary, SyncEngine, SyncError,
    SyncOptions, SyncResult, SyncStatus, sync_all, sync_one,
};
