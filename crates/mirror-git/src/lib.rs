//! Git plumbing for leaf-mirror
//!
//! Local repository handling goes through `git2`. Anything that talks to a
//! remote goes through a [`Transport`], so credential helpers and SSH host
//! aliases are resolved by the environment rather than by this crate.

pub mod error;
pub mod failure;
pub mod mirror;
pub mod naming;
pub mod transport;

pub use error::{Error, Result};
pub use failure::FailureCategory;
pub use mirror::{FastForward, LocalMirror, RemoteChange};
pub use naming::{DESTINATION_PREFIX, UPSTREAM_REMOTE};
pub use transport::{GitCommand, Operation, Transport, TransportError};
