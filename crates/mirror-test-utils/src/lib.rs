//! Shared test utilities for the leaf-mirror workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`git`]: repository fixtures driven through the `git` CLI
//! - [`sandbox`]: [`Sandbox`] holding a fake upstream host, a cache root,
//!   and local push destinations in one temp directory

pub mod git;
pub mod sandbox;

pub use sandbox::Sandbox;
