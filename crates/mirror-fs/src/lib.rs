//! Filesystem helpers for leaf-mirror
//!
//! Path-segment validation, home expansion, and atomic TOML config I/O.

pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use path::{expand_home, resolve_dir, validate_path_segment};
