//! Configuration for leaf-mirror
//!
//! A single TOML file maps project ids to their backup destinations:
//!
//! ```toml
//! [settings]
//! upstream_base = "https://git.overleaf.com"
//! cache_dir = "~/.cache/leaf-mirror"
//! primary_branches = ["main", "master"]
//!
//! [[projects]]
//! id = "662a5ab30650c57e5355029b"
//! destinations = ["gitlab-urz/group/paper.git"]
//! ```

mod manifest;

use std::path::PathBuf;

pub use manifest::{MirrorConfig, ProjectEntry, Settings};

const APP_DIR: &str = "leaf-mirror";

/// `<config dir>/leaf-mirror/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
}

/// `<cache dir>/leaf-mirror`, if the platform has a cache dir.
pub fn default_cache_dir() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join(APP_DIR))
}
