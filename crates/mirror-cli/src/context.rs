//! Where the config file and local mirrors live for this invocation

use std::path::{Path, PathBuf};

use mirror_core::MirrorConfig;

use crate::error::{CliError, Result};

/// Paths resolved from global flags, the environment, and platform defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    config_path: PathBuf,
    cache_override: Option<PathBuf>,
    pub clean: bool,
}

impl Context {
    /// `--config` wins over the platform config dir.
    pub fn new(config: Option<PathBuf>, cache_dir: Option<PathBuf>, clean: bool) -> Result<Self> {
        let config_path = match config {
            Some(path) => mirror_fs::expand_home(path),
            None => mirror_core::config::default_config_path().ok_or_else(|| {
                CliError::user("Cannot determine a config directory; pass --config")
            })?,
        };
        Ok(Self {
            config_path,
            cache_override: cache_dir.map(mirror_fs::expand_home),
            clean,
        })
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn load_config(&self) -> Result<MirrorConfig> {
        tracing::debug!(path = %self.config_path.display(), "Loading config");
        Ok(MirrorConfig::load(&self.config_path)?)
    }

    pub fn save_config(&self, config: &MirrorConfig) -> Result<()> {
        Ok(config.save(&self.config_path)?)
    }

    /// Cache root from `--cache-dir`, the config, or the platform default,
    /// created if missing.
    pub fn cache_root(&self, config: &MirrorConfig) -> Result<PathBuf> {
        let dir = self
            .cache_override
            .clone()
            .or_else(|| config.cache_dir())
            .ok_or_else(|| {
                CliError::user("Cannot determine a cache directory; pass --cache-dir")
            })?;
        Ok(mirror_fs::resolve_dir(&dir)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn cache_flag_overrides_config() {
        let temp = TempDir::new().unwrap();
        let flag = temp.path().join("flag");
        let ctx = Context::new(Some(temp.path().join("c.toml")), Some(flag.clone()), false).unwrap();
        let mut config = MirrorConfig::default();
        config.settings.cache_dir = Some(temp.path().join("cfg").to_string_lossy().into_owned());

        let root = ctx.cache_root(&config).unwrap();

        assert!(root.ends_with("flag"));
        assert!(flag.is_dir());
        assert!(!temp.path().join("cfg").exists());
    }

    #[test]
    fn cache_from_config() {
        let temp = TempDir::new().unwrap();
        let ctx = Context::new(Some(temp.path().join("c.toml")), None, false).unwrap();
        let mut config = MirrorConfig::default();
        config.settings.cache_dir = Some(temp.path().join("cfg").to_string_lossy().into_owned());

        let root = ctx.cache_root(&config).unwrap();

        assert!(root.ends_with("cfg"));
    }
}
