//! Parsing and validation of config.toml

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use mirror_fs::ConfigStore;
use serde::{Deserialize, Serialize};

use crate::project::{DEFAULT_UPSTREAM_BASE, Destination, PrimaryBranches, Project, ProjectId};
use crate::sync::SyncOptions;
use crate::{Error, Result};

/// `[settings]` table. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Base URL projects are cloned from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upstream_base: Option<String>,

    /// Where local mirrors live; `~` is expanded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<String>,

    /// Primary branch preference, first match wins
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_branches: Option<Vec<String>>,

    /// Written to `credential.helper` in newly created mirrors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential_helper: Option<String>,
}

/// One `[[projects]]` entry, kept as raw strings until validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectEntry {
    pub id: String,
    #[serde(default)]
    pub destinations: Vec<String>,
}

impl ProjectEntry {
    pub fn new(id: impl Into<String>, destinations: Vec<String>) -> Self {
        Self {
            id: id.into(),
            destinations,
        }
    }
}

/// The whole configuration file.
///
/// Projects keep the order they appear in, which is also the order
/// `backup-all` syncs them in.
///
/// # Example
///
/// ```
/// use mirror_core::MirrorConfig;
///
/// let config = MirrorConfig::parse(r#"
/// [settings]
/// primary_branches = ["main"]
///
/// [[projects]]
/// id = "662a5ab30650c57e5355029b"
/// destinations = ["gitlab-urz/group/paper.git"]
/// "#).unwrap();
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.projects.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MirrorConfig {
    #[serde(default)]
    pub settings: Settings,

    #[serde(default)]
    pub projects: Vec<ProjectEntry>,
}

impl MirrorConfig {
    /// Parse a configuration from TOML content.
    pub fn parse(content: &str) -> Result<Self> {
        let config: MirrorConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Load from `path`; a missing file is an empty configuration.
    pub fn load(path: &Path) -> Result<Self> {
        Ok(ConfigStore::new().load_or_default(path)?)
    }

    /// Atomically write the configuration to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        ConfigStore::new().save(path, self)?;
        tracing::debug!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    /// Check the whole configuration, collecting every problem instead of
    /// stopping at the first.
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();

        if let Some(branches) = &self.settings.primary_branches
            && let Err(Error::InvalidConfig { problems: found }) =
                PrimaryBranches::new(branches.clone())
        {
            problems.extend(found);
        }

        if let Some(base) = &self.settings.upstream_base
            && base.trim_end_matches('/').trim().is_empty()
        {
            problems.push("upstream_base must not be empty".to_string());
        }

        let mut seen_ids = HashSet::new();
        for entry in &self.projects {
            if let Err(e) = ProjectId::new(entry.id.as_str()) {
                problems.push(e.to_string());
            }
            if !seen_ids.insert(entry.id.as_str()) {
                problems.push(format!("Project '{}' is listed more than once", entry.id));
            }

            let mut seen_destinations = HashSet::new();
            for address in &entry.destinations {
                if let Err(e) = Destination::new(address.as_str()) {
                    problems.push(format!("Project '{}': {e}", entry.id));
                } else if !seen_destinations.insert(address.as_str()) {
                    problems.push(format!(
                        "Project '{}': destination '{address}' is listed more than once",
                        entry.id
                    ));
                }
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidConfig { problems })
        }
    }

    /// Validated projects in configuration order.
    pub fn projects(&self) -> Result<Vec<Project>> {
        self.validate()?;
        self.projects.iter().map(to_project).collect()
    }

    /// Validated project with the given id.
    pub fn project(&self, id: &str) -> Result<Project> {
        self.validate()?;
        let entry = self.find(id).ok_or_else(|| Error::UnknownProject { id: id.to_string() })?;
        to_project(entry)
    }

    pub fn find(&self, id: &str) -> Option<&ProjectEntry> {
        self.projects.iter().find(|entry| entry.id == id)
    }

    /// Configured project ids in order.
    pub fn project_ids(&self) -> Vec<&str> {
        self.projects.iter().map(|entry| entry.id.as_str()).collect()
    }

    /// Add a project, or replace the destinations of an existing one in
    /// place. Returns `true` when an existing entry was replaced.
    ///
    /// The id and destinations are validated before anything changes.
    pub fn upsert(&mut self, id: &str, destinations: Vec<String>) -> Result<bool> {
        let candidate = ProjectEntry::new(id, destinations);
        to_project(&candidate)?;
        let mut seen = HashSet::new();
        if let Some(dup) = candidate.destinations.iter().find(|d| !seen.insert(d.as_str())) {
            return Err(Error::InvalidDestination {
                address: dup.clone(),
                reason: "listed more than once".to_string(),
            });
        }

        match self.projects.iter_mut().find(|entry| entry.id == id) {
            Some(existing) => {
                *existing = candidate;
                Ok(true)
            }
            None => {
                self.projects.push(candidate);
                Ok(false)
            }
        }
    }

    /// Remove a project. Fails with [`Error::UnknownProject`] if absent.
    pub fn remove(&mut self, id: &str) -> Result<ProjectEntry> {
        let index = self
            .projects
            .iter()
            .position(|entry| entry.id == id)
            .ok_or_else(|| Error::UnknownProject { id: id.to_string() })?;
        Ok(self.projects.remove(index))
    }

    /// Engine options derived from `[settings]`.
    pub fn sync_options(&self) -> Result<SyncOptions> {
        let primary_branches = match &self.settings.primary_branches {
            Some(names) => PrimaryBranches::new(names.clone())?,
            None => PrimaryBranches::default(),
        };
        Ok(SyncOptions {
            upstream_base: self
                .settings
                .upstream_base
                .clone()
                .unwrap_or_else(|| DEFAULT_UPSTREAM_BASE.to_string()),
            primary_branches,
            credential_helper: self.settings.credential_helper.clone(),
        })
    }

    /// Cache root from `[settings]`, or the platform default.
    ///
    /// Returns `None` only when neither is available.
    pub fn cache_dir(&self) -> Option<PathBuf> {
        match &self.settings.cache_dir {
            Some(dir) => Some(mirror_fs::expand_home(dir)),
            None => super::default_cache_dir(),
        }
    }
}

fn to_project(entry: &ProjectEntry) -> Result<Project> {
    let id = ProjectId::new(entry.id.as_str())?;
    let destinations = entry
        .destinations
        .iter()
        .map(|address| Destination::new(address.as_str()))
        .collect::<Result<Vec<_>>>()?;
    Ok(Project::new(id, destinations))
}
