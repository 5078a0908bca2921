//! Projects, destinations, and upstream addressing

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default base URL of the hosted editor's git endpoint.
pub const DEFAULT_UPSTREAM_BASE: &str = "https://git.overleaf.com";

/// Identifier issued by the upstream service for a project.
///
/// Doubles as the directory name of the local mirror, so it must be a single
/// safe path segment.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProjectId(String);

impl ProjectId {
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        mirror_fs::validate_path_segment(&id).map_err(|e| Error::InvalidProjectId {
            id: id.clone(),
            reason: match e {
                mirror_fs::Error::InvalidSegment { reason, .. } => reason,
                other => other.to_string(),
            },
        })?;
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ProjectId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<ProjectId> for String {
    fn from(id: ProjectId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Canonical upstream URL for a project: `<base>/<project-id>`.
///
/// Trailing slashes on `base` are ignored.
pub fn upstream_url(base: &str, id: &ProjectId) -> String {
    format!("{}/{}", base.trim_end_matches('/'), id)
}

/// A push target, written as `<ssh-host-alias>/<namespace>/<repository>.git`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Destination(String);

impl Destination {
    pub fn new(address: impl Into<String>) -> Result<Self> {
        let address = address.into();
        let invalid = |reason: &str| Error::InvalidDestination {
            address: address.clone(),
            reason: reason.to_string(),
        };

        if address.trim().is_empty() {
            return Err(invalid("must not be empty"));
        }
        if address.chars().any(char::is_whitespace) {
            return Err(invalid("must not contain whitespace"));
        }
        if address.starts_with('-') {
            return Err(invalid("must not start with '-'"));
        }
        Ok(Self(address))
    }

    /// The address as configured.
    pub fn address(&self) -> &str {
        &self.0
    }

    /// URL handed to git for this destination.
    ///
    /// Bare `alias/namespace/repo.git` addresses become `ssh://` URLs so the
    /// alias is resolved through the SSH config. Addresses that already name
    /// a scheme, use scp syntax (`user@host:path`), or are absolute local
    /// paths are passed through unchanged.
    pub fn remote_url(&self) -> String {
        if self.is_verbatim() {
            self.0.clone()
        } else {
            format!("ssh://{}", self.0)
        }
    }

    fn is_verbatim(&self) -> bool {
        if self.0.contains("://") || Path::new(&self.0).is_absolute() {
            return true;
        }
        match self.0.split_once(':') {
            Some((host, _)) => !host.contains('/'),
            None => false,
        }
    }
}

impl TryFrom<String> for Destination {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Destination> for String {
    fn from(destination: Destination) -> Self {
        destination.0
    }
}

impl std::fmt::Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A project together with its ordered destinations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: ProjectId,
    pub destinations: Vec<Destination>,
}

impl Project {
    pub fn new(id: ProjectId, destinations: Vec<Destination>) -> Self {
        Self { id, destinations }
    }
}

/// Ordered list of branch names to treat as the primary branch.
///
/// The first name that exists upstream wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryBranches(Vec<String>);

impl Default for PrimaryBranches {
    fn default() -> Self {
        Self(vec!["main".to_string(), "master".to_string()])
    }
}

impl PrimaryBranches {
    pub fn new(names: Vec<String>) -> Result<Self> {
        if names.is_empty() {
            return Err(Error::InvalidConfig {
                problems: vec!["primary_branches must name at least one branch".into()],
            });
        }
        let invalid = |n: &&String| n.trim().is_empty() || n.contains(char::is_whitespace);
        if let Some(bad) = names.iter().find(invalid) {
            return Err(Error::InvalidConfig {
                problems: vec![format!("invalid primary branch name '{bad}'")],
            });
        }
        Ok(Self(names))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_upstream_url_strips_trailing_slashes() {
        let id = ProjectId::new("abc123").unwrap();
        assert_eq!(upstream_url("https://git.overleaf.com", &id), "https://git.overleaf.com/abc123");
        assert_eq!(upstream_url("https://git.overleaf.com//", &id), "https://git.overleaf.com/abc123");
    }

    #[rstest]
    #[case("gitlab-urz/group/paper.git", "ssh://gitlab-urz/group/paper.git")]
    #[case("ssh://git@example.com/group/paper.git", "ssh://git@example.com/group/paper.git")]
    #[case("git@example.com:group/paper.git", "git@example.com:group/paper.git")]
    #[case("/srv/backups/paper.git", "/srv/backups/paper.git")]
    fn test_destination_remote_url(#[case] address: &str, #[case] expected: &str) {
        assert_eq!(Destination::new(address).unwrap().remote_url(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("host/ns/repo .git")]
    #[case("--upload-pack=evil")]
    fn test_destination_rejects(#[case] address: &str) {
        assert!(Destination::new(address).is_err());
    }

    #[test]
    fn test_project_id_rejects_traversal() {
        let err = ProjectId::new("../etc").unwrap_err();
        assert!(matches!(err, Error::InvalidProjectId { .. }));
    }

    #[test]
    fn test_primary_branches_default_order() {
        let branches = PrimaryBranches::default();
        assert_eq!(branches.iter().collect::<Vec<_>>(), vec!["main", "master"]);
    }

    #[test]
    fn test_primary_branches_must_not_be_empty() {
        assert!(PrimaryBranches::new(vec![]).is_err());
    }

    #[test]
    fn test_primary_branches_reject_blank_names() {
        assert!(PrimaryBranches::new(vec!["main".into(), " ".into()]).is_err());
        assert!(PrimaryBranches::new(vec!["my branch".into()]).is_err());
        assert!(PrimaryBranches::new(vec!["trunk".into()]).is_ok());
    }
}
