//! Error types for mirror-core
//!
//! These cover configuration and input validation. Failures during a sync
//! never surface here; they are captured as [`crate::SyncError`] inside the
//! project's [`crate::SyncResult`].

/// Result type for mirror-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in mirror-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Project id cannot be used as an upstream path or cache directory
    #[error("Invalid project id '{id}': {reason}")]
    InvalidProjectId { id: String, reason: String },

    /// Destination address is empty or malformed
    #[error("Invalid destination '{address}': {reason}")]
    InvalidDestination { address: String, reason: String },

    /// Configuration failed validation; every problem found is listed
    #[error("Invalid configuration: {}", problems.join("; "))]
    InvalidConfig { problems: Vec<String> },

    /// Project id is not present in the configuration
    #[error("Project '{id}' is not configured")]
    UnknownProject { id: String },

    /// Filesystem error from mirror-fs
    #[error(transparent)]
    Fs(#[from] mirror_fs::Error),

    /// Git error from mirror-git
    #[error(transparent)]
    Git(#[from] mirror_git::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),
}
