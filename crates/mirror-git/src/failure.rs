//! Classification of remote operation failures

use serde::{Deserialize, Serialize};

/// Coarse reason a fetch or push against a remote failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureCategory {
    /// Credentials missing or refused
    Auth,
    /// Host unreachable, DNS failure, or no repository at the address
    Network,
    /// The remote refused the update (non-fast-forward, protected branch, hook)
    Rejected,
    /// Anything else
    Unknown,
}

const AUTH_MARKERS: &[&str] = &[
    "authentication failed",
    "permission denied",
    "could not read username",
    "could not read password",
    "invalid username or password",
    "access denied",
    "terminal prompts disabled",
    "returned error: 401",
    "returned error: 403",
];

const REJECTED_MARKERS: &[&str] = &[
    "[rejected]",
    "[remote rejected]",
    "non-fast-forward",
    "updates were rejected",
    "pre-receive hook declined",
    "protected branch",
];

const NETWORK_MARKERS: &[&str] = &[
    "could not resolve host",
    "could not resolve hostname",
    "connection refused",
    "connection timed out",
    "connection reset",
    "operation timed out",
    "network is unreachable",
    "no route to host",
    "failed to connect",
    "unable to access",
    "does not appear to be a git repository",
    "could not read from remote repository",
    "repository not found",
];

impl FailureCategory {
    /// Classify a failure from the stderr text git printed.
    ///
    /// Auth markers are checked first: an SSH key rejection is also reported
    /// as "could not read from remote repository".
    pub fn from_stderr(stderr: &str) -> Self {
        let lowered = stderr.to_lowercase();
        let matches = |markers: &[&str]| markers.iter().any(|m| lowered.contains(m));

        if matches(AUTH_MARKERS) {
            Self::Auth
        } else if matches(REJECTED_MARKERS) {
            Self::Rejected
        } else if matches(NETWORK_MARKERS) {
            Self::Network
        } else {
            Self::Unknown
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::Network => "network",
            Self::Rejected => "rejected",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for FailureCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(
        "git@gitlab.example.com: Permission denied (publickey).\nfatal: Could not read from remote repository.",
        FailureCategory::Auth
    )]
    #[case(
        "fatal: could not read Username for 'https://git.overleaf.com': terminal prompts disabled",
        FailureCategory::Auth
    )]
    #[case(
        "ssh: Could not resolve hostname gitlab-urz: Name or service not known\nfatal: Could not read from remote repository.",
        FailureCategory::Network
    )]
    #[case(
        "fatal: '/tmp/missing.git' does not appear to be a git repository\nfatal: Could not read from remote repository.",
        FailureCategory::Network
    )]
    #[case(
        " ! [rejected]        main -> main (fetch first)\nerror: failed to push some refs",
        FailureCategory::Rejected
    )]
    #[case(
        " ! [remote rejected] main -> main (pre-receive hook declined)",
        FailureCategory::Rejected
    )]
    #[case("fatal: something odd happened", FailureCategory::Unknown)]
    #[case("", FailureCategory::Unknown)]
    fn test_from_stderr(#[case] stderr: &str, #[case] expected: FailureCategory) {
        assert_eq!(FailureCategory::from_stderr(stderr), expected);
    }
}
