//! Git repository fixtures.
//!
//! Everything here shells out to the `git` CLI with a fixed identity, so the
//! fixtures behave the same regardless of the developer's global git config.
//!
//! # Panics
//! Every function panics if the underlying git command fails.

use std::fs;
use std::path::Path;
use std::process::Command;

/// Run `git` in `dir` and return its trimmed stdout.
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(["-c", "commit.gpgsign=false", "-c", "tag.gpgsign=false"])
        .args(args)
        .current_dir(dir)
        .env("GIT_AUTHOR_NAME", "Test User")
        .env("GIT_AUTHOR_EMAIL", "test@example.com")
        .env("GIT_COMMITTER_NAME", "Test User")
        .env("GIT_COMMITTER_EMAIL", "test@example.com")
        .env("GIT_TERMINAL_PROMPT", "0")
        .output()
        .unwrap_or_else(|e| panic!("failed to run `git {args:?}`: {e}"));
    if !output.status.success() {
        panic!(
            "`git {args:?}` failed in {}:\n{}",
            dir.display(),
            String::from_utf8_lossy(&output.stderr)
        );
    }
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Initialise a working repository at `path` whose first commit lands on
/// `branch`, then commit a `main.tex`.
///
/// The branch is set with `symbolic-ref` rather than `init -b` so older git
/// versions behave the same.
pub fn init_with_commit(path: &Path, branch: &str) -> String {
    fs::create_dir_all(path)
        .unwrap_or_else(|e| panic!("init_with_commit: failed to create {}: {e}", path.display()));
    git(path, &["init", "-q"]);
    git(path, &["symbolic-ref", "HEAD", &format!("refs/heads/{branch}")]);
    commit_file(path, "main.tex", "\\documentclass{article}\n", "Initial commit")
}

/// Write `file` and commit it on the current branch. Returns the new commit id.
pub fn commit_file(path: &Path, file: &str, content: &str, message: &str) -> String {
    fs::write(path.join(file), content)
        .unwrap_or_else(|e| panic!("commit_file: failed to write {file}: {e}"));
    git(path, &["add", file]);
    git(path, &["commit", "-q", "-m", message]);
    head(path)
}

/// Create a lightweight tag at HEAD.
pub fn tag(path: &Path, name: &str) {
    git(path, &["tag", name]);
}

/// Initialise an empty bare repository at `path`, suitable as a push target.
pub fn init_bare(path: &Path) {
    fs::create_dir_all(path)
        .unwrap_or_else(|e| panic!("init_bare: failed to create {}: {e}", path.display()));
    git(path, &["init", "-q", "--bare"]);
}

/// Commit id HEAD points at.
pub fn head(path: &Path) -> String {
    git(path, &["rev-parse", "HEAD"])
}

/// Commit id `refname` points at, or `None` if the ref does not exist.
pub fn resolve(path: &Path, refname: &str) -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--verify", "--quiet", refname])
        .current_dir(path)
        .output()
        .unwrap_or_else(|e| panic!("resolve: failed to run git: {e}"));
    output
        .status
        .success()
        .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string())
}
