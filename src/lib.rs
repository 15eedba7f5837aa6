//! merge-pr: merge a GitHub pull request through a local git checkout
//!
//! The pull request is pulled into a temporary branch, merged into the
//! repository's default branch locally, re-committed as a single commit
//! authored by the PR's committer with a `Closes #N` trailer, pushed, and
//! finally closed through the API.
//!
//! Inputs come from environment variables ([`config`]); anything missing is
//! resolved against the GitHub API ([`platform`]) or asked of the operator
//! ([`prompt`]). Git runs as shell commands ([`shell`]).

pub mod auth;
pub mod config;
pub mod error;
pub mod merge;
pub mod platform;
pub mod progress;
pub mod prompt;
pub mod shell;
pub mod types;
