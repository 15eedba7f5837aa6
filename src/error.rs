//! Error types for merge-pr

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can end a merge run
#[derive(Debug, Error)]
pub enum Error {
    /// No usable GitHub credential, or the API rejected it
    #[error("GitHub authentication failed: {0}")]
    AuthenticationFailed(String),

    /// A selection list had nothing to choose from
    #[error("No {0}s found")]
    NoCandidates(String),

    /// A named organization, repository or pull request does not exist
    #[error("{0} not found")]
    NotFound(String),

    /// The resolved pull request is not open
    #[error("Pull request #{number} '{title}' is already closed")]
    AlreadyClosed {
        /// PR number
        number: u64,
        /// PR title
        title: String,
    },

    /// GitHub does not report the pull request as mergeable
    #[error("Pull request #{number} is not mergeable: {reason}")]
    NotMergeable {
        /// PR number
        number: u64,
        /// Why GitHub refused (conflicts, still computing)
        reason: String,
    },

    /// The local clone is missing or not a directory
    #[error("Specified local repository does not exist: {}", .0.display())]
    LocalRepoMissing(PathBuf),

    /// A value could not be parsed as a number
    #[error("Invalid value for {key}: '{value}' is not a number")]
    InvalidFormat {
        /// Variable or prompt the value came from
        key: String,
        /// The offending text
        value: String,
    },

    /// A selection index outside of the listed candidates
    #[error("Selection {index} is out of range (0..{len})")]
    InvalidSelection {
        /// Index entered by the operator
        index: usize,
        /// Number of candidates
        len: usize,
    },

    /// A shell command exited non-zero
    #[error("Command '{command}' exited with code: {code}")]
    CommandFailed {
        /// Full command text
        command: String,
        /// Exit code (-1 when killed by a signal)
        code: i32,
    },

    /// GitHub API error
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// Failed reading operator input
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<octocrab::Error> for Error {
    fn from(err: octocrab::Error) -> Self {
        Self::GitHubApi(err.to_string())
    }
}
