//! Core types for merge-pr
//!
//! Everything here is read once from the API (or from git) and never
//! mutated afterwards.

use serde::{Deserialize, Serialize};

/// The authenticated GitHub user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserIdentity {
    /// Login handle
    pub login: String,
    /// Display name, if the user set one
    pub name: Option<String>,
}

impl std::fmt::Display for UserIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name} ({})", self.login),
            None => write!(f, "{}", self.login),
        }
    }
}

/// A GitHub organization
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Organization {
    /// Organization login (e.g. "acme")
    pub login: String,
}

/// A repository inside an organization
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Repository {
    /// Owning organization login
    pub owner: String,
    /// Repository name
    pub name: String,
    /// Branch pull requests are merged into
    pub default_branch: String,
}

impl Repository {
    /// `owner/name`
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

/// PR state (open, closed, merged)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrState {
    /// PR is open and can be merged
    Open,
    /// PR was closed without merging
    Closed,
    /// PR was merged
    Merged,
}

impl std::fmt::Display for PrState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
            Self::Merged => write!(f, "merged"),
        }
    }
}

/// Name and email used as commit authorship
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommitAuthor {
    /// Person name
    pub name: String,
    /// Email address
    pub email: String,
}

impl std::fmt::Display for CommitAuthor {
    /// Formats as git expects for `--author`: `Name <email>`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

/// An entry in the open pull request list, used for selection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PullRequestSummary {
    /// PR number
    pub number: u64,
    /// PR title
    pub title: String,
}

impl std::fmt::Display for PullRequestSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} {}", self.number, self.title)
    }
}

/// Snapshot of a pull request, fetched once per run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR number
    pub number: u64,
    /// PR title
    pub title: String,
    /// Current state of the PR
    pub state: PrState,
    /// Whether PR can be merged (no conflicts)
    /// - `Some(true)` = mergeable
    /// - `Some(false)` = has conflicts
    /// - `None` = unknown (GitHub still computing)
    pub mergeable: Option<bool>,
    /// Web URL of the repository the changes come from (often a fork)
    pub source_url: String,
    /// Head branch name in the source repository
    pub head_ref: String,
    /// Committer of the head commit
    pub author: CommitAuthor,
    /// Web URL for the PR
    pub html_url: String,
}

impl PullRequest {
    /// Whether the PR is still open
    pub fn is_open(&self) -> bool {
        self.state == PrState::Open
    }

    /// Selection-list form of this PR
    pub fn summary(&self) -> PullRequestSummary {
        PullRequestSummary {
            number: self.number,
            title: self.title.clone(),
        }
    }
}
