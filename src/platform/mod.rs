//! Platform services for GitHub
//!
//! Provides the lookups and the final close the merge flow needs, behind a
//! trait so the flow can run against a mock.

mod github;
mod resolve;

pub use github::GitHubService;
pub use resolve::{resolve_organization, resolve_pull_request, resolve_repository};

use crate::error::Result;
use crate::types::{Organization, PullRequest, PullRequestSummary, Repository, UserIdentity};
use async_trait::async_trait;

/// Platform service trait for the merge flow
///
/// Lookup methods return `Ok(None)` for "does not exist" so callers can
/// fall back to interactive selection; any other failure is an error.
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// The authenticated user
    async fn current_user(&self) -> Result<UserIdentity>;

    /// Look up an organization by login
    async fn find_organization(&self, login: &str) -> Result<Option<Organization>>;

    /// Organizations the authenticated user belongs to, in API order
    async fn list_my_organizations(&self) -> Result<Vec<Organization>>;

    /// Look up a repository inside an organization
    async fn find_repository(&self, org: &Organization, name: &str) -> Result<Option<Repository>>;

    /// Repositories of an organization, in API order
    async fn list_repositories(&self, org: &Organization) -> Result<Vec<Repository>>;

    /// Fetch the full snapshot of a pull request
    ///
    /// Includes the head commit's committer, which becomes the author of
    /// the merge commit.
    async fn get_pull_request(&self, repo: &Repository, number: u64)
    -> Result<Option<PullRequest>>;

    /// Open pull requests of a repository, in API order
    async fn list_open_pull_requests(&self, repo: &Repository) -> Result<Vec<PullRequestSummary>>;

    /// Close a pull request
    async fn close_pull_request(&self, repo: &Repository, number: u64) -> Result<()>;
}
