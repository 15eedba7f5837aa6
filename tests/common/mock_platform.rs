//! Mock platform service for testing
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use async_trait::async_trait;
use merge_pr::error::{Error, Result};
use merge_pr::platform::PlatformService;
use merge_pr::types::{
    Organization, PullRequest, PullRequestSummary, Repository, UserIdentity,
};
use std::collections::HashMap;
use std::sync::Mutex;

/// Call record for `find_repository`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindRepoCall {
    pub org: String,
    pub name: String,
}

/// Simple mock platform service for testing
///
/// This manually implements `PlatformService` rather than using mockall.
///
/// Features:
/// - Organizations, repositories and PRs kept in insertion order
/// - Call tracking for verification
/// - Error injection for failure path testing
pub struct MockPlatformService {
    user: UserIdentity,
    organizations: Mutex<Vec<Organization>>,
    repositories: Mutex<HashMap<String, Vec<Repository>>>,
    pull_requests: Mutex<Vec<PullRequest>>,
    // Call tracking
    find_org_calls: Mutex<Vec<String>>,
    find_repo_calls: Mutex<Vec<FindRepoCall>>,
    get_pr_calls: Mutex<Vec<u64>>,
    list_open_calls: Mutex<usize>,
    close_calls: Mutex<Vec<u64>>,
    // Error injection
    error_on_get_pr: Mutex<Option<String>>,
    error_on_close: Mutex<Option<String>>,
}

impl Default for MockPlatformService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPlatformService {
    /// Create an empty mock (no organizations, repositories or PRs)
    pub fn new() -> Self {
        Self {
            user: UserIdentity {
                login: "operator".to_string(),
                name: Some("Op Erator".to_string()),
            },
            organizations: Mutex::new(Vec::new()),
            repositories: Mutex::new(HashMap::new()),
            pull_requests: Mutex::new(Vec::new()),
            find_org_calls: Mutex::new(Vec::new()),
            find_repo_calls: Mutex::new(Vec::new()),
            get_pr_calls: Mutex::new(Vec::new()),
            list_open_calls: Mutex::new(0),
            close_calls: Mutex::new(Vec::new()),
            error_on_get_pr: Mutex::new(None),
            error_on_close: Mutex::new(None),
        }
    }

    /// The acme/widgets fixture: one org, one repo on `master`, PR #42 open
    /// and mergeable
    pub fn acme_widgets() -> Self {
        let mock = Self::new();
        mock.add_organization("acme");
        mock.add_repository("acme", "widgets", "master");
        mock.add_pull_request(super::make_pr(42, "Fix bug"));
        mock
    }

    /// Add an organization the user belongs to
    pub fn add_organization(&self, login: &str) {
        self.organizations.lock().unwrap().push(Organization {
            login: login.to_string(),
        });
    }

    /// Add a repository to an organization
    pub fn add_repository(&self, org: &str, name: &str, default_branch: &str) {
        self.repositories
            .lock()
            .unwrap()
            .entry(org.to_string())
            .or_default()
            .push(Repository {
                owner: org.to_string(),
                name: name.to_string(),
                default_branch: default_branch.to_string(),
            });
    }

    /// Add a PR (to whichever repository is asked for)
    pub fn add_pull_request(&self, pr: PullRequest) {
        self.pull_requests.lock().unwrap().push(pr);
    }

    // === Error injection methods ===

    /// Make `get_pull_request` return an error
    pub fn fail_get_pr(&self, msg: &str) {
        *self.error_on_get_pr.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `close_pull_request` return an error
    pub fn fail_close(&self, msg: &str) {
        *self.error_on_close.lock().unwrap() = Some(msg.to_string());
    }

    // === Call verification methods ===

    /// Logins `find_organization` was called with
    pub fn get_find_org_calls(&self) -> Vec<String> {
        self.find_org_calls.lock().unwrap().clone()
    }

    /// All `find_repository` calls
    pub fn get_find_repo_calls(&self) -> Vec<FindRepoCall> {
        self.find_repo_calls.lock().unwrap().clone()
    }

    /// Numbers `get_pull_request` was called with
    pub fn get_pr_calls(&self) -> Vec<u64> {
        self.get_pr_calls.lock().unwrap().clone()
    }

    /// How often open PRs were listed
    pub fn list_open_call_count(&self) -> usize {
        *self.list_open_calls.lock().unwrap()
    }

    /// Numbers `close_pull_request` was called with
    pub fn get_close_calls(&self) -> Vec<u64> {
        self.close_calls.lock().unwrap().clone()
    }

    /// Assert that `close_pull_request` was called for a specific PR
    pub fn assert_close_called(&self, pr_number: u64) {
        let calls = self.get_close_calls();
        assert!(
            calls.contains(&pr_number),
            "Expected close_pull_request({pr_number}) but got: {calls:?}"
        );
    }

    /// Assert that `close_pull_request` was never called
    pub fn assert_close_not_called(&self) {
        let calls = self.get_close_calls();
        assert!(
            calls.is_empty(),
            "Expected close_pull_request NOT to be called but got: {calls:?}"
        );
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn current_user(&self) -> Result<UserIdentity> {
        Ok(self.user.clone())
    }

    async fn find_organization(&self, login: &str) -> Result<Option<Organization>> {
        self.find_org_calls.lock().unwrap().push(login.to_string());
        let orgs = self.organizations.lock().unwrap();
        Ok(orgs.iter().find(|o| o.login == login).cloned())
    }

    async fn list_my_organizations(&self) -> Result<Vec<Organization>> {
        Ok(self.organizations.lock().unwrap().clone())
    }

    async fn find_repository(&self, org: &Organization, name: &str) -> Result<Option<Repository>> {
        self.find_repo_calls.lock().unwrap().push(FindRepoCall {
            org: org.login.clone(),
            name: name.to_string(),
        });
        let repos = self.repositories.lock().unwrap();
        Ok(repos
            .get(&org.login)
            .and_then(|list| list.iter().find(|r| r.name == name))
            .cloned())
    }

    async fn list_repositories(&self, org: &Organization) -> Result<Vec<Repository>> {
        let repos = self.repositories.lock().unwrap();
        Ok(repos.get(&org.login).cloned().unwrap_or_default())
    }

    async fn get_pull_request(
        &self,
        _repo: &Repository,
        number: u64,
    ) -> Result<Option<PullRequest>> {
        self.get_pr_calls.lock().unwrap().push(number);

        // Check for injected error
        if let Some(msg) = self.error_on_get_pr.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }

        let prs = self.pull_requests.lock().unwrap();
        Ok(prs.iter().find(|pr| pr.number == number).cloned())
    }

    async fn list_open_pull_requests(&self, _repo: &Repository) -> Result<Vec<PullRequestSummary>> {
        *self.list_open_calls.lock().unwrap() += 1;
        let prs = self.pull_requests.lock().unwrap();
        Ok(prs
            .iter()
            .filter(|pr| pr.is_open())
            .map(PullRequest::summary)
            .collect())
    }

    async fn close_pull_request(&self, _repo: &Repository, number: u64) -> Result<()> {
        self.close_calls.lock().unwrap().push(number);

        // Check for injected error
        if let Some(msg) = self.error_on_close.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }
        Ok(())
    }
}
