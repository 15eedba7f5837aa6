//! GitHub platform service implementation

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{
    CommitAuthor, Organization, PrState, PullRequest, PullRequestSummary, Repository,
    UserIdentity,
};
use async_trait::async_trait;
use octocrab::{Octocrab, Page};
use serde::Deserialize;
use tracing::debug;
use urlencoding::encode;

const PER_PAGE: [(&str, u8); 1] = [("per_page", 100)];

// Minimal REST payloads. Only the fields the merge flow reads are declared,
// which keeps them stable across API and octocrab model changes.

#[derive(Deserialize)]
struct UserPayload {
    login: String,
    name: Option<String>,
}

#[derive(Deserialize)]
struct OrgPayload {
    login: String,
}

#[derive(Deserialize)]
struct RepoPayload {
    name: String,
    default_branch: Option<String>,
}

#[derive(Deserialize)]
struct CommitPayload {
    commit: GitCommitPayload,
}

#[derive(Deserialize)]
struct GitCommitPayload {
    committer: Option<GitActorPayload>,
}

#[derive(Deserialize)]
struct GitActorPayload {
    name: String,
    email: String,
}

/// GitHub service using octocrab
pub struct GitHubService {
    client: Octocrab,
}

impl GitHubService {
    /// Create a new GitHub service
    ///
    /// `api_base` overrides the API root, e.g. `https://github.example.com/api/v3`
    /// for GitHub Enterprise.
    pub fn new(token: &str, api_base: Option<&str>) -> Result<Self> {
        let mut builder = Octocrab::builder().personal_token(token.to_string());

        if let Some(base) = api_base {
            builder = builder
                .base_uri(base)
                .map_err(|e| Error::GitHubApi(e.to_string()))?;
        }

        let client = builder
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        Ok(Self { client })
    }

    async fn get_optional<T>(&self, route: &str) -> Result<Option<T>>
    where
        T: serde::de::DeserializeOwned,
    {
        match self.client.get::<T, _, ()>(route, None).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if is_not_found(&e) => {
                debug!(route, "not found");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn get_all<T>(&self, route: &str) -> Result<Vec<T>>
    where
        T: serde::de::DeserializeOwned,
    {
        let first: Page<T> = self.client.get(route, Some(&PER_PAGE)).await?;
        Ok(self.client.all_pages(first).await?)
    }

    async fn head_committer(&self, repo: &Repository, sha: &str) -> Result<CommitAuthor> {
        let route = format!(
            "/repos/{}/{}/commits/{}",
            encode(&repo.owner),
            encode(&repo.name),
            sha
        );
        let payload: CommitPayload = self.client.get(&route, None::<&()>).await?;

        let committer = payload.commit.committer.ok_or_else(|| {
            Error::GitHubApi(format!("Head commit {sha} has no committer information"))
        })?;

        Ok(CommitAuthor {
            name: committer.name,
            email: committer.email,
        })
    }
}

/// Whether an octocrab error is a 404 from the API
fn is_not_found(err: &octocrab::Error) -> bool {
    matches!(err, octocrab::Error::GitHub { source, .. } if source.status_code.as_u16() == 404)
}

fn repository_from_payload(owner: &str, payload: RepoPayload) -> Repository {
    Repository {
        owner: owner.to_string(),
        name: payload.name,
        // GitHub always reports one; "master" matches git's historic default
        default_branch: payload.default_branch.unwrap_or_else(|| "master".to_string()),
    }
}

fn pr_state(pr: &octocrab::models::pulls::PullRequest) -> PrState {
    match pr.state {
        Some(octocrab::models::IssueState::Open) => PrState::Open,
        Some(octocrab::models::IssueState::Closed) if pr.merged_at.is_some() => PrState::Merged,
        // IssueState is non-exhaustive, so use wildcard for Closed and any future variants
        Some(_) | None => PrState::Closed,
    }
}

/// The source repository URL, required for open PRs only
///
/// A deleted fork leaves the head without a repository.
fn source_url_for(number: u64, state: PrState, head_url: Option<String>) -> Result<String> {
    match head_url {
        Some(url) => Ok(url),
        None if state != PrState::Open => Ok(String::new()),
        None => Err(Error::GitHubApi(format!("PR #{number} has no source repository"))),
    }
}

#[async_trait]
impl PlatformService for GitHubService {
    async fn current_user(&self) -> Result<UserIdentity> {
        debug!("getting authenticated user");
        let user: UserPayload = self.client.get("/user", None::<&()>).await?;
        Ok(UserIdentity {
            login: user.login,
            name: user.name,
        })
    }

    async fn find_organization(&self, login: &str) -> Result<Option<Organization>> {
        debug!(login, "finding organization");
        let route = format!("/orgs/{}", encode(login));
        let org: Option<OrgPayload> = self.get_optional(&route).await?;
        Ok(org.map(|o| Organization { login: o.login }))
    }

    async fn list_my_organizations(&self) -> Result<Vec<Organization>> {
        debug!("listing organizations of authenticated user");
        let orgs: Vec<OrgPayload> = self.get_all("/user/orgs").await?;
        debug!(count = orgs.len(), "listed organizations");
        Ok(orgs
            .into_iter()
            .map(|o| Organization { login: o.login })
            .collect())
    }

    async fn find_repository(&self, org: &Organization, name: &str) -> Result<Option<Repository>> {
        debug!(org = %org.login, name, "finding repository");
        let route = format!("/repos/{}/{}", encode(&org.login), encode(name));
        let repo: Option<RepoPayload> = self.get_optional(&route).await?;
        Ok(repo.map(|r| repository_from_payload(&org.login, r)))
    }

    async fn list_repositories(&self, org: &Organization) -> Result<Vec<Repository>> {
        debug!(org = %org.login, "listing repositories");
        let route = format!("/orgs/{}/repos", encode(&org.login));
        let repos: Vec<RepoPayload> = self.get_all(&route).await?;
        debug!(count = repos.len(), "listed repositories");
        Ok(repos
            .into_iter()
            .map(|r| repository_from_payload(&org.login, r))
            .collect())
    }

    async fn get_pull_request(
        &self,
        repo: &Repository,
        number: u64,
    ) -> Result<Option<PullRequest>> {
        debug!(repo = %repo.full_name(), number, "getting PR");

        let pr = match self.client.pulls(&repo.owner, &repo.name).get(number).await {
            Ok(pr) => pr,
            Err(e) if is_not_found(&e) => {
                debug!(number, "PR not found");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        // Source and committer are only needed to merge, so a closed PR is
        // returned without them and rejected by the caller on its state
        let state = pr_state(&pr);
        let head_url = pr
            .head
            .repo
            .as_ref()
            .and_then(|r| r.html_url.as_ref())
            .map(ToString::to_string);
        let source_url = source_url_for(number, state, head_url)?;

        let author = if state == PrState::Open {
            self.head_committer(repo, &pr.head.sha).await?
        } else {
            CommitAuthor::default()
        };

        let snapshot = PullRequest {
            number: pr.number,
            title: pr.title.clone().unwrap_or_default(),
            state,
            mergeable: pr.mergeable,
            source_url,
            head_ref: pr.head.ref_field.clone(),
            author,
            html_url: pr
                .html_url
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
        };

        debug!(number, state = %snapshot.state, mergeable = ?snapshot.mergeable, "got PR");
        Ok(Some(snapshot))
    }

    async fn list_open_pull_requests(&self, repo: &Repository) -> Result<Vec<PullRequestSummary>> {
        debug!(repo = %repo.full_name(), "listing open PRs");
        let first = self
            .client
            .pulls(&repo.owner, &repo.name)
            .list()
            .state(octocrab::params::State::Open)
            .per_page(100)
            .send()
            .await?;
        let prs = self.client.all_pages(first).await?;

        debug!(count = prs.len(), "listed open PRs");
        Ok(prs
            .into_iter()
            .map(|pr| PullRequestSummary {
                number: pr.number,
                title: pr.title.unwrap_or_default(),
            })
            .collect())
    }

    async fn close_pull_request(&self, repo: &Repository, number: u64) -> Result<()> {
        debug!(repo = %repo.full_name(), number, "closing PR");
        self.client
            .issues(&repo.owner, &repo.name)
            .update(number)
            .state(octocrab::models::IssueState::Closed)
            .send()
            .await?;
        debug!(number, "closed PR");
        Ok(())
    }
}
