//! Resolution of organization, repository and pull request
//!
//! Each resolver tries a direct lookup first. A missing or unknown value is
//! not fatal: the operator picks from what the API lists instead.

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::progress::ProgressCallback;
use crate::prompt::{Prompter, select_from_list};
use crate::types::{Organization, PullRequest, Repository};
use tracing::debug;

/// Resolve an organization by login, falling back to selection
pub async fn resolve_organization(
    platform: &dyn PlatformService,
    prompter: &dyn Prompter,
    progress: &dyn ProgressCallback,
    login: Option<&str>,
) -> Result<Organization> {
    if let Some(login) = login {
        if let Some(org) = platform.find_organization(login).await? {
            return Ok(org);
        }
        progress.on_message(&format!("Organization '{login}' not found"));
    }

    let orgs = platform.list_my_organizations().await?;
    select_from_list(prompter, "organization", orgs, |o| o.login.clone())
}

/// Resolve a repository of `org` by name, falling back to selection
pub async fn resolve_repository(
    platform: &dyn PlatformService,
    prompter: &dyn Prompter,
    progress: &dyn ProgressCallback,
    org: &Organization,
    name: Option<&str>,
) -> Result<Repository> {
    if let Some(name) = name {
        if let Some(repo) = platform.find_repository(org, name).await? {
            return Ok(repo);
        }
        progress.on_message(&format!("Repository '{name}' not found"));
    }

    let repos = platform.list_repositories(org).await?;
    select_from_list(prompter, "repository", repos, |r| r.name.clone())
}

/// Resolve a pull request by number, falling back to selecting an open one
///
/// The result is always open: a closed request fails with
/// [`Error::AlreadyClosed`] however it was found.
pub async fn resolve_pull_request(
    platform: &dyn PlatformService,
    prompter: &dyn Prompter,
    progress: &dyn ProgressCallback,
    repo: &Repository,
    number: Option<u64>,
) -> Result<PullRequest> {
    let direct = match number {
        Some(number) => {
            let found = platform.get_pull_request(repo, number).await?;
            if found.is_none() {
                progress.on_message(&format!("Request with id '{number}' not found"));
            }
            found
        }
        None => None,
    };

    let request = match direct {
        Some(pr) => pr,
        None => {
            let open = platform.list_open_pull_requests(repo).await?;
            let chosen = select_from_list(prompter, "pull request", open, ToString::to_string)?;
            debug!(number = chosen.number, "selected PR");
            platform
                .get_pull_request(repo, chosen.number)
                .await?
                .ok_or_else(|| Error::NotFound(format!("Pull request #{}", chosen.number)))?
        }
    };

    if !request.is_open() {
        return Err(Error::AlreadyClosed {
            number: request.number,
            title: request.title,
        });
    }

    Ok(request)
}
