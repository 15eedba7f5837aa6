//! The end-to-end merge flow
//!
//! Resolve inputs, validate the pull request and the local clone, plan the
//! git commands, execute them, close the pull request. Every dependency on
//! the outside world is passed in through [`MergeServices`].

use crate::config::{MergeInputs, PARENT_DIR_DESCRIPTION};
use crate::error::{Error, Result};
use crate::merge::execute::execute_merge;
use crate::merge::plan::{
    LIST_REMOTES, MergePlanInput, create_merge_plan, local_repo_path, parse_remote_names,
    resolve_message, select_push_remote,
};
use crate::platform::{
    PlatformService, resolve_organization, resolve_pull_request, resolve_repository,
};
use crate::progress::ProgressCallback;
use crate::prompt::{Prompter, resolve_value};
use crate::shell::{CommandExecutor, run_command};
use crate::types::PullRequest;
use std::path::Path;
use tracing::debug;

/// Capabilities the merge flow runs against
#[derive(Clone, Copy)]
pub struct MergeServices<'a> {
    /// GitHub API
    pub platform: &'a dyn PlatformService,
    /// Shell command runner
    pub executor: &'a dyn CommandExecutor,
    /// Operator input
    pub prompter: &'a dyn Prompter,
    /// Audit trail
    pub progress: &'a dyn ProgressCallback,
}

/// What a completed merge did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeSummary {
    /// `owner/name` of the repository
    pub repository: String,
    /// PR number
    pub pr_number: u64,
    /// PR title
    pub title: String,
    /// Web URL for the PR
    pub html_url: String,
    /// Branch merged into
    pub target_branch: String,
    /// Remote pushed to
    pub remote: String,
    /// Why closing the PR failed, if it did. The merge is pushed either way.
    pub close_error: Option<String>,
}

/// How a merge run ended, short of an error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Merge pushed; PR closed unless `close_error` is set
    Merged(MergeSummary),
    /// Stopped before merging because the target branch had local changes
    UncleanWorkingTree {
        /// Branch with local changes
        branch: String,
    },
}

impl MergeOutcome {
    /// Whether the run did everything it set out to do
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Merged(MergeSummary { close_error: None, .. }))
    }
}

/// Refuse pull requests GitHub has not confirmed as mergeable
pub fn ensure_mergeable(pr: &PullRequest) -> Result<()> {
    match pr.mergeable {
        Some(true) => Ok(()),
        Some(false) => Err(Error::NotMergeable {
            number: pr.number,
            reason: "has merge conflicts".to_string(),
        }),
        None => Err(Error::NotMergeable {
            number: pr.number,
            reason: "merge status unknown (GitHub still computing)".to_string(),
        }),
    }
}

/// Merge one pull request through the local clone
#[allow(clippy::future_not_send)]
pub async fn merge_pull_request(
    services: &MergeServices<'_>,
    inputs: MergeInputs,
) -> Result<MergeOutcome> {
    let MergeServices {
        platform,
        executor,
        prompter,
        progress,
    } = *services;

    // =========================================================================
    // Phase 1: RESOLVE - organization, repository, pull request
    // =========================================================================

    let org =
        resolve_organization(platform, prompter, progress, inputs.organization.as_deref()).await?;
    let repo =
        resolve_repository(platform, prompter, progress, &org, inputs.repository.as_deref())
            .await?;
    let pr = resolve_pull_request(platform, prompter, progress, &repo, inputs.pull_request).await?;

    progress.on_message(&format!(
        "Pull request source: {} {}",
        pr.source_url, pr.head_ref
    ));
    progress.on_message(&format!("Pull request author: {}", pr.author));
    ensure_mergeable(&pr)?;

    // =========================================================================
    // Phase 2: LOCAL - clone location, message, push remote
    // =========================================================================

    let parent = resolve_value(
        prompter,
        inputs.parent_dir.map(|p| p.to_string_lossy().into_owned()),
        PARENT_DIR_DESCRIPTION,
    )?;
    let working_dir = local_repo_path(Path::new(&parent), &repo);
    if !working_dir.is_dir() {
        return Err(Error::LocalRepoMissing(working_dir));
    }

    let entered = resolve_value(
        prompter,
        inputs.message,
        &format!("merge commit message (skip for '{}')", pr.title),
    )?;
    let message = resolve_message(&entered, &pr.title);

    let remotes = parse_remote_names(&run_command(
        executor,
        &working_dir,
        LIST_REMOTES,
        progress,
    )?);
    let remote = select_push_remote(&remotes);
    progress.on_message(&format!("Target remote repo to push: {remote}"));

    // =========================================================================
    // Phase 3: PLAN + EXECUTE
    // =========================================================================

    let plan = create_merge_plan(&MergePlanInput {
        repository: &repo,
        pull_request: &pr,
        working_dir: &working_dir,
        message: &message,
        remote,
    });
    debug!(steps = plan.steps.len(), "created merge plan");

    let execution = execute_merge(&plan, executor, progress)?;
    if let Some(branch) = execution.unclean_branch {
        return Ok(MergeOutcome::UncleanWorkingTree { branch });
    }

    // =========================================================================
    // Phase 4: CLOSE - the merge is pushed, so a failure here is only reported
    // =========================================================================

    let close_error = match platform.close_pull_request(&repo, pr.number).await {
        Ok(()) => {
            progress.on_message(&format!("Closed pull request #{}", pr.number));
            None
        }
        Err(e) => {
            progress.on_error(&format!(
                "Merge pushed, but closing pull request #{} failed: {e}",
                pr.number
            ));
            Some(e.to_string())
        }
    };

    Ok(MergeOutcome::Merged(MergeSummary {
        repository: repo.full_name(),
        pr_number: pr.number,
        title: pr.title,
        html_url: pr.html_url,
        target_branch: plan.target_branch,
        remote: plan.remote,
        close_error,
    }))
}
