//! Merge planning - pure functions for creating merge plans
//!
//! This module contains the pure, testable logic for creating merge plans.
//! No I/O happens here - all data is passed in, making it easy to unit test.

use crate::shell::double_quote;
use crate::types::{CommitAuthor, PullRequest, Repository};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Throwaway branch the pull request is pulled into
pub const TEMP_BRANCH: &str = "merge-pull-request";

/// Remote preferred for pushing when present (fork workflow)
pub const UPSTREAM_REMOTE: &str = "upstream";

/// Remote pushed to otherwise
pub const ORIGIN_REMOTE: &str = "origin";

/// `git status` output length of a clean working tree
///
/// Clean output is "On branch X" plus "nothing to commit, working tree
/// clean". This depends on git's locale and version; it is kept for
/// compatibility, not because it is a reliable check.
pub const CLEAN_STATUS_LINES: usize = 2;

/// Command listing configured remotes
pub const LIST_REMOTES: &str = "git remote -v";

/// A single step in the merge plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeStep {
    /// Run a git command; non-zero exit aborts the plan
    Run(String),
    /// Run `git status` and stop the plan if the working tree is not clean
    VerifyClean {
        /// Branch expected to be checked out
        branch: String,
    },
}

impl MergeStep {
    /// The command line this step runs
    pub fn command(&self) -> &str {
        match self {
            Self::Run(command) => command,
            Self::VerifyClean { .. } => "git status",
        }
    }
}

impl std::fmt::Display for MergeStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Run(command) => write!(f, "{command}"),
            Self::VerifyClean { branch } => write!(f, "git status (verify {branch} is clean)"),
        }
    }
}

/// Merge plan - the functional core output
///
/// Describes the git commands to run, in order. Created by
/// [`create_merge_plan`] (pure) and executed by `execute_merge` (effectful).
#[derive(Debug, Clone)]
pub struct MergePlan {
    /// Local clone the commands run in
    pub working_dir: PathBuf,
    /// Branch being merged into
    pub target_branch: String,
    /// Remote the result is pushed to
    pub remote: String,
    /// PR being merged
    pub pr_number: u64,
    /// Ordered steps
    pub steps: Vec<MergeStep>,
}

impl MergePlan {
    /// Command lines in execution order
    pub fn commands(&self) -> Vec<&str> {
        self.steps.iter().map(MergeStep::command).collect()
    }
}

/// Everything needed to plan a merge
#[derive(Debug, Clone, Copy)]
pub struct MergePlanInput<'a> {
    /// Repository being merged into
    pub repository: &'a Repository,
    /// PR being merged
    pub pull_request: &'a PullRequest,
    /// Local clone
    pub working_dir: &'a Path,
    /// Final commit message
    pub message: &'a str,
    /// Remote to push to
    pub remote: &'a str,
}

/// Create a merge plan (PURE - no I/O, easily testable)
///
/// The PR is pulled into [`TEMP_BRANCH`] and merged into the target branch
/// to prove it applies. The branch is then reset to the remote tip, leaving
/// the merged tree in the working copy, and committed again so the result is
/// one commit with the PR author's identity and the chosen message.
#[must_use]
pub fn create_merge_plan(input: &MergePlanInput<'_>) -> MergePlan {
    let target = &input.repository.default_branch;
    let pr = input.pull_request;
    let remote = input.remote;

    let steps = vec![
        MergeStep::Run("git status".to_string()),
        MergeStep::Run("git pull --all".to_string()),
        MergeStep::Run(format!("git checkout -b {TEMP_BRANCH} {target}")),
        MergeStep::Run(format!("git pull {} {}", pr.source_url, pr.head_ref)),
        MergeStep::Run(format!("git checkout {target}")),
        MergeStep::VerifyClean {
            branch: target.clone(),
        },
        MergeStep::Run(format!("git merge {TEMP_BRANCH}")),
        MergeStep::Run(format!("git reset {remote}/{target}")),
        MergeStep::Run("git add .".to_string()),
        MergeStep::Run(commit_command(input.message, pr.number, &pr.author)),
        MergeStep::Run(format!("git push {remote} {target}")),
        MergeStep::Run(format!("git branch -D {TEMP_BRANCH}")),
    ];

    MergePlan {
        working_dir: input.working_dir.to_path_buf(),
        target_branch: target.clone(),
        remote: remote.to_string(),
        pr_number: pr.number,
        steps,
    }
}

/// The commit command: message, a `Closes #N` trailer, and PR authorship
pub fn commit_command(message: &str, pr_number: u64, author: &CommitAuthor) -> String {
    format!(
        "git commit -a -m {} -m \"Closes #{pr_number}\" --author {}",
        double_quote(message),
        double_quote(&author.to_string())
    )
}

/// Remote names from `git remote -v` output
///
/// Each line is `<name>\t<url> (fetch|push)`; only the name is kept.
pub fn parse_remote_names(lines: &[String]) -> BTreeSet<String> {
    lines
        .iter()
        .filter_map(|line| line.split_whitespace().next())
        .map(ToString::to_string)
        .collect()
}

/// Pick the push remote: `upstream` when configured, else `origin`
pub fn select_push_remote(remotes: &BTreeSet<String>) -> &'static str {
    if remotes.contains(UPSTREAM_REMOTE) {
        UPSTREAM_REMOTE
    } else {
        ORIGIN_REMOTE
    }
}

/// Whether `git status` output describes a clean working tree
pub fn is_working_tree_clean(status_lines: &[String]) -> bool {
    status_lines.len() <= CLEAN_STATUS_LINES
}

/// The message to commit with: the operator's, or the PR title when blank
pub fn resolve_message(entered: &str, pr_title: &str) -> String {
    if entered.trim().is_empty() {
        pr_title.to_string()
    } else {
        entered.to_string()
    }
}

/// Location of the local clone: `<parent>/<repository name>`
pub fn local_repo_path(parent: &Path, repository: &Repository) -> PathBuf {
    parent.join(&repository.name)
}
