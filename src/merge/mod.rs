//! Merge engine for a single pull request
//!
//! Three-phase pattern:
//! 1. Gather - resolve the PR and the local clone (effectful, interactive)
//! 2. Plan - create `MergePlan` (pure, testable)
//! 3. Execute - run the git commands and close the PR (effectful)

mod execute;
mod plan;
mod workflow;

pub use execute::{MergeExecutionResult, execute_merge};
pub use plan::{
    CLEAN_STATUS_LINES, LIST_REMOTES, MergePlan, MergePlanInput, MergeStep, ORIGIN_REMOTE,
    TEMP_BRANCH, UPSTREAM_REMOTE, commit_command, create_merge_plan, is_working_tree_clean,
    local_repo_path, parse_remote_names, resolve_message, select_push_remote,
};
pub use workflow::{
    MergeOutcome, MergeServices, MergeSummary, ensure_mergeable, merge_pull_request,
};
