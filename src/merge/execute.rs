//! Merge execution - effectful operations
//!
//! This module contains the effectful code that actually performs merges.
//! It takes a `MergePlan` (created by the pure planning functions) and runs
//! its commands through a [`CommandExecutor`].

use crate::error::Result;
use crate::merge::plan::{MergePlan, MergeStep, is_working_tree_clean};
use crate::progress::ProgressCallback;
use crate::shell::{CommandExecutor, run_command};
use tracing::debug;

/// Result of merge execution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeExecutionResult {
    /// Commands that ran successfully, in order
    pub executed: Vec<String>,
    /// Branch found with local changes, if execution stopped for that
    pub unclean_branch: Option<String>,
}

impl MergeExecutionResult {
    /// Check if every planned step ran
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.unclean_branch.is_none()
    }
}

/// Execute the merge plan (EFFECTFUL)
///
/// Steps run strictly in order. A failing command aborts with
/// `Error::CommandFailed`; a dirty working tree stops execution before the
/// merge and is reported in the result rather than as an error.
pub fn execute_merge(
    plan: &MergePlan,
    executor: &dyn CommandExecutor,
    progress: &dyn ProgressCallback,
) -> Result<MergeExecutionResult> {
    let mut result = MergeExecutionResult::default();

    for step in &plan.steps {
        let output = run_command(executor, &plan.working_dir, step.command(), progress)?;
        result.executed.push(step.command().to_string());

        if let MergeStep::VerifyClean { branch } = step
            && !is_working_tree_clean(&output)
        {
            debug!(branch, lines = output.len(), "working tree not clean");
            progress.on_error("");
            progress.on_error(&format!(
                "There are local changes in branch {branch}. It's not safe to proceed. Exiting."
            ));
            result.unclean_branch = Some(branch.clone());
            break;
        }
    }

    Ok(result)
}
