//! Merge command - merge one pull request through the local clone

use crate::cli::CliProgress;
use crate::cli::context::CommandContext;
use crate::cli::style::{Stylize, check, link};
use anstream::{eprintln, println};
use merge_pr::config::EnvConfig;
use merge_pr::error::Result;
use merge_pr::merge::{MergeOutcome, MergeSummary, merge_pull_request};
use std::path::PathBuf;
use tracing::debug;

/// Options for the merge command
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Shell the git commands are fed to
    pub shell: PathBuf,
}

/// Run the merge command
pub async fn run_merge(options: MergeOptions) -> Result<MergeOutcome> {
    // Inputs are read (and reported) before anything touches the network
    let inputs = EnvConfig::from_process_env().load_inputs(&CliProgress)?;

    let ctx = CommandContext::new(&options.shell).await?;
    debug!(login = %ctx.user.login, "connected");

    let outcome = merge_pull_request(&ctx.services(), inputs).await?;

    match &outcome {
        MergeOutcome::Merged(summary) => print_merge_summary(summary),
        MergeOutcome::UncleanWorkingTree { branch } => {
            eprintln!(
                "{}",
                format!("Commit or stash the changes on {branch} and run again.").muted()
            );
        }
    }

    Ok(outcome)
}

/// Print merge summary
fn print_merge_summary(summary: &MergeSummary) {
    let pr = link(&format!("#{}", summary.pr_number), &summary.html_url);

    println!();
    if summary.close_error.is_none() {
        println!(
            "{} Merged {} into {}/{}: {}",
            check(),
            pr.accent(),
            summary.remote.accent(),
            summary.target_branch.accent(),
            summary.title
        );
    } else {
        println!(
            "{} Merged {} into {}/{}, but the pull request is still open",
            "⚠".warn(),
            pr.accent(),
            summary.remote.accent(),
            summary.target_branch.accent()
        );
        println!(
            "{}",
            format!("   Close it manually in {}.", summary.repository).muted()
        );
    }
}
