//! Shared command context for CLI commands
//!
//! Builds the real services the merge flow runs against.

use crate::cli::CliProgress;
use crate::cli::style::{Stylize, check, spinner_style};
use anstream::println;
use indicatif::ProgressBar;
use merge_pr::auth::{connect, get_github_auth};
use merge_pr::error::Result;
use merge_pr::merge::MergeServices;
use merge_pr::platform::GitHubService;
use merge_pr::progress::SilentProgress;
use merge_pr::prompt::DialoguerPrompter;
use merge_pr::shell::ShellExecutor;
use merge_pr::types::UserIdentity;
use std::path::Path;
use std::time::Duration;

/// Shared context for CLI commands that interact with GitHub
///
/// This struct encapsulates the common setup:
/// - Discovering the GitHub token
/// - Connecting and verifying the authenticated user
/// - Choosing the shell for git commands
pub struct CommandContext {
    /// GitHub service
    pub platform: GitHubService,
    /// Authenticated user
    pub user: UserIdentity,
    /// Shell command runner
    pub executor: ShellExecutor,
    /// Terminal prompter
    pub prompter: DialoguerPrompter,
    /// Terminal progress printer
    pub progress: CliProgress,
}

impl CommandContext {
    /// Create a new command context
    pub async fn new(shell: &Path) -> Result<Self> {
        let auth = get_github_auth()?;

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(spinner_style());
        spinner.set_message("Connecting to GitHub...");
        spinner.enable_steady_tick(Duration::from_millis(80));

        // The spinner owns the line; report the user once it is cleared
        let connected = connect(&auth, &SilentProgress).await;
        spinner.finish_and_clear();
        let (platform, user) = connected?;

        println!("{} Connected as: {}", check(), user.accent());

        Ok(Self {
            platform,
            user,
            executor: ShellExecutor::new(shell),
            prompter: DialoguerPrompter,
            progress: CliProgress,
        })
    }

    /// Services for the merge flow
    pub fn services(&self) -> MergeServices<'_> {
        MergeServices {
            platform: &self.platform,
            executor: &self.executor,
            prompter: &self.prompter,
            progress: &self.progress,
        }
    }
}
