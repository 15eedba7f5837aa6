//! merge-pr command line entry point

mod cli;

use anstream::eprintln;
use clap::Parser;
use cli::style::Stylize;
use cli::{MergeOptions, run_merge};
use merge_pr::merge::MergeOutcome;
use merge_pr::shell::DEFAULT_SHELL;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Exit status for any fatal error, or a merge whose PR could not be closed
const EXIT_FAILURE: u8 = 1;

/// Exit status when the target branch has local changes
const EXIT_UNCLEAN_TREE: u8 = 2;

/// Merge a GitHub pull request through a local git checkout
#[derive(Parser, Debug)]
#[command(name = "merge-pr", version, about)]
#[command(long_about = "Merge a GitHub pull request through a local git checkout.\n\n\
    Inputs are read from GIT_ORGANIZATION, GIT_REPOSITORY, GIT_PULL_REQUEST_ID,\n\
    LOCAL_REPO_PARENT_DIR and GIT_MESSAGE; anything missing is asked for.\n\
    The GitHub token comes from GITHUB_TOKEN, GH_TOKEN or 'gh auth token'.")]
struct Cli {
    /// Shell used to run git commands
    #[arg(long, default_value = DEFAULT_SHELL)]
    shell: PathBuf,

    /// Show debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run_merge(MergeOptions { shell: cli.shell }).await {
        Ok(outcome) => ExitCode::from(exit_status(&outcome)),
        Err(e) => {
            eprintln!("{} {e}", "Error:".error());
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

const fn exit_status(outcome: &MergeOutcome) -> u8 {
    match outcome {
        MergeOutcome::UncleanWorkingTree { .. } => EXIT_UNCLEAN_TREE,
        merged if merged.is_success() => 0,
        MergeOutcome::Merged(_) => EXIT_FAILURE,
    }
}

/// Initializes tracing on stderr
///
/// `RUST_LOG` wins when set; otherwise `--verbose` selects debug output for
/// this crate and warnings for everything else.
fn init_tracing(verbose: bool) {
    let default = if verbose { "warn,merge_pr=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
