//! CLI command implementations

mod context;
mod merge;
pub mod style;

pub use merge::{MergeOptions, run_merge};

use anstream::{eprintln, println};
use merge_pr::progress::ProgressCallback;
use style::{SEPARATOR, Stylize};

/// Progress printer for the terminal
#[derive(Debug, Clone, Copy, Default)]
pub struct CliProgress;

impl ProgressCallback for CliProgress {
    fn on_message(&self, message: &str) {
        println!("{message}");
    }

    fn on_command(&self, command: &str, directory: &str) {
        println!("{}", SEPARATOR.muted());
        println!("{} {}", "Running:".emphasis(), command.accent());
        println!("{} {}", "Directory:".muted(), directory.muted());
    }

    fn on_stdout(&self, line: &str) {
        println!(" - {line}");
    }

    fn on_stderr(&self, line: &str) {
        eprintln!(" - {}", line.warn());
    }

    fn on_error(&self, message: &str) {
        eprintln!("{}", message.error());
    }
}
