//! Shell command execution
//!
//! Git is driven through a shell rather than through a git library: each
//! step is one command line, logged before it runs and echoed after.

use crate::error::{Error, Result};
use crate::progress::ProgressCallback;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

/// Shell used when none is configured
pub const DEFAULT_SHELL: &str = "/bin/bash";

/// Captured result of one command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Process exit code (-1 when terminated by a signal)
    pub exit_code: i32,
    /// Stdout, split into lines
    pub stdout: Vec<String>,
    /// Stderr, split into lines
    pub stderr: Vec<String>,
}

impl CommandOutput {
    /// Whether the command exited with code 0
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs a command line in a directory
///
/// Implementations only execute and capture; reporting and exit-code
/// checks live in [`run_command`].
pub trait CommandExecutor: Send + Sync {
    /// Execute `command` with `directory` as the working directory
    fn execute(&self, directory: &Path, command: &str) -> Result<CommandOutput>;
}

/// Executes commands by feeding them to an interactive shell's stdin
#[derive(Debug, Clone)]
pub struct ShellExecutor {
    shell: PathBuf,
}

impl ShellExecutor {
    /// Create an executor using the given shell binary
    pub fn new(shell: impl Into<PathBuf>) -> Self {
        Self {
            shell: shell.into(),
        }
    }
}

impl Default for ShellExecutor {
    fn default() -> Self {
        Self::new(DEFAULT_SHELL)
    }
}

impl CommandExecutor for ShellExecutor {
    fn execute(&self, directory: &Path, command: &str) -> Result<CommandOutput> {
        debug!(shell = %self.shell.display(), directory = %directory.display(), command, "spawning shell");

        let mut child = Command::new(&self.shell)
            .current_dir(directory)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // Dropping stdin at the end of this block closes the pipe
        if let Some(mut stdin) = child.stdin.take() {
            writeln!(stdin, "{command}")?;
            writeln!(stdin, "exit")?;
        }

        let output = child.wait_with_output()?;
        let exit_code = output.status.code().unwrap_or(-1);
        debug!(exit_code, "shell exited");

        Ok(CommandOutput {
            exit_code,
            stdout: split_lines(&output.stdout),
            stderr: split_lines(&output.stderr),
        })
    }
}

fn split_lines(bytes: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(bytes)
        .lines()
        .map(ToString::to_string)
        .collect()
}

/// Run a command, echo its output, and fail on non-zero exit
///
/// Returns the stdout lines for callers that parse them (remote listing,
/// working tree checks).
pub fn run_command(
    executor: &dyn CommandExecutor,
    directory: &Path,
    command: &str,
    progress: &dyn ProgressCallback,
) -> Result<Vec<String>> {
    progress.on_command(command, &directory.display().to_string());

    let output = executor.execute(directory, command)?;

    for line in &output.stdout {
        progress.on_stdout(line);
    }
    for line in &output.stderr {
        progress.on_stderr(line);
    }

    if !output.success() {
        return Err(Error::CommandFailed {
            command: command.to_string(),
            code: output.exit_code,
        });
    }

    Ok(output.stdout)
}

/// Quote `value` for use inside a double-quoted shell word
///
/// Escapes the characters the shell still interprets between double quotes.
pub fn double_quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if matches!(c, '\\' | '"' | '$' | '`') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}
