//! Fake command executor for testing
//!
//! Records every command with its directory and answers from a script:
//! queued responses per command line first, then per-command defaults, then
//! an empty successful result.

#![allow(dead_code)]

use merge_pr::error::Result;
use merge_pr::shell::{CommandExecutor, CommandOutput};
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// One recorded execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutedCommand {
    pub directory: PathBuf,
    pub command: String,
}

/// Build a successful output from stdout lines
pub fn stdout(lines: &[&str]) -> CommandOutput {
    CommandOutput {
        exit_code: 0,
        stdout: lines.iter().map(ToString::to_string).collect(),
        stderr: Vec::new(),
    }
}

/// Build a failed output with one stderr line
pub fn failure(code: i32, message: &str) -> CommandOutput {
    CommandOutput {
        exit_code: code,
        stdout: Vec::new(),
        stderr: vec![message.to_string()],
    }
}

/// `git status` on a clean branch
pub fn clean_status() -> CommandOutput {
    stdout(&["On branch master", "nothing to commit, working tree clean"])
}

/// `git status` with a modified file
pub fn dirty_status() -> CommandOutput {
    stdout(&[
        "On branch master",
        "Changes not staged for commit:",
        "  modified:   src/lib.rs",
    ])
}

/// `git remote -v` with only origin
pub fn origin_remotes() -> CommandOutput {
    stdout(&[
        "origin\tgit@github.com:acme/widgets.git (fetch)",
        "origin\tgit@github.com:acme/widgets.git (push)",
    ])
}

/// `git remote -v` with a fork as origin and the org as upstream
pub fn fork_remotes() -> CommandOutput {
    stdout(&[
        "origin\tgit@github.com:me/widgets.git (fetch)",
        "origin\tgit@github.com:me/widgets.git (push)",
        "upstream\tgit@github.com:acme/widgets.git (fetch)",
        "upstream\tgit@github.com:acme/widgets.git (push)",
    ])
}

/// Scripted executor
pub struct FakeExecutor {
    queued: Mutex<HashMap<String, VecDeque<CommandOutput>>>,
    defaults: Mutex<HashMap<String, CommandOutput>>,
    calls: Mutex<Vec<ExecutedCommand>>,
}

impl Default for FakeExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeExecutor {
    /// Executor for a clean clone with only an origin remote
    pub fn new() -> Self {
        let executor = Self {
            queued: Mutex::new(HashMap::new()),
            defaults: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        };
        executor.set_default("git status", clean_status());
        executor.set_default("git remote -v", origin_remotes());
        executor
    }

    /// Answer `command` with `output` whenever nothing is queued for it
    pub fn set_default(&self, command: &str, output: CommandOutput) {
        self.defaults
            .lock()
            .unwrap()
            .insert(command.to_string(), output);
    }

    /// Answer the next run of `command` with `output`
    pub fn respond(&self, command: &str, output: CommandOutput) {
        self.queued
            .lock()
            .unwrap()
            .entry(command.to_string())
            .or_default()
            .push_back(output);
    }

    /// Make every run of `command` exit with `code`
    pub fn fail(&self, command: &str, code: i32) {
        self.set_default(command, failure(code, "fatal: scripted failure"));
    }

    /// Every execution, in order
    pub fn calls(&self) -> Vec<ExecutedCommand> {
        self.calls.lock().unwrap().clone()
    }

    /// Command lines executed, in order
    pub fn commands(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.command).collect()
    }

    /// Assert a command never ran
    pub fn assert_not_run(&self, command: &str) {
        let commands = self.commands();
        assert!(
            !commands.iter().any(|c| c == command),
            "Expected '{command}' NOT to run but got: {commands:?}"
        );
    }
}

impl CommandExecutor for FakeExecutor {
    fn execute(&self, directory: &Path, command: &str) -> Result<CommandOutput> {
        self.calls.lock().unwrap().push(ExecutedCommand {
            directory: directory.to_path_buf(),
            command: command.to_string(),
        });

        if let Some(output) = self
            .queued
            .lock()
            .unwrap()
            .get_mut(command)
            .and_then(VecDeque::pop_front)
        {
            return Ok(output);
        }

        let defaults = self.defaults.lock().unwrap();
        Ok(defaults.get(command).cloned().unwrap_or_default())
    }
}
