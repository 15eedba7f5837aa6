//! Shared test fixtures

#![allow(dead_code)]

mod fake_executor;
mod mock_platform;

pub use fake_executor::{
    ExecutedCommand, FakeExecutor, clean_status, dirty_status, failure, fork_remotes,
    origin_remotes, stdout,
};
pub use mock_platform::{FindRepoCall, MockPlatformService};

use merge_pr::progress::ProgressCallback;
use merge_pr::types::{CommitAuthor, PrState, PullRequest};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::TempDir;

/// Progress sink that keeps everything for assertions
#[derive(Debug, Default)]
pub struct RecordingProgress {
    messages: Mutex<Vec<String>>,
    commands: Mutex<Vec<(String, String)>>,
    stdout: Mutex<Vec<String>>,
    stderr: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
}

impl RecordingProgress {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    /// `(command, directory)` pairs in order
    pub fn commands(&self) -> Vec<(String, String)> {
        self.commands.lock().unwrap().clone()
    }

    pub fn stdout(&self) -> Vec<String> {
        self.stdout.lock().unwrap().clone()
    }

    pub fn stderr(&self) -> Vec<String> {
        self.stderr.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }

    /// Whether any message contains `needle`
    pub fn has_message(&self, needle: &str) -> bool {
        self.messages().iter().any(|m| m.contains(needle))
    }
}

impl ProgressCallback for RecordingProgress {
    fn on_message(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }

    fn on_command(&self, command: &str, directory: &str) {
        self.commands
            .lock()
            .unwrap()
            .push((command.to_string(), directory.to_string()));
    }

    fn on_stdout(&self, line: &str) {
        self.stdout.lock().unwrap().push(line.to_string());
    }

    fn on_stderr(&self, line: &str) {
        self.stderr.lock().unwrap().push(line.to_string());
    }

    fn on_error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}

/// An open, mergeable PR from forker/widgets@fix-1 committed by Jane Doe
pub fn make_pr(number: u64, title: &str) -> PullRequest {
    PullRequest {
        number,
        title: title.to_string(),
        state: PrState::Open,
        mergeable: Some(true),
        source_url: "https://github.com/forker/widgets".to_string(),
        head_ref: "fix-1".to_string(),
        author: CommitAuthor {
            name: "Jane Doe".to_string(),
            email: "jane@x.com".to_string(),
        },
        html_url: format!("https://github.com/acme/widgets/pull/{number}"),
    }
}

/// Environment lookup over fixed pairs
pub fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

/// A parent directory holding an (empty) `widgets` clone
pub struct LocalClone {
    pub parent: TempDir,
}

impl LocalClone {
    pub fn new() -> Self {
        let parent = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir(parent.path().join("widgets")).expect("create clone dir");
        Self { parent }
    }

    pub fn parent_str(&self) -> String {
        self.parent.path().to_string_lossy().into_owned()
    }

    pub fn clone_dir(&self) -> PathBuf {
        self.parent.path().join("widgets")
    }
}

/// The full command sequence for merging acme/widgets#42 into `master`
pub fn expected_commands(remote: &str, message: &str) -> Vec<String> {
    vec![
        "git remote -v".to_string(),
        "git status".to_string(),
        "git pull --all".to_string(),
        "git checkout -b merge-pull-request master".to_string(),
        "git pull https://github.com/forker/widgets fix-1".to_string(),
        "git checkout master".to_string(),
        "git status".to_string(),
        "git merge merge-pull-request".to_string(),
        format!("git reset {remote}/master"),
        "git add .".to_string(),
        format!(
            "git commit -a -m \"{message}\" -m \"Closes #42\" --author \"Jane Doe <jane@x.com>\""
        ),
        format!("git push {remote} master"),
        "git branch -D merge-pull-request".to_string(),
    ]
}
