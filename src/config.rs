//! Environment configuration
//!
//! All run inputs are optional environment variables. Each lookup reports
//! whether the variable was set so the operator can see where values came
//! from; anything missing is resolved later through the API or a prompt.

use crate::error::{Error, Result};
use crate::progress::ProgressCallback;
use std::path::PathBuf;

/// GitHub organization login
pub const ENV_ORGANIZATION: &str = "GIT_ORGANIZATION";
/// Repository name within the organization
pub const ENV_REPOSITORY: &str = "GIT_REPOSITORY";
/// Pull request number
pub const ENV_PULL_REQUEST_ID: &str = "GIT_PULL_REQUEST_ID";
/// Directory containing the local clone
pub const ENV_LOCAL_REPO_PARENT_DIR: &str = "LOCAL_REPO_PARENT_DIR";
/// Merge commit message
pub const ENV_MESSAGE: &str = "GIT_MESSAGE";

/// Description shown for the parent directory, in logs and prompts
pub const PARENT_DIR_DESCRIPTION: &str =
    "Parent dir of your local repo, e.g. /home/user/projects";

/// Inputs for one run, each possibly unset
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeInputs {
    /// Organization login
    pub organization: Option<String>,
    /// Repository name
    pub repository: Option<String>,
    /// Pull request number
    pub pull_request: Option<u64>,
    /// Parent directory of the local clone
    pub parent_dir: Option<PathBuf>,
    /// Merge commit message
    pub message: Option<String>,
}

/// Reads configuration values through a lookup function
pub struct EnvConfig<F> {
    lookup: F,
}

impl EnvConfig<fn(&str) -> Option<String>> {
    /// Read from the process environment
    pub fn from_process_env() -> Self {
        Self {
            lookup: process_env,
        }
    }
}

fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

impl<F> EnvConfig<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Read through a custom lookup (tests, alternative sources)
    pub fn new(lookup: F) -> Self {
        Self { lookup }
    }

    /// Read a string value; empty counts as unset
    pub fn get_string(
        &self,
        key: &str,
        description: &str,
        progress: &dyn ProgressCallback,
    ) -> Option<String> {
        match (self.lookup)(key) {
            Some(value) if !value.is_empty() => {
                progress.on_message(&format!("{description} = {value}"));
                Some(value)
            }
            _ => {
                progress.on_message(&format!("{description} is not set ({key})"));
                None
            }
        }
    }

    /// Read an integer value
    pub fn get_int(
        &self,
        key: &str,
        description: &str,
        progress: &dyn ProgressCallback,
    ) -> Result<Option<u64>> {
        self.get_string(key, description, progress)
            .map(|value| {
                value.trim().parse().map_err(|_| Error::InvalidFormat {
                    key: key.to_string(),
                    value,
                })
            })
            .transpose()
    }

    /// Read every run input
    pub fn load_inputs(&self, progress: &dyn ProgressCallback) -> Result<MergeInputs> {
        Ok(MergeInputs {
            organization: self.get_string(ENV_ORGANIZATION, "GitHub organization name", progress),
            repository: self.get_string(ENV_REPOSITORY, "GitHub repository name", progress),
            pull_request: self.get_int(ENV_PULL_REQUEST_ID, "GitHub pull request id", progress)?,
            parent_dir: self
                .get_string(ENV_LOCAL_REPO_PARENT_DIR, PARENT_DIR_DESCRIPTION, progress)
                .map(PathBuf::from),
            message: self.get_string(ENV_MESSAGE, "GitHub pull request merge message", progress),
        })
    }
}
