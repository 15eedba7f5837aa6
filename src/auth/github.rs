//! GitHub token discovery and connection

use super::AuthSource;
use crate::error::{Error, Result};
use crate::platform::{GitHubService, PlatformService};
use crate::progress::ProgressCallback;
use crate::types::UserIdentity;
use std::process::Command;
use tracing::debug;

/// Environment variables checked for a token, in order
pub const TOKEN_ENV_VARS: [&str; 2] = ["GITHUB_TOKEN", "GH_TOKEN"];

/// Environment variable overriding the API root
pub const API_URL_ENV_VAR: &str = "GITHUB_API_URL";

/// Resolved GitHub credentials
#[derive(Debug, Clone)]
pub struct GitHubAuthConfig {
    /// API token
    pub token: String,
    /// Where the token came from
    pub source: AuthSource,
    /// API root override (GitHub Enterprise)
    pub api_base: Option<String>,
}

/// Discover credentials from the process environment, then `gh auth token`
pub fn get_github_auth() -> Result<GitHubAuthConfig> {
    get_github_auth_with(|key| std::env::var(key).ok(), gh_cli_token)
}

/// Discover credentials through the given environment lookup and CLI fallback
pub fn get_github_auth_with(
    env: impl Fn(&str) -> Option<String>,
    cli_token: impl FnOnce() -> Option<String>,
) -> Result<GitHubAuthConfig> {
    let api_base = env(API_URL_ENV_VAR).filter(|v| !v.is_empty());

    let from_env = TOKEN_ENV_VARS
        .iter()
        .find_map(|key| env(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty()));

    if let Some(token) = from_env {
        debug!("using GitHub token from environment");
        return Ok(GitHubAuthConfig {
            token,
            source: AuthSource::EnvVar,
            api_base,
        });
    }

    if let Some(token) = cli_token() {
        debug!("using GitHub token from gh CLI");
        return Ok(GitHubAuthConfig {
            token,
            source: AuthSource::Cli,
            api_base,
        });
    }

    Err(Error::AuthenticationFailed(format!(
        "no token found; set {} or run 'gh auth login'",
        TOKEN_ENV_VARS.join(" or ")
    )))
}

/// Ask the gh CLI for its stored token, if it is installed and logged in
fn gh_cli_token() -> Option<String> {
    let output = Command::new("gh").args(["auth", "token"]).output().ok()?;
    if !output.status.success() {
        debug!(status = ?output.status.code(), "gh auth token failed");
        return None;
    }
    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!token.is_empty()).then_some(token)
}

/// Build the GitHub service and verify the credentials against the API
pub async fn connect(
    auth: &GitHubAuthConfig,
    progress: &dyn ProgressCallback,
) -> Result<(GitHubService, UserIdentity)> {
    let service = GitHubService::new(&auth.token, auth.api_base.as_deref())
        .map_err(|e| Error::AuthenticationFailed(e.to_string()))?;

    let user = service
        .current_user()
        .await
        .map_err(|e| Error::AuthenticationFailed(format!("token from {} rejected: {e}", auth.source)))?;

    progress.on_message(&format!("Connected as: {user}"));
    Ok((service, user))
}
