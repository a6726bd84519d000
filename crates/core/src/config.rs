use std::{env, path::PathBuf};

use anyhow::{Context, Result, bail};

// The Actions runner exposes inputs as INPUT_<NAME> with the name uppercased.
const INPUT_BETA_VERSION_PATTERN: &str = "INPUT_BETA-VERSION-PATTERN";
const INPUT_SELF_NAME: &str = "INPUT_SELF-NAME";

#[derive(Debug, Clone)]
pub struct Config {
    pub github: GitHubConfig,
    pub check: CheckConfig,
    pub action: ActionEnv,
}

#[derive(Debug, Clone)]
pub struct GitHubConfig {
    pub token: String,
}

#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Regex tested against the base version to decide whether breaking
    /// changes are currently accepted.
    pub beta_version_pattern: String,
    /// Login under which the automation posts, used to find its own comment.
    pub self_name: String,
}

/// Identifiers of the invoking workflow run, taken from the Actions
/// environment.
#[derive(Debug, Clone)]
pub struct ActionEnv {
    pub server_url: String,
    /// `owner/repo` of the repository the workflow ran in.
    pub repository: String,
    pub run_id: String,
    /// Path to the JSON payload of the triggering event.
    pub event_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            github: GitHubConfig { token: require("GITHUB_TOKEN")? },
            check: CheckConfig {
                beta_version_pattern: require(INPUT_BETA_VERSION_PATTERN)?,
                self_name: require(INPUT_SELF_NAME)?,
            },
            action: ActionEnv {
                server_url: require("GITHUB_SERVER_URL")?,
                repository: require("GITHUB_REPOSITORY")?,
                run_id: require("GITHUB_RUN_ID")?,
                event_path: require("GITHUB_EVENT_PATH")?.into(),
            },
        })
    }
}

impl ActionEnv {
    pub fn owner_repo(&self) -> Result<(&str, &str)> {
        match self.repository.split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() => Ok((owner, repo)),
            _ => bail!("Malformed GITHUB_REPOSITORY '{}'", self.repository),
        }
    }
}

fn require(name: &str) -> Result<String> {
    env::var(name).with_context(|| format!("Missing environment variable {name}"))
}
