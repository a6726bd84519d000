pub mod artifacts;
pub mod checks;
pub mod comments;
pub mod pulls;
pub mod render;
pub mod statuses;

use anyhow::{Context, Result};
use compat_check_core::config::GitHubConfig;
use octocrab::Octocrab;

#[derive(Clone)]
pub struct GitHub {
    pub client: Octocrab,
}

impl GitHub {
    pub async fn new(config: &GitHubConfig) -> Result<Self> {
        let client = Octocrab::builder()
            .personal_token(config.token.clone())
            .build()
            .context("Failed to create GitHub client")?;
        let profile = client.current().user().await.context("Failed to fetch current user")?;
        tracing::info!("Logged in as {}", profile.login);
        Ok(Self { client })
    }
}
