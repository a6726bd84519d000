use anyhow::{Context, Result};
use octocrab::Octocrab;
use serde::Deserialize;

/// Commit statuses are matched on this description prefix; the remainder is
/// the version the PR was built against.
const VERSION_PREFIX: &str = "Version: ";

#[derive(Debug, Clone, Deserialize)]
pub struct CommitStatus {
    pub description: Option<String>,
}

/// Extract the base version from the external statuses on a commit, or
/// `None` when no status carries one.
pub async fn fetch_base_version(
    client: &Octocrab,
    repo_full_name: &str,
    sha: &str,
) -> Result<Option<String>> {
    let statuses: Vec<CommitStatus> = client
        .get(format!("/repos/{repo_full_name}/statuses/{sha}"), None::<&()>)
        .await
        .context("Failed to fetch commit statuses")?;
    Ok(version_from_statuses(&statuses))
}

fn version_from_statuses(statuses: &[CommitStatus]) -> Option<String> {
    statuses
        .iter()
        .filter_map(|status| status.description.as_deref())
        .find_map(|description| description.strip_prefix(VERSION_PREFIX).map(str::to_string))
}
