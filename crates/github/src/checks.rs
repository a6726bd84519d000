use anyhow::{Context, Result};
use octocrab::{
    Octocrab,
    models::CheckRunId,
    params::checks::{CheckRunConclusion, CheckRunOutput, CheckRunStatus},
};

pub const CHECK_RUN_NAME: &str = "Compatibility checks";

/// Handle to the check run created for one invocation.
///
/// The terminal methods take `self` by value, so the run can only be
/// concluded once; the states mirror the lifecycle
/// queued → in_progress → {success, failure, skipped}.
pub struct CheckRun {
    client: Octocrab,
    owner: String,
    repo: String,
    id: CheckRunId,
    run_url: String,
}

impl CheckRun {
    /// Create the check run against the PR head commit, already in progress.
    pub async fn start(
        client: &Octocrab,
        owner: &str,
        repo: &str,
        head_sha: &str,
        run_url: String,
    ) -> Result<Self> {
        let created = client
            .checks(owner, repo)
            .create_check_run(CHECK_RUN_NAME, head_sha)
            .status(CheckRunStatus::InProgress)
            .details_url(run_url.as_str())
            .send()
            .await
            .context("Failed to create check run")?;
        Ok(Self {
            client: client.clone(),
            owner: owner.to_string(),
            repo: repo.to_string(),
            id: created.id,
            run_url,
        })
    }

    pub async fn skipped(self, reason: &str) -> Result<()> {
        self.conclude(
            CheckRunConclusion::Skipped,
            "Compatibility checks skipped",
            reason,
            None,
        )
        .await
    }

    pub async fn succeeded(self, details_url: Option<String>, message: &str) -> Result<()> {
        self.conclude(
            CheckRunConclusion::Success,
            "Compatibility checks succeeded",
            message,
            details_url,
        )
        .await
    }

    pub async fn failed(self, details_url: Option<String>, message: &str) -> Result<()> {
        self.conclude(
            CheckRunConclusion::Failure,
            "PR introduces breaking changes",
            message,
            details_url,
        )
        .await
    }

    pub async fn errored(self, err: &anyhow::Error) -> Result<()> {
        let run_url = self.run_url.clone();
        self.conclude(
            CheckRunConclusion::Failure,
            "Compatibility checks failed during execution",
            &format!("Compatibility checks failed: {err}"),
            Some(run_url),
        )
        .await
    }

    async fn conclude(
        self,
        conclusion: CheckRunConclusion,
        title: &str,
        summary: &str,
        details_url: Option<String>,
    ) -> Result<()> {
        let checks = self.client.checks(&self.owner, &self.repo);
        let mut update = checks
            .update_check_run(self.id)
            .conclusion(conclusion)
            .output(CheckRunOutput {
                title: title.to_string(),
                summary: summary.to_string(),
                text: None,
                annotations: vec![],
                images: vec![],
            });
        if let Some(details_url) = details_url {
            update = update.details_url(details_url);
        }
        update.send().await.context("Failed to update check run")?;
        Ok(())
    }
}
