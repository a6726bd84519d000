use anyhow::{Context, Result};
use compat_check_core::{config::Config, models::WorkflowRunEvent, util::run_url};
use compat_check_github::{
    GitHub,
    artifacts::fetch_compat_report,
    checks::CheckRun,
    comments::{delete_self_comment, find_self_comment, post_or_update},
    pulls::resolve_pull_request,
    render::{compose_comment, render_report},
    statuses::fetch_base_version,
};
use octocrab::models::{RunId, pulls::PullRequest};
use regex::Regex;

/// Process a completed workflow run event end to end: resolve the
/// originating PR and evaluate its compatibility report. Runs that do not
/// map to an open PR are ignored without error.
pub async fn process_event(
    github: &GitHub,
    config: &Config,
    event: &WorkflowRunEvent,
) -> Result<()> {
    let (owner, repo) = config.action.owner_repo()?;
    let run = &event.workflow_run;
    let Some(number) = resolve_pull_request(&github.client, owner, repo, run).await? else {
        tracing::info!("No open PR associated found...");
        return Ok(());
    };
    tracing::info!("Found associated PR: {number}");
    let pr = github
        .client
        .pulls(owner, repo)
        .get(number)
        .await
        .context("Failed to fetch pull request")?;
    process_pull_request(github, config, &pr, RunId(run.id)).await
}

/// Per-PR workflow. The check run is created first; a single match below
/// then performs exactly one terminal transition. Errors raised during
/// evaluation are recorded on the check run and propagated so the process
/// exits with a failure.
pub async fn process_pull_request(
    github: &GitHub,
    config: &Config,
    pr: &PullRequest,
    run_id: RunId,
) -> Result<()> {
    let (owner, repo) = config.action.owner_repo()?;
    let check = CheckRun::start(
        &github.client,
        owner,
        repo,
        &pr.head.sha,
        run_url(&config.action),
    )
    .await?;
    match evaluate(github, config, pr, run_id).await {
        Ok(Outcome::Skipped(reason)) => {
            tracing::info!("{reason}");
            check.skipped(&reason).await
        }
        Ok(Outcome::Clean) => {
            check.succeeded(None, "PR does not introduce breaking changes").await
        }
        Ok(Outcome::Breaking { beta: true, comment_url }) => {
            check
                .succeeded(
                    comment_url,
                    "PR introduces breaking changes, but the project currently accepts breaking changes",
                )
                .await
        }
        Ok(Outcome::Breaking { beta: false, comment_url }) => {
            check.failed(comment_url, "PR introduces breaking changes").await
        }
        Err(err) => {
            tracing::error!("Compatibility checks failed: {err:?}");
            if let Err(update_err) = check.errored(&err).await {
                tracing::warn!("Failed to record failure on check run: {update_err:?}");
            }
            Err(err)
        }
    }
}

enum Outcome {
    /// Expected absence of data; not an error.
    Skipped(String),
    /// No breaking changes to report.
    Clean,
    Breaking { beta: bool, comment_url: Option<String> },
}

async fn evaluate(
    github: &GitHub,
    config: &Config,
    pr: &PullRequest,
    run_id: RunId,
) -> Result<Outcome> {
    let (owner, repo) = config.action.owner_repo()?;

    let Some(report) = fetch_compat_report(&github.client, owner, repo, run_id).await? else {
        return Ok(Outcome::Skipped("No compatibility report was found".to_string()));
    };

    // Actions builds merge with the base branch, so the version the PR was
    // built against is published as a status on the base commit.
    let base_repo = pr
        .base
        .repo
        .as_ref()
        .and_then(|r| r.full_name.clone())
        .unwrap_or_else(|| config.action.repository.clone());
    let Some(version) = fetch_base_version(&github.client, &base_repo, &pr.base.sha).await?
    else {
        return Ok(Outcome::Skipped(
            "Could not determine the version the PR was built against".to_string(),
        ));
    };
    tracing::info!("PR built against {version}");
    let beta = is_beta(&config.check.beta_version_pattern, &version)?;

    let verdict = render_report(&report);
    let existing =
        find_self_comment(&github.client, owner, repo, pr.number, &config.check.self_name).await?;
    if verdict.breaking && !verdict.message.is_empty() {
        let author = pr.user.as_ref().map(|user| user.login.as_str()).unwrap_or("ghost");
        let body = compose_comment(author, beta, &verdict.message);
        let comment_url =
            post_or_update(&github.client, owner, repo, pr.number, existing.as_ref(), &body)
                .await?;
        Ok(Outcome::Breaking { beta, comment_url: Some(comment_url) })
    } else {
        if let Some(comment) = existing {
            delete_self_comment(&github.client, owner, repo, comment).await?;
        }
        Ok(Outcome::Clean)
    }
}

fn is_beta(pattern: &str, version: &str) -> Result<bool> {
    let regex = Regex::new(pattern).context("Invalid beta-version-pattern")?;
    Ok(regex.is_match(version))
}
