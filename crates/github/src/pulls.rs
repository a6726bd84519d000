use anyhow::{Context, Result};
use compat_check_core::models::{EventRepository, WorkflowRun};
use octocrab::{Octocrab, params};

/// Map a completed workflow run to the open PR it belongs to, or `None` if
/// there is nothing to process. Never a hard error for the not-found case.
///
/// When the head repository is a fork whose name differs from this
/// repository's, the head filter does not apply and the open PRs are
/// scanned manually instead. Only the first page (100 PRs) is examined;
/// a match beyond it is not found.
pub async fn resolve_pull_request(
    client: &Octocrab,
    owner: &str,
    repo: &str,
    run: &WorkflowRun,
) -> Result<Option<u64>> {
    let Some((head_repo, head_branch)) = eligible_head(run) else {
        return Ok(None);
    };
    let head_label = format!("{}:{}", head_repo.owner.login, head_branch);
    if head_repo.name == repo {
        let page = client
            .pulls(owner, repo)
            .list()
            .state(params::State::Open)
            .sort(params::pulls::Sort::LongRunning)
            .head(&head_label)
            .send()
            .await
            .context("Failed to list pull requests")?;
        match page.items.first() {
            Some(pr) => Ok(Some(pr.number)),
            None => {
                tracing::info!("No open PR associated...");
                Ok(None)
            }
        }
    } else {
        let page = client
            .pulls(owner, repo)
            .list()
            .state(params::State::Open)
            .per_page(100)
            .send()
            .await
            .context("Failed to list pull requests")?;
        Ok(first_matching_number(
            page.items.iter().map(|pr| (pr.number, pr.head.label.as_deref())),
            &head_label,
        ))
    }
}

/// Check the run is worth resolving at all: it must have succeeded, have
/// been triggered by a pull request, and carry a known head. Each failed
/// precondition aborts silently.
fn eligible_head(run: &WorkflowRun) -> Option<(&EventRepository, &str)> {
    if run.conclusion.as_deref() != Some("success") {
        tracing::info!("Aborting, workflow run was not successful");
        return None;
    }
    if run.event != "pull_request" {
        tracing::info!("Aborting, only runs triggered by pull_request events are processed");
        return None;
    }
    let Some(head_branch) = run.head_branch.as_deref() else {
        tracing::info!("Unknown head branch...");
        return None;
    };
    let Some(head_repo) = run.head_repository.as_ref() else {
        tracing::info!("Unknown head repository...");
        return None;
    };
    Some((head_repo, head_branch))
}

/// First PR whose head label matches exactly, in listing order.
fn first_matching_number<'a>(
    prs: impl IntoIterator<Item = (u64, Option<&'a str>)>,
    head_label: &str,
) -> Option<u64> {
    prs.into_iter().find(|(_, label)| *label == Some(head_label)).map(|(number, _)| number)
}

#[cfg(test)]
mod tests {
    use compat_check_core::models::{EventRepository, RepositoryOwner, WorkflowRun};

    use super::{eligible_head, first_matching_number};

    fn run() -> WorkflowRun {
        WorkflowRun {
            id: 1,
            conclusion: Some("success".to_string()),
            event: "pull_request".to_string(),
            head_branch: Some("feature".to_string()),
            head_sha: "abc123".to_string(),
            head_repository: Some(EventRepository {
                name: "jcc".to_string(),
                owner: RepositoryOwner { login: "contributor".to_string() },
            }),
        }
    }

    #[test]
    fn test_eligible_head() {
        let binding = run();
        let (head_repo, head_branch) = eligible_head(&binding).unwrap();
        assert_eq!(head_repo.owner.login, "contributor");
        assert_eq!(head_branch, "feature");
    }

    #[test]
    fn test_unsuccessful_run_skipped() {
        let mut failed = run();
        failed.conclusion = Some("failure".to_string());
        assert!(eligible_head(&failed).is_none());
        let mut missing = run();
        missing.conclusion = None;
        assert!(eligible_head(&missing).is_none());
    }

    #[test]
    fn test_non_pull_request_event_skipped() {
        let mut push = run();
        push.event = "push".to_string();
        assert!(eligible_head(&push).is_none());
    }

    #[test]
    fn test_unknown_head_skipped() {
        let mut no_branch = run();
        no_branch.head_branch = None;
        assert!(eligible_head(&no_branch).is_none());
        let mut no_repo = run();
        no_repo.head_repository = None;
        assert!(eligible_head(&no_repo).is_none());
    }

    #[test]
    fn test_first_matching_number() {
        let prs = [
            (10, Some("other:feature")),
            (11, Some("contributor:feature")),
            (12, Some("contributor:feature")),
            (13, None),
        ];
        // First match wins in listing order; labels must match exactly.
        assert_eq!(first_matching_number(prs, "contributor:feature"), Some(11));
        assert_eq!(first_matching_number(prs, "contributor:Feature"), None);
        // A PR on a later page is never seen; the scan covers one page only.
        assert_eq!(first_matching_number([], "contributor:feature"), None);
    }
}
