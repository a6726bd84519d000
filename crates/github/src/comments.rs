use anyhow::{Context, Result};
use octocrab::{Octocrab, models::issues::Comment};

/// Find the automation's own comment on a PR, scanning every page of the
/// comment thread. At most one such comment exists.
pub async fn find_self_comment(
    client: &Octocrab,
    owner: &str,
    repo: &str,
    pr_number: u64,
    self_name: &str,
) -> Result<Option<Comment>> {
    let comments = client
        .all_pages(
            client
                .issues(owner, repo)
                .list_comments(pr_number)
                .per_page(100)
                .send()
                .await
                .context("Failed to list PR comments")?,
        )
        .await?;
    Ok(comments.into_iter().find(|comment| comment.user.login == self_name))
}

/// Update the existing self-comment in place, or create a new one.
/// Returns the comment URL for the check run details link.
pub async fn post_or_update(
    client: &Octocrab,
    owner: &str,
    repo: &str,
    pr_number: u64,
    existing: Option<&Comment>,
    body: &str,
) -> Result<String> {
    let issues = client.issues(owner, repo);
    let comment = match existing {
        Some(comment) => issues
            .update_comment(comment.id, body)
            .await
            .context("Failed to update existing comment")?,
        None => {
            issues.create_comment(pr_number, body).await.context("Failed to create comment")?
        }
    };
    Ok(comment.html_url.to_string())
}

/// Remove a stale self-comment, keeping the PR clean of outdated warnings.
pub async fn delete_self_comment(
    client: &Octocrab,
    owner: &str,
    repo: &str,
    comment: Comment,
) -> Result<()> {
    client
        .issues(owner, repo)
        .delete_comment(comment.id)
        .await
        .context("Failed to delete stale comment")
}
