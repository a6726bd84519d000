use compat_check_core::models::{CompatReport, Incompatibility};

/// Outcome of rendering a report: the markdown body and whether any
/// incompatibility in it is an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedVerdict {
    pub message: String,
    pub breaking: bool,
}

fn emoji(item: &Incompatibility) -> &'static str {
    if item.is_error { "❗" } else { "⚠" }
}

/// Render the nested report to markdown. Projects without classes produce
/// no output; a report with only such projects yields an empty message and
/// is not breaking.
pub fn render_report(report: &CompatReport) -> RenderedVerdict {
    let mut message = String::new();
    let mut breaking = false;
    for (project, classes) in report {
        if classes.is_empty() {
            continue;
        }
        message.push_str(&format!("\n## `{project}`\n"));
        for (class, incompatibilities) in classes {
            message.push_str(&format!("  - `{class}`\n"));
            for item in &incompatibilities.class_incompatibilities {
                message.push_str(&format!("    * {} `{}`\n", emoji(item), item.message));
                breaking |= item.is_error;
            }
            for (method, items) in &incompatibilities.method_incompatibilities {
                message.push_str(&format!("    * `{method}`: "));
                push_member_items(&mut message, items, &mut breaking);
            }
            for (field, items) in &incompatibilities.field_incompatibilities {
                message.push_str(&format!("    * `{field}`: "));
                push_member_items(&mut message, items, &mut breaking);
            }
        }
    }
    RenderedVerdict { message, breaking }
}

fn push_member_items(message: &mut String, items: &[Incompatibility], breaking: &mut bool) {
    let mut messages = Vec::with_capacity(items.len());
    for item in items {
        messages.push(format!("{} {}", emoji(item), item.message));
        *breaking |= item.is_error;
    }
    message.push_str(&messages.join("; "));
    message.push('\n');
}

/// Prefix the rendered body with the user-facing explanation addressed to
/// the PR author. The wording depends on whether the target branch
/// currently accepts breaking changes.
pub fn compose_comment(author: &str, beta: bool, body: &str) -> String {
    let explanation = if beta {
        "Fortunately, this project is currently accepting breaking changes, but if they are not intentional, please revert them."
    } else {
        "Unfortunately, this project is not accepting breaking changes right now. \nPlease revert them before this PR can be merged."
    };
    format!("@{author}, this PR introduces breaking changes.\n{explanation}\n{body}")
}
