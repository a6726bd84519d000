use std::collections::BTreeMap;

use serde::Deserialize;

/// Payload of a `workflow_run` event, as delivered by the Actions runner.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowRunEvent {
    pub workflow_run: WorkflowRun,
}

/// The completed run this invocation was triggered by. Only the fields the
/// automation inspects are decoded; the payload carries far more.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowRun {
    pub id: u64,
    pub conclusion: Option<String>,
    pub event: String,
    pub head_branch: Option<String>,
    pub head_sha: String,
    pub head_repository: Option<EventRepository>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventRepository {
    pub name: String,
    pub owner: RepositoryOwner,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryOwner {
    pub login: String,
}

/// Compatibility report produced by the external checker, keyed by project
/// name, then by class name. Decoded once at the artifact boundary.
pub type CompatReport = BTreeMap<String, BTreeMap<String, ClassIncompatibilities>>;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassIncompatibilities {
    #[serde(default)]
    pub class_incompatibilities: Vec<Incompatibility>,
    #[serde(default)]
    pub method_incompatibilities: BTreeMap<String, Vec<Incompatibility>>,
    #[serde(default)]
    pub field_incompatibilities: BTreeMap<String, Vec<Incompatibility>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incompatibility {
    pub message: String,
    /// Errors are breaking; anything else is a warning.
    #[serde(default)]
    pub is_error: bool,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{CompatReport, WorkflowRunEvent};

    #[test]
    fn test_decode_event_payload() {
        let event: WorkflowRunEvent = serde_json::from_value(json!({
            "action": "completed",
            "workflow_run": {
                "id": 10840000123_u64,
                "name": "Build PR",
                "conclusion": "success",
                "event": "pull_request",
                "head_branch": "feature/widgets",
                "head_sha": "a1b2c3d4e5f60718293a4b5c6d7e8f9012345678",
                "head_repository": {
                    "name": "jcc",
                    "full_name": "contributor/jcc",
                    "owner": { "login": "contributor" }
                }
            }
        }))
        .unwrap();
        let run = event.workflow_run;
        assert_eq!(run.id, 10840000123);
        assert_eq!(run.conclusion.as_deref(), Some("success"));
        assert_eq!(run.event, "pull_request");
        assert_eq!(run.head_branch.as_deref(), Some("feature/widgets"));
        let head_repo = run.head_repository.unwrap();
        assert_eq!(head_repo.name, "jcc");
        assert_eq!(head_repo.owner.login, "contributor");
    }

    #[test]
    fn test_decode_report() {
        let report: CompatReport = serde_json::from_value(json!({
            "libA": {
                "Foo": {
                    "classIncompatibilities": [
                        { "message": "removed", "isError": true }
                    ],
                    "methodIncompatibilities": {
                        "bar()": [
                            { "message": "return type changed", "isError": false }
                        ]
                    },
                    "fieldIncompatibilities": {}
                }
            },
            "libB": {}
        }))
        .unwrap();
        let foo = &report["libA"]["Foo"];
        assert_eq!(foo.class_incompatibilities.len(), 1);
        assert!(foo.class_incompatibilities[0].is_error);
        assert_eq!(foo.method_incompatibilities["bar()"][0].message, "return type changed");
        assert!(foo.field_incompatibilities.is_empty());
        assert!(report["libB"].is_empty());
    }

    #[test]
    fn test_decode_report_missing_sections() {
        // The checker omits empty sections entirely; they default to empty.
        let report: CompatReport = serde_json::from_value(json!({
            "libA": {
                "Foo": {
                    "classIncompatibilities": [
                        { "message": "made final" }
                    ]
                }
            }
        }))
        .unwrap();
        let foo = &report["libA"]["Foo"];
        assert!(!foo.class_incompatibilities[0].is_error);
        assert!(foo.method_incompatibilities.is_empty());
        assert!(foo.field_incompatibilities.is_empty());
    }
}
