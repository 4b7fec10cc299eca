//! Task input and run outcome types.

use serde::{Deserialize, Serialize};

/// A GitHub issue the agent should act on.
///
/// Created once per run from the incoming issue payload and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueTask {
    /// Git URL of the repository the issue belongs to
    pub repo_url: String,

    /// Branch new work is based on
    #[serde(default = "default_base_branch")]
    pub base_branch: String,

    /// Issue number on the repository host
    pub issue_number: u64,

    /// Issue title
    pub title: String,

    /// Free-text issue body
    #[serde(default)]
    pub body: String,

    /// Labels attached to the issue
    #[serde(default)]
    pub labels: Vec<String>,
}

fn default_base_branch() -> String {
    "main".to_string()
}

/// Terminal status of one issue-to-PR run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// A pull request was opened
    PrCreated,
    /// The agent decided not to change anything
    #[default]
    NoAction,
    /// The step budget ran out before the model finalized
    MaxStepsReached,
    /// The provider itself became unreachable mid-run
    Error,
}

/// The structured result of one run, the only artifact this crate reports.
///
/// `pr_number` and `pr_url` always serialize (as `null` when absent) because
/// the final-summary contract with the model names them explicitly; the other
/// optional fields are omitted when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    #[serde(default)]
    pub status: OutcomeStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit_sha: Option<String>,

    #[serde(default)]
    pub pr_number: Option<u64>,

    #[serde(default)]
    pub pr_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

impl Default for Outcome {
    fn default() -> Self {
        Self {
            status: OutcomeStatus::NoAction,
            branch: None,
            commit_sha: None,
            pr_number: None,
            pr_url: None,
            details: None,
            raw_response: None,
        }
    }
}

impl Outcome {
    /// Outcome for a run that changed nothing, with an explanation.
    pub fn no_action(details: impl Into<String>) -> Self {
        Self {
            details: Some(details.into()),
            ..Self::default()
        }
    }

    /// Outcome for a run aborted by a provider transport failure.
    pub fn error(details: impl Into<String>) -> Self {
        Self {
            status: OutcomeStatus::Error,
            details: Some(details.into()),
            ..Self::default()
        }
    }

    /// Outcome for a run that exhausted its step budget.
    pub fn max_steps_reached(details: impl Into<String>) -> Self {
        Self {
            status: OutcomeStatus::MaxStepsReached,
            details: Some(details.into()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&OutcomeStatus::PrCreated).unwrap();
        assert_eq!(json, "\"pr_created\"");
        let json = serde_json::to_string(&OutcomeStatus::MaxStepsReached).unwrap();
        assert_eq!(json, "\"max_steps_reached\"");
    }

    #[test]
    fn outcome_serializes_pr_fields_even_when_null() {
        let value = serde_json::to_value(Outcome::no_action("nothing to do")).unwrap();
        assert_eq!(value["status"], "no_action");
        assert!(value["pr_number"].is_null());
        assert!(value["pr_url"].is_null());
        assert!(value.get("branch").is_none());
        assert!(value.get("commit_sha").is_none());
    }

    #[test]
    fn issue_task_fills_defaults() {
        let task: IssueTask = serde_json::from_str(
            r#"{"repo_url": "https://github.com/acme/widgets", "issue_number": 3, "title": "Fix it"}"#,
        )
        .unwrap();
        assert_eq!(task.base_branch, "main");
        assert_eq!(task.body, "");
        assert!(task.labels.is_empty());
    }
}
