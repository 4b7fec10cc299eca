//! GitHub pull request tools.

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use crate::mcp::RepoExecutor;

use super::{require_str, Tool};

/// Open a pull request for a pushed branch.
pub struct CreatePr;

#[async_trait]
impl Tool for CreatePr {
    fn name(&self) -> &str {
        "create_pr"
    }

    fn description(&self) -> &str {
        "Create a pull request on GitHub for the pushed branch."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "repo_url": {
                    "type": "string",
                    "description": "URL of the repository on GitHub."
                },
                "title": {
                    "type": "string",
                    "description": "Pull request title."
                },
                "body": {
                    "type": "string",
                    "description": "Pull request description. Optional."
                },
                "head_branch": {
                    "type": "string",
                    "description": "Branch with the changes."
                },
                "base_branch": {
                    "type": "string",
                    "description": "Branch to merge into."
                }
            },
            "required": ["repo_url", "title", "head_branch", "base_branch"]
        })
    }

    fn required_args(&self) -> &'static [&'static str] {
        &["repo_url", "title", "head_branch", "base_branch"]
    }

    async fn execute(
        &self,
        executor: &dyn RepoExecutor,
        args: &Map<String, Value>,
    ) -> anyhow::Result<Value> {
        let repo_url = require_str(args, "repo_url")?;
        let title = require_str(args, "title")?;
        let body = args.get("body").and_then(Value::as_str).unwrap_or("");
        let head_branch = require_str(args, "head_branch")?;
        let base_branch = require_str(args, "base_branch")?;
        executor
            .create_pr(repo_url, title, body, head_branch, base_branch)
            .await
    }
}
