//! Git branching and publishing tools.

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use crate::mcp::RepoExecutor;

use super::{require_str, Tool};

/// Create a new branch from an existing base branch.
pub struct CreateBranch;

#[async_trait]
impl Tool for CreateBranch {
    fn name(&self) -> &str {
        "create_branch"
    }

    fn description(&self) -> &str {
        "Create a new branch from an existing base branch in the repository."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "workdir": {
                    "type": "string",
                    "description": "Working directory returned by clone_repo."
                },
                "base": {
                    "type": "string",
                    "description": "Branch to start from."
                },
                "new_branch": {
                    "type": "string",
                    "description": "Name of the branch to create."
                }
            },
            "required": ["workdir", "base", "new_branch"]
        })
    }

    fn required_args(&self) -> &'static [&'static str] {
        &["workdir", "base", "new_branch"]
    }

    async fn execute(
        &self,
        executor: &dyn RepoExecutor,
        args: &Map<String, Value>,
    ) -> anyhow::Result<Value> {
        let workdir = require_str(args, "workdir")?;
        let base = require_str(args, "base")?;
        let new_branch = require_str(args, "new_branch")?;
        executor.create_branch(workdir, base, new_branch).await
    }
}

/// Commit current changes and push to the remote.
pub struct CommitAndPush;

#[async_trait]
impl Tool for CommitAndPush {
    fn name(&self) -> &str {
        "commit_and_push"
    }

    fn description(&self) -> &str {
        "Commit all current changes and push the branch to the remote."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "workdir": {
                    "type": "string",
                    "description": "Working directory returned by clone_repo."
                },
                "branch": {
                    "type": "string",
                    "description": "Branch to commit on and push."
                },
                "message": {
                    "type": "string",
                    "description": "The commit message."
                }
            },
            "required": ["workdir", "branch", "message"]
        })
    }

    fn required_args(&self) -> &'static [&'static str] {
        &["workdir", "branch", "message"]
    }

    async fn execute(
        &self,
        executor: &dyn RepoExecutor,
        args: &Map<String, Value>,
    ) -> anyhow::Result<Value> {
        let workdir = require_str(args, "workdir")?;
        let branch = require_str(args, "branch")?;
        let message = require_str(args, "message")?;
        executor.commit_and_push(workdir, branch, message).await
    }
}
