//! Repository inspection and editing tools.

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use crate::mcp::RepoExecutor;

use super::{require_str, Tool};

/// Clone the target repository.
pub struct CloneRepo;

#[async_trait]
impl Tool for CloneRepo {
    fn name(&self) -> &str {
        "clone_repo"
    }

    fn description(&self) -> &str {
        "Clone the target repository. Call this once before accessing any files."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "url": {
                    "type": "string",
                    "description": "Git URL of the repository to clone."
                },
                "branch": {
                    "type": "string",
                    "description": "Base branch to check out, e.g. 'main'."
                }
            },
            "required": ["url", "branch"]
        })
    }

    fn required_args(&self) -> &'static [&'static str] {
        &["url", "branch"]
    }

    async fn execute(
        &self,
        executor: &dyn RepoExecutor,
        args: &Map<String, Value>,
    ) -> anyhow::Result<Value> {
        let url = require_str(args, "url")?;
        let branch = require_str(args, "branch")?;
        executor.clone_repo(url, branch).await
    }
}

/// List files matching a glob pattern.
pub struct FindFiles;

#[async_trait]
impl Tool for FindFiles {
    fn name(&self) -> &str {
        "find_files"
    }

    fn description(&self) -> &str {
        "Find files in the working directory using a glob pattern."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "workdir": {
                    "type": "string",
                    "description": "Working directory returned by clone_repo."
                },
                "glob_pattern": {
                    "type": "string",
                    "description": "Glob pattern, e.g. '**/*.rs'."
                }
            },
            "required": ["workdir", "glob_pattern"]
        })
    }

    fn required_args(&self) -> &'static [&'static str] {
        &["workdir", "glob_pattern"]
    }

    async fn execute(
        &self,
        executor: &dyn RepoExecutor,
        args: &Map<String, Value>,
    ) -> anyhow::Result<Value> {
        let workdir = require_str(args, "workdir")?;
        let glob_pattern = require_str(args, "glob_pattern")?;
        let files = executor.find_files(workdir, glob_pattern).await?;
        Ok(json!({"files": files}))
    }
}

/// Read one file from the working directory.
pub struct ReadFile;

#[async_trait]
impl Tool for ReadFile {
    fn name(&self) -> &str {
        "read_file"
    }

    fn description(&self) -> &str {
        "Read a file from the repository working directory."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "workdir": {
                    "type": "string",
                    "description": "Working directory returned by clone_repo."
                },
                "path": {
                    "type": "string",
                    "description": "Path of the file, relative to the working directory."
                }
            },
            "required": ["workdir", "path"]
        })
    }

    fn required_args(&self) -> &'static [&'static str] {
        &["workdir", "path"]
    }

    async fn execute(
        &self,
        executor: &dyn RepoExecutor,
        args: &Map<String, Value>,
    ) -> anyhow::Result<Value> {
        let workdir = require_str(args, "workdir")?;
        let path = require_str(args, "path")?;
        let text = executor.read_file(workdir, path).await?;
        Ok(json!({"text": text}))
    }
}

/// Overwrite or create a file.
pub struct WriteFile;

#[async_trait]
impl Tool for WriteFile {
    fn name(&self) -> &str {
        "write_file"
    }

    fn description(&self) -> &str {
        "Overwrite a file with new content, creating it if necessary. Returns a diff."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "workdir": {
                    "type": "string",
                    "description": "Working directory returned by clone_repo."
                },
                "path": {
                    "type": "string",
                    "description": "Path of the file, relative to the working directory."
                },
                "new_text": {
                    "type": "string",
                    "description": "Full new content of the file."
                }
            },
            "required": ["workdir", "path", "new_text"]
        })
    }

    fn required_args(&self) -> &'static [&'static str] {
        &["workdir", "path", "new_text"]
    }

    async fn execute(
        &self,
        executor: &dyn RepoExecutor,
        args: &Map<String, Value>,
    ) -> anyhow::Result<Value> {
        let workdir = require_str(args, "workdir")?;
        let path = require_str(args, "path")?;
        let new_text = require_str(args, "new_text")?;
        executor.write_file(workdir, path, new_text).await
    }
}
