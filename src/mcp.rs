//! HTTP client for the MCP server that executes repository operations.
//!
//! The MCP server does the actual cloning, editing, committing, and PR
//! creation; this module is a thin request/response wrapper around its
//! endpoints. The agent core only depends on the [`RepoExecutor`] trait, so
//! tests can swap the network out entirely.

use async_trait::async_trait;
use serde_json::{json, Value};
use url::Url;

/// The operations the agent can perform against a repository host.
///
/// One method per declared tool. Implementations are stateless from the
/// caller's point of view; each run obtains its own working directory via
/// `clone_repo`.
#[async_trait]
pub trait RepoExecutor: Send + Sync {
    /// Check out a repository at a branch; the response carries the
    /// working-directory handle used by every later operation.
    async fn clone_repo(&self, url: &str, branch: &str) -> anyhow::Result<Value>;

    /// List files under the working directory matching a glob pattern.
    async fn find_files(&self, workdir: &str, glob_pattern: &str) -> anyhow::Result<Vec<String>>;

    /// Return the text of one file.
    async fn read_file(&self, workdir: &str, path: &str) -> anyhow::Result<String>;

    /// Overwrite or create a file; the response carries a diff and the
    /// byte delta.
    async fn write_file(&self, workdir: &str, path: &str, new_text: &str)
        -> anyhow::Result<Value>;

    /// Create a new branch from a base branch.
    async fn create_branch(
        &self,
        workdir: &str,
        base: &str,
        new_branch: &str,
    ) -> anyhow::Result<Value>;

    /// Commit all changes and push; the response carries the commit id and
    /// remote reference.
    async fn commit_and_push(
        &self,
        workdir: &str,
        branch: &str,
        message: &str,
    ) -> anyhow::Result<Value>;

    /// Open a pull request; the response carries its number and URL.
    async fn create_pr(
        &self,
        repo_url: &str,
        title: &str,
        body: &str,
        head_branch: &str,
        base_branch: &str,
    ) -> anyhow::Result<Value>;
}

/// Thin HTTP client for the MCP server endpoints.
pub struct McpClient {
    http: reqwest::Client,
    base_url: String,
}

impl McpClient {
    pub fn new(base_url: &Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
        }
    }

    async fn post(&self, path: &str, payload: Value) -> anyhow::Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to reach MCP server: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("MCP server returned {} for {}: {}", status, path, body.trim());
        }

        response
            .json()
            .await
            .map_err(|e| anyhow::anyhow!("Invalid JSON from MCP server: {}", e))
    }

    /// Probe the server's health endpoint.
    pub async fn health(&self) -> anyhow::Result<Value> {
        let url = format!("{}/health", self.base_url);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to reach MCP server: {}", e))?
            .error_for_status()
            .map_err(|e| anyhow::anyhow!("MCP health check failed: {}", e))?;
        response
            .json()
            .await
            .map_err(|e| anyhow::anyhow!("Invalid JSON from MCP server: {}", e))
    }
}

#[async_trait]
impl RepoExecutor for McpClient {
    async fn clone_repo(&self, url: &str, branch: &str) -> anyhow::Result<Value> {
        self.post("/repo/clone", json!({"url": url, "branch": branch}))
            .await
    }

    async fn find_files(&self, workdir: &str, glob_pattern: &str) -> anyhow::Result<Vec<String>> {
        let data = self
            .post(
                "/repo/find_files",
                json!({"workdir": workdir, "glob": glob_pattern}),
            )
            .await?;
        let files = data
            .get("files")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(Value::as_str)
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();
        Ok(files)
    }

    async fn read_file(&self, workdir: &str, path: &str) -> anyhow::Result<String> {
        let data = self
            .post("/repo/read_file", json!({"workdir": workdir, "path": path}))
            .await?;
        let text = data
            .get("text")
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow::anyhow!("MCP read_file response missing 'text'"))?;
        Ok(text.to_string())
    }

    async fn write_file(
        &self,
        workdir: &str,
        path: &str,
        new_text: &str,
    ) -> anyhow::Result<Value> {
        self.post(
            "/repo/write_file",
            json!({"workdir": workdir, "path": path, "new_text": new_text}),
        )
        .await
    }

    async fn create_branch(
        &self,
        workdir: &str,
        base: &str,
        new_branch: &str,
    ) -> anyhow::Result<Value> {
        self.post(
            "/git/create_branch",
            json!({"workdir": workdir, "base": base, "new_branch": new_branch}),
        )
        .await
    }

    async fn commit_and_push(
        &self,
        workdir: &str,
        branch: &str,
        message: &str,
    ) -> anyhow::Result<Value> {
        self.post(
            "/git/commit_push",
            json!({"workdir": workdir, "branch": branch, "message": message}),
        )
        .await
    }

    async fn create_pr(
        &self,
        repo_url: &str,
        title: &str,
        body: &str,
        head_branch: &str,
        base_branch: &str,
    ) -> anyhow::Result<Value> {
        self.post(
            "/github/create_pr",
            json!({
                "repo_url": repo_url,
                "title": title,
                "body": body,
                "head_branch": head_branch,
                "base_branch": base_branch,
            }),
        )
        .await
    }
}
