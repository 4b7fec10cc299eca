//! Tool definitions and dispatch.
//!
//! Every tool the model can call maps to exactly one remote operation on
//! the MCP server. The registry is a closed set: unknown names, missing
//! required arguments, and executor faults all come back as error-tagged
//! [`ToolResult`]s for the agent loop to feed into the conversation.
//! Dispatch never raises out of this module.

mod git;
mod github;
mod repo;

pub use git::{CommitAndPush, CreateBranch};
pub use github::CreatePr;
pub use repo::{CloneRepo, FindFiles, ReadFile, WriteFile};

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use crate::llm::ToolSchema;
use crate::mcp::RepoExecutor;

/// A single tool the model can invoke.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name as advertised to the LLM.
    fn name(&self) -> &str;

    /// Human-readable description for the LLM.
    fn description(&self) -> &str;

    /// JSON schema for the tool's arguments.
    fn input_schema(&self) -> Value;

    /// Arguments the dispatcher checks for before executing.
    fn required_args(&self) -> &'static [&'static str];

    /// Execute the tool against the remote executor.
    async fn execute(
        &self,
        executor: &dyn RepoExecutor,
        args: &Map<String, Value>,
    ) -> anyhow::Result<Value>;
}

/// Outcome of dispatching one tool call, success or error, always tagged
/// with the originating call id and tool name for correlation.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResult {
    pub call_id: String,
    pub tool_name: String,
    /// The executor's structured response verbatim, or `{"error": ...}`.
    pub payload: Value,
}

impl ToolResult {
    fn ok(call_id: &str, tool_name: &str, payload: Value) -> Self {
        Self {
            call_id: call_id.to_string(),
            tool_name: tool_name.to_string(),
            payload,
        }
    }

    pub fn error(call_id: &str, tool_name: &str, message: impl Into<String>) -> Self {
        Self {
            call_id: call_id.to_string(),
            tool_name: tool_name.to_string(),
            payload: json!({"error": message.into()}),
        }
    }

    pub fn is_error(&self) -> bool {
        self.payload.get("error").is_some()
    }
}

/// Registry of all available tools.
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    /// Create a registry with the full issue-to-PR tool set.
    pub fn new() -> Self {
        Self {
            tools: vec![
                Box::new(CloneRepo),
                Box::new(FindFiles),
                Box::new(ReadFile),
                Box::new(WriteFile),
                Box::new(CreateBranch),
                Box::new(CommitAndPush),
                Box::new(CreatePr),
            ],
        }
    }

    /// Schemas for every registered tool, in registration order.
    pub fn schemas(&self) -> Vec<ToolSchema> {
        self.tools
            .iter()
            .map(|tool| ToolSchema {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                input_schema: tool.input_schema(),
            })
            .collect()
    }

    /// Execute one tool call and wrap the result.
    ///
    /// Never returns an error: every failure mode becomes an error-tagged
    /// [`ToolResult`] the model can see and correct on its next step.
    pub async fn dispatch(
        &self,
        executor: &dyn RepoExecutor,
        call_id: &str,
        name: &str,
        args: &Map<String, Value>,
    ) -> ToolResult {
        let Some(tool) = self.tools.iter().find(|tool| tool.name() == name) else {
            return ToolResult::error(call_id, name, format!("Unknown tool: {}", name));
        };

        for required in tool.required_args() {
            if !args.contains_key(*required) {
                return ToolResult::error(
                    call_id,
                    name,
                    format!("Missing required argument: {}", required),
                );
            }
        }

        match tool.execute(executor, args).await {
            Ok(payload) => ToolResult::ok(call_id, name, payload),
            Err(e) => ToolResult::error(call_id, name, e.to_string()),
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Pull a required string argument out of the decoded argument object.
pub(crate) fn require_str<'a>(args: &'a Map<String, Value>, key: &str) -> anyhow::Result<&'a str> {
    args.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| anyhow::anyhow!("Missing required argument: {}", key))
}
