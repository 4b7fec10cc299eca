//! Core agent loop implementation.

use std::sync::Arc;

use crate::config::Config;
use crate::llm::{AnthropicClient, LlmClient, Message, ToolArguments, ToolCall};
use crate::mcp::{McpClient, RepoExecutor};
use crate::task::{IssueTask, Outcome};
use crate::tools::{ToolRegistry, ToolResult};

use super::outcome::extract_outcome;
use super::prompt::{build_system_prompt, build_user_prompt};

/// The autonomous agent driving one issue-to-PR run.
pub struct Agent {
    llm: Arc<dyn LlmClient>,
    executor: Arc<dyn RepoExecutor>,
    tools: ToolRegistry,
    max_steps: usize,
}

impl Agent {
    /// Create an agent wired to the configured provider and MCP server.
    pub fn new(config: &Config) -> Self {
        let llm = Arc::new(AnthropicClient::new(
            config.api_key.clone(),
            config.model.clone(),
        ));
        let executor = Arc::new(McpClient::new(&config.mcp_server_url));
        Self::with_clients(llm, executor, config.max_steps)
    }

    /// Build an agent over explicit provider and executor handles (useful
    /// for testing).
    pub fn with_clients(
        llm: Arc<dyn LlmClient>,
        executor: Arc<dyn RepoExecutor>,
        max_steps: usize,
    ) -> Self {
        Self {
            llm,
            executor,
            tools: ToolRegistry::new(),
            max_steps,
        }
    }

    /// Run one issue task to completion and report the outcome.
    ///
    /// The conversation is owned by this call: it grows append-only, one
    /// provider round-trip per step, at most `max_steps` steps. Every
    /// failure mode folds into the returned [`Outcome`]; the only aborting
    /// path is losing the provider itself, reported with status `error`.
    pub async fn run_issue_task(&self, task: &IssueTask) -> Outcome {
        let mut conversation = vec![
            Message::System {
                content: build_system_prompt(task),
            },
            Message::User {
                content: build_user_prompt(task),
            },
        ];
        let schemas = self.tools.schemas();

        for step in 0..self.max_steps {
            tracing::debug!("Agent step {}", step + 1);

            let turn = match self.llm.complete(&conversation, &schemas).await {
                Ok(turn) => turn,
                Err(e) => {
                    tracing::error!("LLM request failed: {}", e);
                    return Outcome::error(format!("LLM request failed: {}", e));
                }
            };

            conversation.push(Message::Assistant {
                content: turn.text.clone(),
                tool_calls: turn.tool_calls.clone(),
            });

            // No tool calls: the model is done and the last line carries
            // the summary.
            if turn.tool_calls.is_empty() {
                return extract_outcome(turn.text.as_deref().unwrap_or(""));
            }

            // Dispatch strictly in received order; later calls in the same
            // turn may assume the side effects of earlier ones.
            for call in &turn.tool_calls {
                let result = self.run_tool_call(call).await;
                tracing::debug!(
                    "Tool {} finished (error: {})",
                    call.name,
                    result.is_error()
                );
                let ToolResult {
                    call_id,
                    tool_name,
                    payload,
                } = result;
                conversation.push(Message::ToolResult {
                    call_id,
                    tool_name,
                    payload,
                });
            }
        }

        Outcome::max_steps_reached("Agent hit max_steps without finalizing.")
    }

    async fn run_tool_call(&self, call: &ToolCall) -> ToolResult {
        match &call.arguments {
            ToolArguments::Object(args) => {
                self.tools
                    .dispatch(self.executor.as_ref(), &call.id, &call.name, args)
                    .await
            }
            // Decode faults never reach the dispatcher; they bounce straight
            // back to the model as data.
            ToolArguments::Malformed { error, .. } => ToolResult::error(
                &call.id,
                &call.name,
                format!("Invalid tool arguments: {}", error),
            ),
        }
    }
}
