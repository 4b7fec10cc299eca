//! # Issue Agent
//!
//! An autonomous agent that turns GitHub issues into pull requests.
//!
//! This library provides:
//! - A tool-calling control loop that lets an LLM decide, step by step,
//!   which repository operations to invoke
//! - An Anthropic Messages API adapter translating the conversation to and
//!   from the provider's wire format
//! - A dispatcher mapping the declared tools onto an MCP server's
//!   repository/git/GitHub operations
//!
//! ## Architecture
//!
//! The agent follows the "tools in a loop" pattern:
//! 1. Build a conversation from the issue (system prompt + issue text)
//! 2. Call the LLM with the declared tool schemas
//! 3. Dispatch any requested tool calls, in order, and feed the results back
//! 4. Repeat until the model answers without tools or the step budget runs out
//! 5. Parse the final message into a structured outcome
//!
//! ## Example
//!
//! ```rust,ignore
//! use issue_agent::{agent::Agent, config::Config};
//!
//! let config = Config::from_env()?;
//! let agent = Agent::new(&config);
//! let outcome = agent.run_issue_task(&task).await;
//! ```

pub mod agent;
pub mod config;
pub mod llm;
pub mod mcp;
pub mod task;
pub mod tools;

pub use config::Config;
pub use task::{IssueTask, Outcome, OutcomeStatus};
