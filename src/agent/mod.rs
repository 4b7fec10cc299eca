//! Agent module - the issue-to-pull-request control loop.
//!
//! The agent follows a "tools in a loop" pattern:
//! 1. Build a conversation from the issue (system prompt + issue text)
//! 2. Call the LLM with the declared tool schemas
//! 3. If the model requests tool calls, dispatch each one in order and feed
//!    the results back
//! 4. Repeat until the model answers without tools or the step budget runs
//!    out, then parse the final message into a structured outcome

mod agent_loop;
mod outcome;
mod prompt;

pub use agent_loop::Agent;
pub use outcome::extract_outcome;
pub use prompt::{build_system_prompt, build_user_prompt};
