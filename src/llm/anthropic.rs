//! Anthropic Messages API client.
//!
//! All knowledge of the provider's request/response shape is contained in
//! this module, split into two pure translation functions so they can be
//! exercised without a network:
//! - [`build_request`] renders the internal conversation into the wire
//!   request (system text into the dedicated `system` field, tool results
//!   into `tool_result` content blocks on user messages),
//! - [`parse_response`] turns the wire response back into an
//!   [`AssistantTurn`].
//!
//! Translation is lossless for text, tool calls, and tool results;
//! provider metadata outside that contract (usage, stop reason) is not
//! preserved.

use std::collections::HashSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{AssistantTurn, LlmClient, Message, ToolArguments, ToolCall, ToolSchema};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Client for the Anthropic Messages API.
pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl AnthropicClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            model,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

#[async_trait]
impl LlmClient for AnthropicClient {
    async fn complete(
        &self,
        conversation: &[Message],
        tools: &[ToolSchema],
    ) -> anyhow::Result<AssistantTurn> {
        let request = build_request(&self.model, self.max_tokens, conversation, tools)?;

        let response = self
            .http
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to reach Anthropic API: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Anthropic API returned {}: {}", status, body.trim());
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to decode Anthropic response: {}", e))?;

        Ok(parse_response(parsed))
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<WireMessage>,
    tools: Vec<WireTool>,
}

#[derive(Debug, Serialize)]
struct WireTool {
    name: String,
    description: String,
    input_schema: Value,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireMessage {
    role: String,
    content: Vec<ContentBlock>,
}

/// Content blocks shared by both wire directions. `ToolResult` only ever
/// appears outbound and `ToolUse` only ever carries provider-assigned ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text {
        text: String,
    },
    ToolUse {
        id: String,
        name: String,
        input: Value,
    },
    ToolResult {
        tool_use_id: String,
        content: String,
    },
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

/// Render the internal conversation and tool schemas into a wire request.
///
/// System content goes into the top-level `system` field. Tool results
/// become `tool_result` blocks on user messages, carrying the originating
/// call id and the payload serialized to JSON text exactly once;
/// consecutive results are batched into a single user message the way the
/// API expects. A tool result whose id matches no prior tool call is
/// rejected here rather than bounced by the provider.
fn build_request(
    model: &str,
    max_tokens: u32,
    conversation: &[Message],
    tools: &[ToolSchema],
) -> anyhow::Result<MessagesRequest> {
    let mut system: Option<String> = None;
    let mut messages: Vec<WireMessage> = Vec::new();
    let mut call_ids: HashSet<&str> = HashSet::new();

    for message in conversation {
        match message {
            Message::System { content } => match &mut system {
                Some(existing) => {
                    existing.push_str("\n\n");
                    existing.push_str(content);
                }
                None => system = Some(content.clone()),
            },
            Message::User { content } => {
                messages.push(WireMessage {
                    role: "user".to_string(),
                    content: vec![ContentBlock::Text {
                        text: content.clone(),
                    }],
                });
            }
            Message::Assistant {
                content,
                tool_calls,
            } => {
                let mut blocks = Vec::new();
                if let Some(text) = content {
                    blocks.push(ContentBlock::Text { text: text.clone() });
                }
                for call in tool_calls {
                    call_ids.insert(call.id.as_str());
                    blocks.push(ContentBlock::ToolUse {
                        id: call.id.clone(),
                        name: call.name.clone(),
                        input: call.arguments.to_raw(),
                    });
                }
                // A fully empty assistant turn is terminal and never replayed,
                // and the API rejects empty content arrays.
                if !blocks.is_empty() {
                    messages.push(WireMessage {
                        role: "assistant".to_string(),
                        content: blocks,
                    });
                }
            }
            Message::ToolResult {
                call_id, payload, ..
            } => {
                if !call_ids.contains(call_id.as_str()) {
                    anyhow::bail!(
                        "Tool result {} has no matching tool call in the conversation",
                        call_id
                    );
                }
                let block = ContentBlock::ToolResult {
                    tool_use_id: call_id.clone(),
                    content: payload.to_string(),
                };
                match messages.last_mut() {
                    Some(last)
                        if last.role == "user"
                            && matches!(
                                last.content.first(),
                                Some(ContentBlock::ToolResult { .. })
                            ) =>
                    {
                        last.content.push(block);
                    }
                    _ => messages.push(WireMessage {
                        role: "user".to_string(),
                        content: vec![block],
                    }),
                }
            }
        }
    }

    Ok(MessagesRequest {
        model: model.to_string(),
        max_tokens,
        system,
        messages,
        tools: tools
            .iter()
            .map(|t| WireTool {
                name: t.name.clone(),
                description: t.description.clone(),
                input_schema: t.input_schema.clone(),
            })
            .collect(),
    })
}

/// Turn a wire response into an [`AssistantTurn`].
///
/// Text blocks are concatenated in order; every `tool_use` block becomes a
/// [`ToolCall`] with its arguments normalized, a decode failure staying
/// local to that one call.
fn parse_response(response: MessagesResponse) -> AssistantTurn {
    let mut text_parts: Vec<String> = Vec::new();
    let mut tool_calls: Vec<ToolCall> = Vec::new();

    for block in response.content {
        match block {
            ContentBlock::Text { text } => text_parts.push(text),
            ContentBlock::ToolUse { id, name, input } => tool_calls.push(ToolCall {
                id,
                name,
                arguments: ToolArguments::from_raw(input),
            }),
            // The API does not produce tool_result blocks.
            ContentBlock::ToolResult { .. } => {}
        }
    }

    let text = if text_parts.is_empty() {
        None
    } else {
        Some(text_parts.join("\n"))
    };

    AssistantTurn { text, tool_calls }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schemas() -> Vec<ToolSchema> {
        vec![ToolSchema {
            name: "read_file".to_string(),
            description: "Read a file".to_string(),
            input_schema: json!({"type": "object"}),
        }]
    }

    fn call(id: &str, name: &str, args: Value) -> ToolCall {
        ToolCall {
            id: id.to_string(),
            name: name.to_string(),
            arguments: ToolArguments::from_raw(args),
        }
    }

    #[test]
    fn system_content_moves_to_the_system_field() {
        let conversation = vec![
            Message::System {
                content: "be careful".to_string(),
            },
            Message::User {
                content: "fix the bug".to_string(),
            },
        ];
        let request = build_request("m", 1024, &conversation, &schemas()).unwrap();
        assert_eq!(request.system.as_deref(), Some("be careful"));
        let wire = serde_json::to_value(&request).unwrap();
        assert_eq!(wire["messages"].as_array().unwrap().len(), 1);
        assert_eq!(wire["messages"][0]["role"], "user");
        assert_eq!(wire["tools"][0]["name"], "read_file");
    }

    #[test]
    fn assistant_tool_calls_replay_as_tool_use_blocks() {
        let conversation = vec![
            Message::User {
                content: "go".to_string(),
            },
            Message::Assistant {
                content: Some("reading".to_string()),
                tool_calls: vec![call("tc_1", "read_file", json!({"path": "a.rs"}))],
            },
        ];
        let request = build_request("m", 1024, &conversation, &[]).unwrap();
        let wire = serde_json::to_value(&request).unwrap();
        let blocks = wire["messages"][1]["content"].as_array().unwrap();
        assert_eq!(blocks[0]["type"], "text");
        assert_eq!(blocks[1]["type"], "tool_use");
        assert_eq!(blocks[1]["id"], "tc_1");
        assert_eq!(blocks[1]["input"], json!({"path": "a.rs"}));
    }

    #[test]
    fn tool_results_render_as_user_tool_result_blocks() {
        let conversation = vec![
            Message::Assistant {
                content: None,
                tool_calls: vec![
                    call("tc_1", "read_file", json!({"path": "a.rs"})),
                    call("tc_2", "read_file", json!({"path": "b.rs"})),
                ],
            },
            Message::ToolResult {
                call_id: "tc_1".to_string(),
                tool_name: "read_file".to_string(),
                payload: json!({"text": "fn a() {}"}),
            },
            Message::ToolResult {
                call_id: "tc_2".to_string(),
                tool_name: "read_file".to_string(),
                payload: json!({"files": ["b.rs"]}),
            },
        ];
        let request = build_request("m", 1024, &conversation, &[]).unwrap();
        let wire = serde_json::to_value(&request).unwrap();
        let messages = wire["messages"].as_array().unwrap();
        // Both results batch into one user message, in call order.
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1]["role"], "user");
        let blocks = messages[1]["content"].as_array().unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0]["tool_use_id"], "tc_1");
        assert_eq!(blocks[1]["tool_use_id"], "tc_2");
        // Payload is serialized exactly once, not double-encoded.
        assert_eq!(blocks[0]["content"], "{\"text\":\"fn a() {}\"}");
    }

    #[test]
    fn unmatched_tool_result_is_rejected() {
        let conversation = vec![Message::ToolResult {
            call_id: "tc_ghost".to_string(),
            tool_name: "read_file".to_string(),
            payload: json!({}),
        }];
        let err = build_request("m", 1024, &conversation, &[]).unwrap_err();
        assert!(err.to_string().contains("tc_ghost"));
    }

    #[test]
    fn malformed_arguments_replay_unchanged() {
        let conversation = vec![Message::Assistant {
            content: None,
            tool_calls: vec![call("tc_1", "read_file", json!("not-an-object"))],
        }];
        let request = build_request("m", 1024, &conversation, &[]).unwrap();
        let wire = serde_json::to_value(&request).unwrap();
        assert_eq!(wire["messages"][0]["content"][0]["input"], "not-an-object");
    }

    #[test]
    fn response_text_blocks_concatenate_in_order() {
        let response: MessagesResponse = serde_json::from_value(json!({
            "content": [
                {"type": "text", "text": "first"},
                {"type": "text", "text": "second"},
            ]
        }))
        .unwrap();
        let turn = parse_response(response);
        assert_eq!(turn.text.as_deref(), Some("first\nsecond"));
        assert!(turn.tool_calls.is_empty());
    }

    #[test]
    fn response_tool_use_blocks_become_tool_calls() {
        let response: MessagesResponse = serde_json::from_value(json!({
            "content": [
                {"type": "text", "text": "cloning now"},
                {
                    "type": "tool_use",
                    "id": "toolu_01",
                    "name": "clone_repo",
                    "input": {"url": "https://github.com/acme/widgets", "branch": "main"}
                },
            ]
        }))
        .unwrap();
        let turn = parse_response(response);
        assert_eq!(turn.tool_calls.len(), 1);
        let call = &turn.tool_calls[0];
        assert_eq!(call.id, "toolu_01");
        assert_eq!(call.name, "clone_repo");
        match &call.arguments {
            ToolArguments::Object(map) => assert_eq!(map["branch"], "main"),
            other => panic!("expected decoded arguments, got {:?}", other),
        }
    }

    #[test]
    fn one_bad_tool_use_does_not_poison_the_rest() {
        let response: MessagesResponse = serde_json::from_value(json!({
            "content": [
                {"type": "tool_use", "id": "toolu_01", "name": "read_file", "input": 7},
                {
                    "type": "tool_use",
                    "id": "toolu_02",
                    "name": "find_files",
                    "input": {"workdir": "/tmp/w", "glob_pattern": "**/*.rs"}
                },
                {"type": "text", "text": "still talking"},
            ]
        }))
        .unwrap();
        let turn = parse_response(response);
        assert_eq!(turn.text.as_deref(), Some("still talking"));
        assert_eq!(turn.tool_calls.len(), 2);
        assert!(matches!(
            turn.tool_calls[0].arguments,
            ToolArguments::Malformed { .. }
        ));
        assert!(matches!(
            turn.tool_calls[1].arguments,
            ToolArguments::Object(_)
        ));
    }
}
