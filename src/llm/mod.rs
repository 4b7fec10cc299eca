//! LLM integration: the conversation model and the provider client seam.
//!
//! The types here are provider-agnostic. Everything that knows the
//! Anthropic wire format lives in the [`AnthropicClient`]; the agent loop
//! only ever sees [`Message`], [`AssistantTurn`], and the [`LlmClient`]
//! trait.

mod anthropic;

pub use anthropic::AnthropicClient;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};

/// One message in the conversation the agent grows across steps.
///
/// Modeled as a sum type so that only the assistant variant can carry tool
/// calls and only the tool-result variant a correlation id: a well-formed
/// conversation cannot attach a result to anything but a prior assistant
/// tool call.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Instructions for the model, sent out-of-band of the dialogue.
    System { content: String },
    /// Text from the side driving the agent.
    User { content: String },
    /// A model turn: optional text plus zero or more tool calls. An empty
    /// tool-call list is the terminal signal.
    Assistant {
        content: Option<String>,
        tool_calls: Vec<ToolCall>,
    },
    /// The result of one executed tool call, correlated by `call_id`.
    ToolResult {
        call_id: String,
        tool_name: String,
        payload: Value,
    },
}

/// A provider-issued request to invoke one named tool.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCall {
    /// Provider-assigned identifier. Opaque; only ever echoed back.
    pub id: String,
    pub name: String,
    pub arguments: ToolArguments,
}

/// Tool-call arguments, normalized to a JSON object where possible.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolArguments {
    /// Arguments decoded to structured key/value data.
    Object(Map<String, Value>),
    /// Arguments that could not be decoded. The raw value is kept so the
    /// call still replays to the provider unchanged.
    Malformed { raw: Value, error: String },
}

impl ToolArguments {
    /// Normalize whatever argument encoding the provider used.
    ///
    /// Accepts a native JSON object, or a JSON string that itself parses to
    /// an object. Anything else is a decode fault isolated to this one
    /// call; the rest of the response is unaffected.
    pub fn from_raw(raw: Value) -> Self {
        match raw {
            Value::Object(map) => Self::Object(map),
            Value::String(encoded) => match serde_json::from_str::<Value>(&encoded) {
                Ok(Value::Object(map)) => Self::Object(map),
                Ok(_) => Self::Malformed {
                    raw: Value::String(encoded),
                    error: "argument string does not encode a JSON object".to_string(),
                },
                Err(e) => Self::Malformed {
                    raw: Value::String(encoded),
                    error: format!("argument string is not valid JSON: {}", e),
                },
            },
            other => {
                let error = format!("expected a JSON object, got: {}", other);
                Self::Malformed { raw: other, error }
            }
        }
    }

    /// The value as originally received, for lossless outbound replay.
    pub fn to_raw(&self) -> Value {
        match self {
            Self::Object(map) => Value::Object(map.clone()),
            Self::Malformed { raw, .. } => raw.clone(),
        }
    }
}

/// A parsed provider response: assistant text and requested tool calls.
#[derive(Debug, Clone, Default)]
pub struct AssistantTurn {
    pub text: Option<String>,
    pub tool_calls: Vec<ToolCall>,
}

/// Declaration of one tool as advertised to the provider.
#[derive(Debug, Clone, Serialize)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// Client seam for the LLM provider.
///
/// One call is one provider round-trip over the full conversation. This is
/// the only interface the agent loop depends on, and the seam tests stub
/// with scripted turns.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(
        &self,
        conversation: &[Message],
        tools: &[ToolSchema],
    ) -> anyhow::Result<AssistantTurn>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn arguments_accept_native_object() {
        let args = ToolArguments::from_raw(json!({"path": "README.md"}));
        match args {
            ToolArguments::Object(map) => assert_eq!(map["path"], "README.md"),
            other => panic!("expected decoded object, got {:?}", other),
        }
    }

    #[test]
    fn arguments_accept_string_encoded_object() {
        let args = ToolArguments::from_raw(json!("{\"workdir\": \"/tmp/x\"}"));
        match args {
            ToolArguments::Object(map) => assert_eq!(map["workdir"], "/tmp/x"),
            other => panic!("expected decoded object, got {:?}", other),
        }
    }

    #[test]
    fn non_object_arguments_are_a_decode_fault() {
        let args = ToolArguments::from_raw(json!([1, 2, 3]));
        match args {
            ToolArguments::Malformed { raw, error } => {
                assert_eq!(raw, json!([1, 2, 3]));
                assert!(error.contains("expected a JSON object"));
            }
            other => panic!("expected decode fault, got {:?}", other),
        }
    }

    #[test]
    fn undecodable_string_arguments_keep_the_raw_value() {
        let args = ToolArguments::from_raw(json!("not json at all"));
        match args {
            ToolArguments::Malformed { raw, .. } => assert_eq!(raw, json!("not json at all")),
            other => panic!("expected decode fault, got {:?}", other),
        }
    }

    #[test]
    fn to_raw_round_trips_both_variants() {
        let object = ToolArguments::from_raw(json!({"a": 1}));
        assert_eq!(object.to_raw(), json!({"a": 1}));
        let malformed = ToolArguments::from_raw(json!(42));
        assert_eq!(malformed.to_raw(), json!(42));
    }
}
