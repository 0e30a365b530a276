//! Chat Completions wire types, shared by the OpenAI and OpenRouter adapters.
//!
//! Both services accept the same request body on `/chat/completions` and
//! nest the completion text under `choices[0].message.content`.

use serde::Serialize;
use serde_json::Value;

use crate::inference::prompt::SYSTEM_INSTRUCTION;
use crate::inference::provider::text_at;

/// Role in a chat message (OpenAI terminology)
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Role {
    System,
    User,
}

#[derive(Serialize, Debug, Clone)]
pub(crate) struct ChatMessage<'a> {
    pub role: Role,
    pub content: &'a str,
}

/// Native "respond as JSON" hint.
#[derive(Serialize, Debug)]
pub(crate) struct ResponseFormat {
    #[serde(rename = "type")]
    pub format_type: &'static str, // always "json_object"
}

/// The request body for the Chat Completions API
#[derive(Serialize, Debug)]
pub(crate) struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

impl<'a> ChatRequest<'a> {
    /// Pairs the fixed instruction (as the system message) with the user's text.
    pub fn new(model: &'a str, text: &'a str, json_mode: bool) -> Self {
        Self {
            model,
            messages: vec![
                ChatMessage {
                    role: Role::System,
                    content: SYSTEM_INSTRUCTION,
                },
                ChatMessage {
                    role: Role::User,
                    content: text,
                },
            ],
            response_format: json_mode.then_some(ResponseFormat {
                format_type: "json_object",
            }),
        }
    }
}

/// `choices[0].message.content`
pub(crate) fn choice_content(reply: &Value) -> Option<&str> {
    text_at(reply, "/choices/0/message/content")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chat_request_without_json_hint() {
        let request = ChatRequest::new("test-model", "hello", false);
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["model"], "test-model");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][0]["content"], SYSTEM_INSTRUCTION);
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "hello");
        assert!(json.get("response_format").is_none());
    }

    #[test]
    fn test_chat_request_with_json_hint() {
        let request = ChatRequest::new("test-model", "hello", true);
        let serialized = serde_json::to_string(&request).unwrap();
        assert!(serialized.ends_with(r#""response_format":{"type":"json_object"}}"#));
    }

    #[test]
    fn test_choice_content() {
        let reply = json!({
            "id": "chatcmpl-1",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": "{\"claim\":\"x\"}"}}]
        });
        assert_eq!(choice_content(&reply), Some("{\"claim\":\"x\"}"));
    }

    #[test]
    fn test_choice_content_missing() {
        assert_eq!(choice_content(&json!({"choices": []})), None);
        assert_eq!(
            choice_content(&json!({"choices": [{"message": {"content": null}}]})),
            None
        );
        assert_eq!(choice_content(&Value::Null), None);
    }
}
