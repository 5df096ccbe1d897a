//! Batch request and response records
//!
//! [`BatchRequestRecord`] is one line of a chat-completion batch input file.
//! [`ExtractedRow`] is the flattened form of one batch response line.

use super::ids::CustomId;
use serde::{Deserialize, Serialize};

/// HTTP method carried by every batch request line
pub const REQUEST_METHOD: &str = "POST";

/// Endpoint every batch request line targets
pub const CHAT_COMPLETIONS_URL: &str = "/v1/chat/completions";

/// Chat message author role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// A single chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Chat-completion request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    pub max_tokens: u32,
}

/// One line of a batch request file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRequestRecord {
    pub custom_id: CustomId,
    pub method: String,
    pub url: String,
    pub body: RequestBody,
}

impl BatchRequestRecord {
    /// Builds the request for one table row: a system prompt followed by the
    /// row's content as the user message.
    pub fn chat(
        custom_id: CustomId,
        model: &str,
        system_prompt: &str,
        user_content: impl Into<String>,
        max_tokens: u32,
        temperature: Option<f64>,
    ) -> Self {
        Self {
            custom_id,
            method: REQUEST_METHOD.to_string(),
            url: CHAT_COMPLETIONS_URL.to_string(),
            body: RequestBody {
                model: model.to_string(),
                messages: vec![
                    ChatMessage::system(system_prompt),
                    ChatMessage::user(user_content),
                ],
                temperature,
                max_tokens,
            },
        }
    }
}

/// One row of the extracted CSV
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedRow {
    pub custom_id: CustomId,
    pub content: String,
}

impl ExtractedRow {
    pub fn new(custom_id: CustomId, content: impl Into<String>) -> Self {
        Self {
            custom_id,
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chat_record_serialization() {
        let record = BatchRequestRecord::chat(
            CustomId::for_row(0),
            "gpt-4",
            "translate",
            "hello",
            50,
            Some(1.0),
        );

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "custom_id": "request-1",
                "method": "POST",
                "url": "/v1/chat/completions",
                "body": {
                    "model": "gpt-4",
                    "messages": [
                        {"role": "system", "content": "translate"},
                        {"role": "user", "content": "hello"}
                    ],
                    "temperature": 1.0,
                    "max_tokens": 50
                }
            })
        );
    }

    #[test]
    fn test_temperature_omitted_when_absent() {
        let record =
            BatchRequestRecord::chat(CustomId::for_row(0), "m", "p", "c", 10, None);
        let line = serde_json::to_string(&record).unwrap();
        assert!(!line.contains("temperature"));
    }

    #[test]
    fn test_field_order_is_stable() {
        let record =
            BatchRequestRecord::chat(CustomId::for_row(0), "m", "p", "c", 10, Some(0.5));
        let line = serde_json::to_string(&record).unwrap();
        let custom = line.find("custom_id").unwrap();
        let method = line.find("\"method\"").unwrap();
        let url = line.find("\"url\"").unwrap();
        let body = line.find("\"body\"").unwrap();
        assert!(custom < method && method < url && url < body);
    }
}
