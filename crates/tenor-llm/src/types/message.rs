use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Role of a message participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    /// System instruction
    System,
    /// User message
    User,
    /// Assistant response
    Assistant,
}

/// Message in a conversation
///
/// The role is kept as text so that requests deserialized from untrusted
/// input can carry an unknown role and be rejected by validation rather than
/// by the deserializer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Role of the message author
    pub role: String,
    /// Text content
    pub content: String,
    /// Tool calls attached to the message
    #[serde(default, alias = "tool_calls", skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<serde_json::Value>>,
}

impl Message {
    /// Create a message with the given role
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: content.into(),
            tool_calls: None,
        }
    }

    /// Create a system instruction
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Attach tool calls to this message
    #[must_use]
    pub fn with_tool_calls(mut self, tool_calls: Vec<serde_json::Value>) -> Self {
        self.tool_calls = Some(tool_calls);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_lowercase_only() {
        assert_eq!("assistant".parse::<Role>().unwrap(), Role::Assistant);
        assert!("Assistant".parse::<Role>().is_err());
        assert!("tool".parse::<Role>().is_err());
    }

    #[test]
    fn tool_calls_accept_both_spellings() {
        let camel: Message =
            serde_json::from_value(serde_json::json!({"role": "assistant", "content": "x", "toolCalls": [{}]})).unwrap();
        let snake: Message =
            serde_json::from_value(serde_json::json!({"role": "assistant", "content": "x", "tool_calls": [{}]})).unwrap();

        assert_eq!(camel, snake);
        assert_eq!(camel.tool_calls.map(|c| c.len()), Some(1));
    }
}
