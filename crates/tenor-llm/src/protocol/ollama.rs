//! Ollama `/api/chat` wire format types

use serde::{Deserialize, Serialize};

// -- Request types --

/// Ollama chat request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaRequest {
    /// Model name
    pub model: String,
    /// Conversation messages
    pub messages: Vec<OllamaMessage>,
    /// Whether to stream the response
    pub stream: bool,
    /// JSON schema the reply must follow
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<serde_json::Value>,
    /// Tool definitions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<serde_json::Value>>,
}

/// Ollama message within a request or response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaMessage {
    /// Message role
    #[serde(default)]
    pub role: String,
    /// Text content
    #[serde(default)]
    pub content: String,
    /// Tool calls
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<serde_json::Value>>,
}

// -- Response types --

/// Ollama non-streaming chat response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaResponse {
    /// Model that answered
    #[serde(default)]
    pub model: String,
    /// RFC 3339 creation time
    #[serde(default)]
    pub created_at: Option<String>,
    /// Generated message
    pub message: OllamaMessage,
    /// Whether generation finished
    #[serde(default)]
    pub done: bool,
    /// Why generation finished
    #[serde(default)]
    pub done_reason: Option<String>,
    /// Completion tokens
    #[serde(default)]
    pub eval_count: u64,
    /// Prompt tokens
    #[serde(default)]
    pub prompt_eval_count: u64,
    /// Nanoseconds spent generating
    #[serde(default)]
    pub eval_duration: u64,
    /// Nanoseconds spent loading the model
    #[serde(default)]
    pub load_duration: u64,
    /// Nanoseconds spent on the prompt
    #[serde(default)]
    pub prompt_eval_duration: u64,
    /// Total nanoseconds
    #[serde(default)]
    pub total_duration: u64,
}
