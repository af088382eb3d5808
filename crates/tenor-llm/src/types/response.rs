use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Assistant message within a normalized response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseMessage {
    /// Always `assistant`
    pub role: String,
    /// Text content, empty when the model only called tools
    pub content: String,
    /// Tool calls requested by the model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<serde_json::Value>>,
}

impl ResponseMessage {
    /// Create an assistant message
    pub fn assistant(content: String, tool_calls: Option<Vec<serde_json::Value>>) -> Self {
        Self {
            role: "assistant".to_owned(),
            content,
            tool_calls,
        }
    }
}

/// Normalized chat response, identical in shape for every provider
///
/// Usage and duration counters are zero when the provider does not report
/// them. The untouched provider reply is kept in `raw`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Generated message
    pub message: ResponseMessage,
    /// Model that produced the reply, empty if unreported
    pub model: String,
    /// Creation time reported by the provider, or the call time
    pub created_at: Timestamp,
    /// Whether generation finished
    pub done: bool,
    /// Provider-specific finish reason, empty if unreported
    pub done_reason: String,
    /// Completion tokens
    pub eval_count: u64,
    /// Prompt tokens
    pub prompt_eval_count: u64,
    /// Nanoseconds spent generating
    pub eval_duration: u64,
    /// Nanoseconds spent loading the model
    pub load_duration: u64,
    /// Nanoseconds spent on the prompt
    pub prompt_eval_duration: u64,
    /// Total nanoseconds
    pub total_duration: u64,
    /// Provider reply before normalization
    #[serde(skip)]
    pub raw: serde_json::Value,
}
