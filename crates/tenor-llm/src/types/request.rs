use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use super::message::Message;

/// Requested shape of the model's reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseType {
    /// Free-form text
    Text,
    /// JSON constrained by `Request::response_schema`
    Json,
}

/// Normalized chat request accepted by the gateway
///
/// Fields mirror what a caller assembles from configuration; nothing here is
/// checked until [`crate::validate::validate`] runs.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// Provider name, matched case-insensitively
    pub provider: String,
    /// Credential sent as a bearer token, or in the URL for gemini
    pub api_key: SecretString,
    /// Provider-specific model identifier
    pub model_id: String,
    /// Ordered conversation
    #[serde(default)]
    pub messages: Vec<Message>,
    /// Requested reply format
    #[serde(default)]
    pub response_type: Option<ResponseType>,
    /// Structured-output schema, required when `response_type` is JSON
    #[serde(default)]
    pub response_schema: Option<serde_json::Value>,
    /// Absolute URL replacing the provider's default endpoint
    #[serde(default)]
    pub custom_url: Option<String>,
    /// Tool descriptors forwarded verbatim
    #[serde(default)]
    pub tools: Option<Vec<serde_json::Value>>,
    /// Ask the provider to stream (the reply is still read as one JSON body)
    #[serde(default)]
    pub stream: bool,
}

impl Request {
    /// Start a request for the given provider, credential and model
    pub fn new(provider: impl Into<String>, api_key: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            api_key: SecretString::from(api_key.into()),
            model_id: model_id.into(),
            messages: Vec::new(),
            response_type: None,
            response_schema: None,
            custom_url: None,
            tools: None,
            stream: false,
        }
    }

    /// Append a message
    #[must_use]
    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Replace the conversation
    #[must_use]
    pub fn messages(mut self, messages: Vec<Message>) -> Self {
        self.messages = messages;
        self
    }

    /// Ask for a plain text reply
    #[must_use]
    pub fn text(mut self) -> Self {
        self.response_type = Some(ResponseType::Text);
        self
    }

    /// Ask for a JSON reply matching `schema`
    #[must_use]
    pub fn json_schema(mut self, schema: serde_json::Value) -> Self {
        self.response_type = Some(ResponseType::Json);
        self.response_schema = Some(schema);
        self
    }

    /// Override the provider endpoint
    #[must_use]
    pub fn custom_url(mut self, url: impl Into<String>) -> Self {
        self.custom_url = Some(url.into());
        self
    }

    /// Forward tool descriptors to the provider
    #[must_use]
    pub fn tools(mut self, tools: Vec<serde_json::Value>) -> Self {
        self.tools = Some(tools);
        self
    }

    /// Set the provider stream flag
    #[must_use]
    pub const fn stream(mut self, stream: bool) -> Self {
        self.stream = stream;
        self
    }
}
