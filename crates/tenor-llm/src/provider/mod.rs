//! Supported providers and their adapters
//!
//! Each provider resolves its endpoint, builds its request body and
//! normalizes its reply. Dispatch is a closed `match` over [`Provider`].

use serde::Serialize;
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::convert::gemini::gemini_response_to_chat;
use crate::convert::ollama::ollama_response_to_chat;
use crate::convert::openai::{openai_request, openai_response_to_chat};
use crate::error::GatewayError;
use crate::protocol::gemini::GeminiRequest;
use crate::protocol::ollama::OllamaRequest;
use crate::types::ChatResponse;
use crate::validate::ValidatedRequest;

/// Default local Ollama chat endpoint
pub const OLLAMA_DEFAULT_URL: &str = "http://127.0.0.1:11434/api/chat";

/// Default `OpenAI` chat completions endpoint
pub const OPENAI_DEFAULT_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Default Gemini API base URL
pub const GEMINI_DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default Grok endpoint
pub const GROK_DEFAULT_URL: &str = "https://api.x.ai/v1/grok";

/// A supported chat-completion backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Provider {
    /// Ollama `/api/chat`
    Ollama,
    /// `OpenAI` chat completions
    #[strum(to_string = "openai")]
    OpenAi,
    /// Google Gemini `generateContent`
    Gemini,
    /// xAI Grok
    Grok,
}

impl Provider {
    /// Look up a provider by name, ignoring case
    pub fn from_name(name: &str) -> Option<Self> {
        name.to_lowercase().parse().ok()
    }

    /// Whether the API key travels as a bearer token
    ///
    /// Gemini carries its key in the endpoint URL instead.
    pub const fn uses_bearer_auth(self) -> bool {
        !matches!(self, Self::Gemini)
    }

    /// Resolve the endpoint for a request
    ///
    /// A custom URL is returned verbatim; otherwise the provider default is
    /// used.
    pub fn endpoint(self, req: &ValidatedRequest<'_>) -> String {
        if let Some(url) = req.custom_url {
            return url.to_owned();
        }

        match self {
            Self::Ollama => OLLAMA_DEFAULT_URL.to_owned(),
            Self::OpenAi => OPENAI_DEFAULT_URL.to_owned(),
            Self::Gemini => format!(
                "{GEMINI_DEFAULT_BASE_URL}/models/{}:generateContent?key={}",
                req.model_id, req.api_key
            ),
            Self::Grok => GROK_DEFAULT_URL.to_owned(),
        }
    }

    /// Build the provider request body
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Encode` if the body cannot be serialized.
    pub fn build_body(self, req: &ValidatedRequest<'_>) -> Result<serde_json::Value, GatewayError> {
        match self {
            Self::Ollama => encode(&OllamaRequest::from(req)),
            Self::OpenAi => encode(&openai_request(req, true)),
            Self::Gemini => encode(&GeminiRequest::from(req)),
            Self::Grok => encode(&openai_request(req, false)),
        }
    }

    /// Normalize a raw provider reply
    ///
    /// # Errors
    ///
    /// Returns `MalformedProviderResponse` if the reply lacks required fields.
    pub fn normalize(self, raw: serde_json::Value) -> Result<ChatResponse, GatewayError> {
        match self {
            Self::Ollama => ollama_response_to_chat(raw),
            Self::OpenAi | Self::Grok => openai_response_to_chat(self, raw),
            Self::Gemini => gemini_response_to_chat(raw),
        }
    }
}

fn encode(body: &impl Serialize) -> Result<serde_json::Value, GatewayError> {
    serde_json::to_value(body).map_err(GatewayError::Encode)
}
