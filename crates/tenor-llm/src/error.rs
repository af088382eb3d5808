use thiserror::Error;

use crate::provider::Provider;

/// Why a single message was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageFault {
    /// Role is not one of `system`, `user`, `assistant`
    #[error("invalid message role {0:?}")]
    InvalidRole(String),
    /// Content is empty
    #[error("message content is required")]
    MissingContent,
}

/// Errors that can occur while dispatching a chat request
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Provider name is missing or not one of the supported providers
    #[error("invalid or unsupported provider: {provider:?}")]
    InvalidProvider { provider: String },

    /// No API key was supplied
    #[error("API key is required")]
    MissingCredential,

    /// No model identifier was supplied
    #[error("model ID is required")]
    MissingModel,

    /// The conversation is empty
    #[error("at least one message is required")]
    MissingMessages,

    /// A message failed validation
    #[error("invalid message at index {index}: {fault}")]
    InvalidMessage { index: usize, fault: MessageFault },

    /// JSON output was requested without a schema
    #[error("response schema required for JSON response type")]
    SchemaRequired,

    /// The endpoint override is not an absolute URL
    #[error("invalid custom URL {url:?}: {source}")]
    InvalidCustomUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Provider answered with a non-success status
    #[error("provider error: {status} - {body}")]
    ProviderHttpError { status: u16, body: String },

    /// Provider answered 2xx with a body that is not JSON
    #[error("invalid JSON in provider response: {0}")]
    InvalidJsonResponse(#[source] serde_json::Error),

    /// Provider JSON lacks the fields needed to build a response
    #[error("malformed {provider} response: {reason}")]
    MalformedProviderResponse { provider: Provider, reason: String },

    /// Provider name matched no adapter
    #[error("unsupported provider: {0}")]
    UnsupportedProvider(String),

    /// Request body could not be encoded
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// Connection-level failure talking to the provider
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The caller cancelled the request before it completed
    #[error("request cancelled")]
    Cancelled,
}

impl GatewayError {
    /// Whether the error was raised by request validation, before any I/O
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidProvider { .. }
                | Self::MissingCredential
                | Self::MissingModel
                | Self::MissingMessages
                | Self::InvalidMessage { .. }
                | Self::SchemaRequired
                | Self::InvalidCustomUrl { .. }
        )
    }

    /// Machine-readable error code
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::InvalidProvider { .. } => "invalid_provider",
            Self::MissingCredential => "missing_credential",
            Self::MissingModel => "missing_model",
            Self::MissingMessages => "missing_messages",
            Self::InvalidMessage { .. } => "invalid_message",
            Self::SchemaRequired => "schema_required",
            Self::InvalidCustomUrl { .. } => "invalid_custom_url",
            Self::ProviderHttpError { .. } => "provider_http_error",
            Self::InvalidJsonResponse(_) => "invalid_json_response",
            Self::MalformedProviderResponse { .. } => "malformed_provider_response",
            Self::UnsupportedProvider(_) => "unsupported_provider",
            Self::Encode(_) => "encode_error",
            Self::Transport(_) => "transport_error",
            Self::Cancelled => "cancelled",
        }
    }

    pub(crate) fn malformed(provider: Provider, reason: impl Into<String>) -> Self {
        Self::MalformedProviderResponse {
            provider,
            reason: reason.into(),
        }
    }
}
