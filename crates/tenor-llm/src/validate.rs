//! Request validation
//!
//! Rules are checked in a fixed order and the first violation wins, so a
//! request missing both its key and its model always reports the key.

use secrecy::ExposeSecret;
use url::Url;

use crate::error::{GatewayError, MessageFault};
use crate::provider::Provider;
use crate::types::{Request, ResponseType, Role};

/// Requested reply format after validation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat<'a> {
    /// Plain text
    Text,
    /// JSON matching the schema
    Json(&'a serde_json::Value),
}

/// Message whose role has been checked
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedMessage<'a> {
    pub role: Role,
    pub content: &'a str,
    pub tool_calls: Option<&'a [serde_json::Value]>,
}

/// Borrowed, typed view of a request that passed validation
///
/// Adapters build endpoints and bodies from this view and never re-check
/// the invariants established here.
#[derive(Debug, Clone)]
pub struct ValidatedRequest<'a> {
    pub api_key: &'a str,
    pub model_id: &'a str,
    pub messages: Vec<ValidatedMessage<'a>>,
    pub output: Option<OutputFormat<'a>>,
    /// Endpoint override as supplied, `None` when absent or empty
    pub custom_url: Option<&'a str>,
    /// Tool descriptors, `None` when absent or empty
    pub tools: Option<&'a [serde_json::Value]>,
    pub stream: bool,
}

/// Validate a request without touching the network
///
/// # Errors
///
/// Returns the error for the first rule the request violates.
pub fn validate(request: &Request) -> Result<ValidatedRequest<'_>, GatewayError> {
    if Provider::from_name(&request.provider).is_none() {
        return Err(GatewayError::InvalidProvider {
            provider: request.provider.clone(),
        });
    }

    let api_key = request.api_key.expose_secret();
    if api_key.is_empty() {
        return Err(GatewayError::MissingCredential);
    }

    if request.model_id.is_empty() {
        return Err(GatewayError::MissingModel);
    }

    if request.messages.is_empty() {
        return Err(GatewayError::MissingMessages);
    }

    let messages = request
        .messages
        .iter()
        .enumerate()
        .map(|(index, message)| {
            let role = message
                .role
                .parse::<Role>()
                .map_err(|_| GatewayError::InvalidMessage {
                    index,
                    fault: MessageFault::InvalidRole(message.role.clone()),
                })?;

            if message.content.is_empty() {
                return Err(GatewayError::InvalidMessage {
                    index,
                    fault: MessageFault::MissingContent,
                });
            }

            Ok(ValidatedMessage {
                role,
                content: &message.content,
                tool_calls: message.tool_calls.as_deref(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let output = match request.response_type {
        None => None,
        Some(ResponseType::Text) => Some(OutputFormat::Text),
        Some(ResponseType::Json) => {
            let schema = request.response_schema.as_ref().ok_or(GatewayError::SchemaRequired)?;
            Some(OutputFormat::Json(schema))
        }
    };

    // An empty override means the provider default
    let custom_url = request.custom_url.as_deref().filter(|url| !url.is_empty());
    if let Some(url) = custom_url {
        Url::parse(url).map_err(|source| GatewayError::InvalidCustomUrl {
            url: url.to_owned(),
            source,
        })?;
    }

    Ok(ValidatedRequest {
        api_key,
        model_id: &request.model_id,
        messages,
        output,
        custom_url,
        tools: request.tools.as_deref().filter(|tools| !tools.is_empty()),
        stream: request.stream,
    })
}
