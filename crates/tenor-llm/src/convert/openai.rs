//! Conversion between internal types and the `OpenAI` chat completion format
//!
//! Grok uses the same wire format without structured output.

use jiff::Timestamp;
use serde::Deserialize;

use crate::error::GatewayError;
use crate::protocol::openai::{OpenAiJsonSchema, OpenAiMessage, OpenAiRequest, OpenAiResponse, OpenAiResponseFormat};
use crate::provider::Provider;
use crate::types::{ChatResponse, ResponseMessage};
use crate::validate::{OutputFormat, ValidatedRequest};

/// Name attached to forwarded structured-output schemas
const SCHEMA_NAME: &str = "response";

// -- Outbound --

/// Build a chat completion request
///
/// With `structured_output` set, a JSON schema request is forwarded as a
/// `json_schema` response format; otherwise the schema is not sent.
pub fn openai_request(req: &ValidatedRequest<'_>, structured_output: bool) -> OpenAiRequest {
    let response_format = match req.output {
        Some(OutputFormat::Json(schema)) if structured_output => Some(OpenAiResponseFormat::JsonSchema {
            json_schema: OpenAiJsonSchema {
                name: SCHEMA_NAME.to_owned(),
                schema: schema.clone(),
                strict: false,
            },
        }),
        _ => None,
    };

    let messages = req
        .messages
        .iter()
        .map(|msg| OpenAiMessage {
            role: msg.role.to_string(),
            content: Some(msg.content.to_owned()),
            tool_calls: msg.tool_calls.map(<[_]>::to_vec),
        })
        .collect();

    OpenAiRequest {
        model: req.model_id.to_owned(),
        messages,
        stream: req.stream,
        response_format,
        tools: req.tools.map(<[_]>::to_vec),
    }
}

// -- Inbound --

/// Normalize a chat completion reply from `provider`
///
/// # Errors
///
/// Returns `MalformedProviderResponse` if the reply has no first choice
/// with a message.
pub fn openai_response_to_chat(provider: Provider, raw: serde_json::Value) -> Result<ChatResponse, GatewayError> {
    let wire = OpenAiResponse::deserialize(&raw).map_err(|e| GatewayError::malformed(provider, e.to_string()))?;

    let usage = wire.usage.unwrap_or_default();
    let Some(choice) = wire.choices.into_iter().next() else {
        return Err(GatewayError::malformed(provider, "missing choices[0]"));
    };
    let message = choice
        .message
        .ok_or_else(|| GatewayError::malformed(provider, "missing choices[0].message"))?;

    let created_at = wire
        .created
        .and_then(|secs| Timestamp::from_second(secs).ok())
        .unwrap_or_else(Timestamp::now);

    Ok(ChatResponse {
        message: ResponseMessage::assistant(message.content.unwrap_or_default(), message.tool_calls),
        model: wire.model,
        created_at,
        done: true,
        done_reason: choice.finish_reason.unwrap_or_default(),
        eval_count: usage.completion_tokens,
        prompt_eval_count: usage.prompt_tokens,
        eval_duration: 0,
        load_duration: 0,
        prompt_eval_duration: 0,
        total_duration: 0,
        raw,
    })
}
