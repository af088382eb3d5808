//! Conversion between internal types and the Ollama chat format

use serde::Deserialize;

use super::timestamp_or_now;
use crate::error::GatewayError;
use crate::protocol::ollama::{OllamaMessage, OllamaRequest, OllamaResponse};
use crate::provider::Provider;
use crate::types::{ChatResponse, ResponseMessage};
use crate::validate::{OutputFormat, ValidatedRequest};

// -- Outbound --

impl From<&ValidatedRequest<'_>> for OllamaRequest {
    fn from(req: &ValidatedRequest<'_>) -> Self {
        let format = match req.output {
            Some(OutputFormat::Json(schema)) => Some(schema.clone()),
            Some(OutputFormat::Text) | None => None,
        };

        let messages = req
            .messages
            .iter()
            .map(|msg| OllamaMessage {
                role: msg.role.to_string(),
                content: msg.content.to_owned(),
                tool_calls: msg.tool_calls.map(<[_]>::to_vec),
            })
            .collect();

        Self {
            model: req.model_id.to_owned(),
            messages,
            // Structured output is only honoured on a single JSON reply
            stream: req.stream && format.is_none(),
            format,
            tools: req.tools.map(<[_]>::to_vec),
        }
    }
}

// -- Inbound --

/// Normalize an Ollama chat reply
///
/// # Errors
///
/// Returns `MalformedProviderResponse` if the reply has no `message`.
pub fn ollama_response_to_chat(raw: serde_json::Value) -> Result<ChatResponse, GatewayError> {
    let wire = OllamaResponse::deserialize(&raw).map_err(|e| GatewayError::malformed(Provider::Ollama, e.to_string()))?;

    Ok(ChatResponse {
        message: ResponseMessage::assistant(wire.message.content, wire.message.tool_calls),
        model: wire.model,
        created_at: timestamp_or_now(wire.created_at.as_deref()),
        done: wire.done,
        done_reason: wire.done_reason.unwrap_or_default(),
        eval_count: wire.eval_count,
        prompt_eval_count: wire.prompt_eval_count,
        eval_duration: wire.eval_duration,
        load_duration: wire.load_duration,
        prompt_eval_duration: wire.prompt_eval_duration,
        total_duration: wire.total_duration,
        raw,
    })
}
