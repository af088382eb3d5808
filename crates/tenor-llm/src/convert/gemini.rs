//! Conversion between internal types and the Gemini `generateContent` format

use jiff::Timestamp;
use serde::Deserialize;

use crate::error::GatewayError;
use crate::protocol::gemini::{GeminiContent, GeminiGenerationConfig, GeminiPart, GeminiRequest, GeminiResponse};
use crate::provider::Provider;
use crate::types::{ChatResponse, ResponseMessage, Role};
use crate::validate::{OutputFormat, ValidatedRequest};

const MIME_JSON: &str = "application/json";
const MIME_TEXT: &str = "text/plain";

// -- Outbound --

impl From<&ValidatedRequest<'_>> for GeminiRequest {
    fn from(req: &ValidatedRequest<'_>) -> Self {
        let contents = req
            .messages
            .iter()
            .filter_map(|msg| {
                let role = match msg.role {
                    Role::System => return None,
                    Role::User => "user",
                    Role::Assistant => "model",
                };
                Some(GeminiContent {
                    role: Some(role.to_owned()),
                    parts: vec![GeminiPart::text(msg.content)],
                })
            })
            .collect();

        // Only the first system message is used
        let system_instruction = req
            .messages
            .iter()
            .find(|msg| msg.role == Role::System)
            .map(|msg| GeminiContent {
                role: None,
                parts: vec![GeminiPart::text(msg.content)],
            });

        let generation_config = req.output.map(|output| match output {
            OutputFormat::Json(schema) => GeminiGenerationConfig {
                response_mime_type: MIME_JSON.to_owned(),
                response_schema: Some(schema.clone()),
            },
            OutputFormat::Text => GeminiGenerationConfig {
                response_mime_type: MIME_TEXT.to_owned(),
                response_schema: None,
            },
        });

        Self {
            contents,
            system_instruction,
            tools: req.tools.map(<[_]>::to_vec),
            generation_config,
        }
    }
}

// -- Inbound --

/// Normalize a `generateContent` reply
///
/// Only the first part of the first candidate is read. `created_at` is the
/// time of normalization since Gemini does not report one.
///
/// # Errors
///
/// Returns `MalformedProviderResponse` if `candidates[0].content.parts[0].text`
/// is absent or empty.
pub fn gemini_response_to_chat(raw: serde_json::Value) -> Result<ChatResponse, GatewayError> {
    let wire = GeminiResponse::deserialize(&raw).map_err(|e| GatewayError::malformed(Provider::Gemini, e.to_string()))?;

    let candidate = wire.candidates.into_iter().next();
    let finish_reason = candidate.as_ref().and_then(|c| c.finish_reason.clone());
    let text = candidate
        .and_then(|c| c.content)
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text)
        .filter(|text| !text.is_empty())
        .ok_or_else(|| GatewayError::malformed(Provider::Gemini, "missing candidates[0].content.parts[0].text"))?;

    let (eval_count, prompt_eval_count) = wire
        .usage_metadata
        .map_or((0, 0), |usage| (usage.candidates_token_count, usage.prompt_token_count));

    Ok(ChatResponse {
        message: ResponseMessage::assistant(text, None),
        model: wire.model_version.unwrap_or_default(),
        created_at: Timestamp::now(),
        done: true,
        done_reason: finish_reason.unwrap_or_default(),
        eval_count,
        prompt_eval_count,
        eval_duration: 0,
        load_duration: 0,
        prompt_eval_duration: 0,
        total_duration: 0,
        raw,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::types::{Message, Request};
    use crate::validate::validate;

    fn body(request: &Request) -> serde_json::Value {
        let validated = validate(request).unwrap();
        serde_json::to_value(GeminiRequest::from(&validated)).unwrap()
    }

    #[test]
    fn system_message_becomes_instruction() {
        let request = Request::new("gemini", "key", "gemini-1.5-flash").messages(vec![
            Message::system("S"),
            Message::user("U"),
            Message::assistant("A"),
        ]);

        let body = body(&request);
        assert_eq!(
            body["contents"],
            json!([
                {"role": "user", "parts": [{"text": "U"}]},
                {"role": "model", "parts": [{"text": "A"}]}
            ])
        );
        assert_eq!(body["systemInstruction"], json!({"parts": [{"text": "S"}]}));
    }

    #[test]
    fn no_system_message_means_no_instruction() {
        let request = Request::new("gemini", "key", "gemini-1.5-flash").message(Message::user("U"));

        let body = body(&request);
        assert!(body.get("systemInstruction").is_none());
        assert!(body.get("generationConfig").is_none());
        assert!(body.get("tools").is_none());
    }

    #[test]
    fn only_first_system_message_is_used() {
        let request = Request::new("gemini", "key", "gemini-1.5-flash").messages(vec![
            Message::system("first"),
            Message::system("second"),
            Message::user("U"),
        ]);

        assert_eq!(body(&request)["systemInstruction"]["parts"], json!([{"text": "first"}]));
    }

    #[test]
    fn json_output_sets_generation_config() {
        let schema = json!({"type": "object", "properties": {"reason": {"type": "string"}}});
        let request = Request::new("gemini", "key", "gemini-1.5-flash")
            .message(Message::user("U"))
            .json_schema(schema.clone());

        assert_eq!(
            body(&request)["generationConfig"],
            json!({"responseMimeType": "application/json", "responseSchema": schema})
        );
    }

    #[test]
    fn text_output_sets_plain_mime_type() {
        let request = Request::new("gemini", "key", "gemini-1.5-flash")
            .message(Message::user("U"))
            .text();

        assert_eq!(body(&request)["generationConfig"], json!({"responseMimeType": "text/plain"}));
    }

    #[test]
    fn normalizes_reply() {
        let raw = json!({
            "candidates": [{"content": {"parts": [{"text": "hi"}]}, "finishReason": "STOP"}],
            "usageMetadata": {"candidatesTokenCount": 3, "promptTokenCount": 5},
            "modelVersion": "g-1"
        });

        let response = gemini_response_to_chat(raw).unwrap();
        assert_eq!(response.message, ResponseMessage::assistant("hi".to_owned(), None));
        assert_eq!(response.done_reason, "STOP");
        assert_eq!(response.eval_count, 3);
        assert_eq!(response.prompt_eval_count, 5);
        assert_eq!(response.model, "g-1");
        assert!(response.done);
        assert_eq!(response.eval_duration, 0);
        assert_eq!(response.load_duration, 0);
        assert_eq!(response.prompt_eval_duration, 0);
        assert_eq!(response.total_duration, 0);
    }

    #[test]
    fn missing_usage_is_zero() {
        let raw = json!({
            "candidates": [{"content": {"parts": [{"text": "hi"}]}, "finishReason": "STOP"}]
        });

        let response = gemini_response_to_chat(raw).unwrap();
        assert_eq!(response.eval_count, 0);
        assert_eq!(response.prompt_eval_count, 0);
        assert_eq!(response.model, "");
    }

    #[test]
    fn missing_text_is_malformed() {
        for raw in [
            json!({}),
            json!({"candidates": []}),
            json!({"candidates": [{"finishReason": "SAFETY"}]}),
            json!({"candidates": [{"content": {"parts": []}}]}),
            json!({"candidates": [{"content": {"parts": [{"functionCall": {"name": "f"}}]}}]}),
        ] {
            let err = gemini_response_to_chat(raw.clone()).unwrap_err();
            assert!(
                matches!(
                    err,
                    GatewayError::MalformedProviderResponse {
                        provider: Provider::Gemini,
                        ..
                    }
                ),
                "{raw}"
            );
        }
    }
}
