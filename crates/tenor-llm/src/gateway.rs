//! Entry point tying validation, adapters and transport together

use std::fmt;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::error::GatewayError;
use crate::provider::Provider;
use crate::transport::{HttpTransport, Transport};
use crate::types::{ChatResponse, Request};
use crate::validate::validate;

/// Dispatches normalized chat requests to providers
///
/// Holds no per-call state; clones share the underlying transport and may
/// be used concurrently.
#[derive(Clone)]
pub struct Gateway {
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for Gateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gateway").finish_non_exhaustive()
    }
}

impl Default for Gateway {
    fn default() -> Self {
        Self::new(HttpTransport::new())
    }
}

impl Gateway {
    /// Create a gateway over the given transport
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    /// Send a chat request and normalize the reply
    ///
    /// Every call performs exactly one transport call once validation
    /// passes; nothing is cached.
    ///
    /// # Errors
    ///
    /// Returns a validation error before any I/O, or the transport or
    /// normalization error of the provider call.
    pub async fn chat(&self, request: &Request) -> Result<ChatResponse, GatewayError> {
        let validated = validate(request)?;

        let Some(provider) = Provider::from_name(&request.provider) else {
            return Err(GatewayError::UnsupportedProvider(request.provider.clone()));
        };

        let url = provider.endpoint(&validated);
        let body = provider.build_body(&validated)?;

        tracing::debug!(
            %provider,
            model = %validated.model_id,
            messages = validated.messages.len(),
            custom_url = validated.custom_url.is_some(),
            "dispatching chat request"
        );

        let raw = self
            .transport
            .post(&url, validated.api_key, &body, provider)
            .await?;

        let response = provider.normalize(raw)?;

        tracing::debug!(
            %provider,
            model = %response.model,
            done_reason = %response.done_reason,
            eval_count = response.eval_count,
            "chat request completed"
        );

        Ok(response)
    }

    /// Like [`Gateway::chat`], abandoning the call when `cancel` fires
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Cancelled` if the token fires first, otherwise
    /// whatever [`Gateway::chat`] returns.
    pub async fn chat_with_cancel(
        &self,
        request: &Request,
        cancel: &CancellationToken,
    ) -> Result<ChatResponse, GatewayError> {
        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(GatewayError::Cancelled),
            result = self.chat(request) => result,
        }
    }
}
