//! HTTP transport shared by all providers

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};

use crate::error::GatewayError;
use crate::provider::Provider;

/// Sends one JSON POST and returns the JSON reply
#[async_trait]
pub trait Transport: Send + Sync {
    /// Post `body` to `url`, authenticating as `provider` expects
    async fn post(
        &self,
        url: &str,
        api_key: &str,
        body: &serde_json::Value,
        provider: Provider,
    ) -> Result<serde_json::Value, GatewayError>;
}

/// `reqwest`-backed transport
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport with default client settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport whose requests fail after `timeout`
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Transport` if the client cannot be built.
    pub fn with_timeout(timeout: Duration) -> Result<Self, GatewayError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(
        &self,
        url: &str,
        api_key: &str,
        body: &serde_json::Value,
        provider: Provider,
    ) -> Result<serde_json::Value, GatewayError> {
        let mut builder = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(body);

        if provider.uses_bearer_auth() {
            builder = builder.bearer_auth(api_key);
        }

        // The URL may carry the API key, so it is stripped from every error
        let response = builder.send().await.map_err(|e| {
            let e = e.without_url();
            tracing::error!(%provider, error = %e, "upstream request failed");
            GatewayError::Transport(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%provider, status = %status, "upstream returned error");
            return Err(GatewayError::ProviderHttpError {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| GatewayError::Transport(e.without_url()))?;
        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::warn!(%provider, error = %e, "upstream returned non-JSON body");
            GatewayError::InvalidJsonResponse(e)
        })
    }
}
