use std::time::Duration;

use serde::Deserialize;

/// Outbound HTTP client settings
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpConfig {
    /// Request timeout (e.g. "30s", "2m")
    #[serde(default = "default_timeout")]
    pub timeout: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
        }
    }
}

impl HttpConfig {
    /// Parse the configured timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout is not a valid duration
    pub fn timeout_duration(&self) -> anyhow::Result<Duration> {
        duration_str::parse(&self.timeout)
            .map_err(|e| anyhow::anyhow!("invalid http.timeout '{}': {e}", self.timeout))
    }
}

fn default_timeout() -> String {
    "60s".to_string()
}
