//! Configuration for the tenor gateway and its command-line front end
//!
//! Loaded from a TOML file whose values may reference the environment with
//! `{{ env.VAR }}` placeholders.

#![allow(clippy::must_use_candidate)]

pub mod analyzer;
mod env;
pub mod http;
mod loader;
pub mod provider;
pub mod telemetry;

use serde::Deserialize;

pub use analyzer::AnalyzerConfig;
pub use http::HttpConfig;
pub use provider::ProviderConfig;
pub use telemetry::{LogFormat, TelemetryConfig};

/// Top-level tenor configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Provider the gateway talks to
    pub provider: ProviderConfig,
    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,
    /// Intention analyzer settings
    #[serde(default)]
    pub analyzer: AnalyzerConfig,
    /// Logging settings
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}
