//! Configuration helpers for integration tests

use tenor_config::Config;

/// Build a validated configuration for `provider` pointed at `base_url`
pub fn provider_config(provider: &str, model: &str, base_url: &str) -> Config {
    Config::parse(&format!(
        r#"
[provider]
name = "{provider}"
model = "{model}"
api_key = "test-key"
base_url = "{base_url}"

[http]
timeout = "5s"
"#
    ))
    .expect("valid test config")
}
