use secrecy::SecretString;
use serde::{Deserialize, Deserializer};

/// Provider selection and credentials
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// Provider name (`ollama`, `openai`, `gemini` or `grok`)
    pub name: String,
    /// Model identifier passed to the provider
    pub model: String,
    /// API key
    pub api_key: SecretString,
    /// Endpoint override, used verbatim; blank means the provider default
    #[serde(default, deserialize_with = "blank_as_none")]
    pub base_url: Option<String>,
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|url| !url.trim().is_empty()))
}
