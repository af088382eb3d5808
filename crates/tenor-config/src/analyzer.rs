use serde::Deserialize;

/// Intention analyzer settings
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalyzerConfig {
    /// Replaces the built-in system prompt
    #[serde(default)]
    pub system_prompt: Option<String>,
}
