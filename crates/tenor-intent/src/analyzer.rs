use std::sync::LazyLock;

use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use tenor_config::Config;
use tenor_llm::{Gateway, Message, Request};

use crate::error::AnalyzeError;
use crate::schema::{SYSTEM_PROMPT, intent_schema};
use crate::types::{AnalyzeReply, AnalyzeRequest, Analysis};

static LOWER_UPPER: LazyLock<Regex> = LazyLock::new(|| Regex::new("([a-z])([A-Z])").expect("must be valid regex"));
static ACRONYM_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("([A-Z])([A-Z][a-z])").expect("must be valid regex"));

/// Provider settings used for every analysis
#[derive(Debug, Clone)]
pub struct AnalyzerSettings {
    pub provider: String,
    pub model: String,
    pub api_key: SecretString,
    pub base_url: Option<String>,
    pub system_prompt: String,
}

impl AnalyzerSettings {
    /// Take provider and prompt settings from loaded configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            provider: config.provider.name.clone(),
            model: config.provider.model.clone(),
            api_key: config.provider.api_key.clone(),
            base_url: config.provider.base_url.clone(),
            system_prompt: config
                .analyzer
                .system_prompt
                .clone()
                .unwrap_or_else(|| SYSTEM_PROMPT.to_owned()),
        }
    }
}

/// Classifies posts through the gateway
#[derive(Debug, Clone)]
pub struct Analyzer {
    gateway: Gateway,
    settings: AnalyzerSettings,
}

impl Analyzer {
    pub const fn new(gateway: Gateway, settings: AnalyzerSettings) -> Self {
        Self { gateway, settings }
    }

    fn request(&self, text: &str) -> Request {
        let settings = &self.settings;

        let mut request = Request::new(
            settings.provider.as_str(),
            settings.api_key.expose_secret(),
            settings.model.as_str(),
        )
        .messages(vec![Message::system(settings.system_prompt.as_str()), Message::user(text)])
        .json_schema(intent_schema())
        .stream(false);

        if let Some(url) = &settings.base_url {
            request = request.custom_url(url.as_str());
        }

        request
    }

    /// Analyze one post
    ///
    /// # Errors
    ///
    /// Returns `AnalyzeError::Gateway` if the chat call fails and
    /// `AnalyzeError::InvalidAnalysis` if the reply does not hold an
    /// analysis.
    pub async fn analyze(&self, text: &str) -> Result<Analysis, AnalyzeError> {
        let response = self.gateway.chat(&self.request(text)).await?;

        let mut analysis: Analysis =
            serde_json::from_str(&response.message.content).map_err(AnalyzeError::InvalidAnalysis)?;

        for intention in &mut analysis.intentions {
            intention.intention = humanize(&intention.intention);
        }
        analysis.provider.clone_from(&self.settings.provider);

        tracing::debug!(
            provider = %analysis.provider,
            intentions = analysis.intentions.len(),
            is_ai_generated = analysis.is_ai_generated,
            "post analyzed"
        );

        Ok(analysis)
    }

    /// Answer an inbound request, rendering any failure as `{error}`
    pub async fn handle(&self, request: &AnalyzeRequest) -> AnalyzeReply {
        match self.analyze(&request.text).await {
            Ok(results) => AnalyzeReply::Results { results },
            Err(e) => {
                tracing::warn!(error = %e, "analysis failed");
                AnalyzeReply::Error { error: e.to_string() }
            }
        }
    }
}

/// Turn a camelCase tag into a spaced, capitalized label
///
/// `selfPromotion` becomes `Self Promotion`. The first letter is
/// capitalized on purpose so labels read as titles.
pub fn humanize(tag: &str) -> String {
    let spaced = LOWER_UPPER.replace_all(tag, "$1 $2");
    let spaced = ACRONYM_WORD.replace_all(&spaced, "$1 $2");

    let mut chars = spaced.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
