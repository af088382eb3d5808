use std::path::Path;

use secrecy::ExposeSecret;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::parse(&raw)
    }

    /// Parse and validate configuration text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing or validation fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is complete
    ///
    /// # Errors
    ///
    /// Returns an error if a provider field is empty or the timeout is
    /// invalid
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_provider()?;
        self.validate_http()?;
        Ok(())
    }

    fn validate_provider(&self) -> anyhow::Result<()> {
        let provider = &self.provider;

        if provider.name.trim().is_empty() {
            anyhow::bail!("configuration incomplete: provider.name must not be empty");
        }

        if provider.model.trim().is_empty() {
            anyhow::bail!("configuration incomplete: provider.model must not be empty");
        }

        if provider.api_key.expose_secret().is_empty() {
            anyhow::bail!("configuration incomplete: provider.api_key must not be empty");
        }

        Ok(())
    }

    fn validate_http(&self) -> anyhow::Result<()> {
        if self.http.timeout_duration()?.is_zero() {
            anyhow::bail!("http.timeout must be greater than 0");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use indoc::indoc;
    use secrecy::ExposeSecret;

    use crate::{Config, LogFormat};

    #[test]
    fn minimal_config_uses_defaults() {
        let config = Config::parse(indoc! {r#"
            [provider]
            name = "ollama"
            model = "llama3"
            api_key = "local"
        "#})
        .unwrap();

        assert_eq!(config.provider.name, "ollama");
        assert_eq!(config.provider.api_key.expose_secret(), "local");
        assert!(config.provider.base_url.is_none());
        assert_eq!(config.http.timeout_duration().unwrap(), Duration::from_secs(60));
        assert!(config.analyzer.system_prompt.is_none());
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.telemetry.format, LogFormat::Pretty);
    }

    #[test]
    fn full_config() {
        let config = Config::parse(indoc! {r#"
            [provider]
            name = "gemini"
            model = "gemini-1.5-flash"
            api_key = "g-key"
            base_url = "https://proxy.example.com/generate"

            [http]
            timeout = "2m"

            [analyzer]
            system_prompt = "Be brief."

            [telemetry]
            log_level = "tenor=debug"
            format = "json"
        "#})
        .unwrap();

        assert_eq!(config.provider.base_url.as_deref(), Some("https://proxy.example.com/generate"));
        assert_eq!(config.http.timeout_duration().unwrap(), Duration::from_secs(120));
        assert_eq!(config.analyzer.system_prompt.as_deref(), Some("Be brief."));
        assert_eq!(config.telemetry.log_level, "tenor=debug");
        assert_eq!(config.telemetry.format, LogFormat::Json);
    }

    #[test]
    fn api_key_from_environment() {
        temp_env::with_var("TENOR_LOADER_KEY", Some("sk-env"), || {
            let config = Config::parse(indoc! {r#"
                [provider]
                name = "openai"
                model = "gpt-4o"
                api_key = "{{ env.TENOR_LOADER_KEY }}"
            "#})
            .unwrap();

            assert_eq!(config.provider.api_key.expose_secret(), "sk-env");
        });
    }

    #[test]
    fn blank_base_url_is_unset() {
        temp_env::with_var_unset("TENOR_LOADER_BASE_URL", || {
            let config = Config::parse(indoc! {r#"
                [provider]
                name = "ollama"
                model = "llama3"
                api_key = "local"
                base_url = "{{ env.TENOR_LOADER_BASE_URL | default("") }}"
            "#})
            .unwrap();

            assert!(config.provider.base_url.is_none());
        });
    }

    #[test]
    fn missing_provider_section_is_rejected() {
        let err = Config::parse("[http]\ntimeout = \"5s\"\n").unwrap_err();
        assert!(err.to_string().contains("provider"), "{err}");
    }

    #[test]
    fn empty_fields_are_rejected() {
        for (field, body) in [
            ("provider.name", "name = \"\"\nmodel = \"m\"\napi_key = \"k\""),
            ("provider.model", "name = \"grok\"\nmodel = \" \"\napi_key = \"k\""),
            ("provider.api_key", "name = \"grok\"\nmodel = \"m\"\napi_key = \"\""),
        ] {
            let err = Config::parse(&format!("[provider]\n{body}\n")).unwrap_err();
            assert!(err.to_string().contains(field), "{field}: {err}");
        }
    }

    #[test]
    fn invalid_timeout_is_rejected() {
        let base = "[provider]\nname = \"grok\"\nmodel = \"m\"\napi_key = \"k\"\n";

        let err = Config::parse(&format!("{base}[http]\ntimeout = \"soon\"\n")).unwrap_err();
        assert!(err.to_string().contains("invalid http.timeout"), "{err}");

        let err = Config::parse(&format!("{base}[http]\ntimeout = \"0s\"\n")).unwrap_err();
        assert!(err.to_string().contains("greater than 0"), "{err}");
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = Config::parse(indoc! {r#"
            [provider]
            name = "grok"
            model = "m"
            api_key = "k"
            region = "us-east-1"
        "#})
        .unwrap_err();

        assert!(err.to_string().contains("region"), "{err}");
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tenor.toml");
        std::fs::write(&path, "[provider]\nname = \"ollama\"\nmodel = \"llama3\"\napi_key = \"x\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.provider.model, "llama3");

        let err = Config::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }
}
