use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::clients::{ProviderKind, anthropic, openai};
use crate::error::{ProposalError, Result};

/// Main configuration structure loaded from proposal_forge.toml and environment variables
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub output: OutputConfig,
    /// Secrets and log settings, loaded from the environment only
    #[serde(skip)]
    pub runtime: RuntimeConfig,
}

/// Which completion backend to use and how to reach it
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// "openai", "anthropic" or "none"
    pub name: String,
    pub openai_model: String,
    pub openai_base_url: String,
    pub anthropic_model: String,
    pub anthropic_base_url: String,
    pub timeout_ms: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            name: "openai".to_string(),
            openai_model: openai::DEFAULT_MODEL.to_string(),
            openai_base_url: "https://api.openai.com/v1".to_string(),
            anthropic_model: anthropic::DEFAULT_MODEL.to_string(),
            anthropic_base_url: "https://api.anthropic.com".to_string(),
            timeout_ms: 60_000,
        }
    }
}

impl ProviderConfig {
    pub fn kind(&self) -> ProviderKind {
        ProviderKind::parse(&self.name)
    }
}

/// Where and what the exporter writes
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub write_markdown: bool,
    pub write_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("output"),
            write_markdown: true,
            write_json: true,
        }
    }
}

/// Runtime configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub log_level: String,
}

pub const DEFAULT_LOG_LEVEL: &str = "proposal_forge=info";

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            anthropic_api_key: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl RuntimeConfig {
    /// Load runtime configuration from environment variables
    pub fn load_from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            openai_api_key: lookup("OPENAI_API_KEY"),
            anthropic_api_key: lookup("ANTHROPIC_API_KEY"),
            log_level: lookup("RUST_LOG")
                .filter(|level| !level.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        }
    }
}

impl Config {
    /// Load configuration from TOML file and environment variables.
    /// Uses PROPOSAL_FORGE_CONFIG or defaults to "proposal_forge.toml".
    pub fn load() -> Result<Self> {
        Self::load_env_file();

        let config_path = std::env::var("PROPOSAL_FORGE_CONFIG")
            .unwrap_or_else(|_| "proposal_forge.toml".to_string());

        let mut config = match std::fs::read_to_string(&config_path) {
            Ok(content) => Self::from_toml_str(&content)?,
            Err(_) => {
                tracing::warn!("Config file {} not found, using defaults", config_path);
                Self::default()
            }
        };

        config.apply_env_overrides();
        config.runtime = RuntimeConfig::load_from_env();
        config.validate()?;

        Ok(config)
    }

    /// Read PROPOSAL_ENV_FILE (or ./.env) into the process environment.
    /// Existing variables win; a missing file is not an error.
    pub fn load_env_file() {
        if let Ok(env_path) = std::env::var("PROPOSAL_ENV_FILE") {
            let _ = dotenvy::from_path(env_path);
        } else {
            let _ = dotenvy::from_path(".env");
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Env-first: environment variables win over the TOML file
    fn apply_env_overrides(&mut self) {
        if let Ok(name) =
            std::env::var("PROPOSAL_AI_PROVIDER").or_else(|_| std::env::var("ai_provider"))
        {
            tracing::debug!("AI provider env override applied");
            self.provider.name = name;
        }
        if let Ok(model) = std::env::var("OPENAI_MODEL")
            && !model.trim().is_empty()
        {
            self.provider.openai_model = model;
        }
        if let Ok(model) = std::env::var("ANTHROPIC_MODEL")
            && !model.trim().is_empty()
        {
            self.provider.anthropic_model = model;
        }
        if let Ok(url) = std::env::var("OPENAI_BASE_URL") {
            self.provider.openai_base_url = url;
        }
        if let Ok(url) = std::env::var("ANTHROPIC_BASE_URL") {
            self.provider.anthropic_base_url = url;
        }
        if let Some(timeout) = std::env::var("PROPOSAL_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            self.provider.timeout_ms = timeout;
        }
        if let Ok(dir) = std::env::var("PROPOSAL_OUTPUT_DIR") {
            self.output.dir = PathBuf::from(dir);
        }
    }

    /// Command-line flags win over both the environment and the TOML file
    pub fn apply_cli_overrides(&mut self, provider: Option<&str>, output_dir: Option<&Path>) {
        if let Some(name) = provider {
            self.provider.name = name.to_string();
        }
        if let Some(dir) = output_dir {
            self.output.dir = dir.to_path_buf();
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.provider.timeout_ms == 0 {
            return Err(ProposalError::Config {
                message: "PROPOSAL_TIMEOUT_MS must be greater than 0".to_string(),
            });
        }
        if self.provider.kind() == ProviderKind::None
            && !self.provider.name.trim().eq_ignore_ascii_case("none")
        {
            tracing::warn!(
                "Unknown AI provider '{}', using template generation",
                self.provider.name
            );
        }
        Ok(())
    }

    /// Credential for the configured provider, if any
    pub fn api_key(&self) -> Option<&str> {
        match self.provider.kind() {
            ProviderKind::OpenAi => self.runtime.openai_api_key.as_deref(),
            ProviderKind::Anthropic => self.runtime.anthropic_api_key.as_deref(),
            ProviderKind::None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_target_openai() {
        let config = Config::default();
        assert_eq!(config.provider.kind(), ProviderKind::OpenAi);
        assert_eq!(config.provider.openai_model, openai::DEFAULT_MODEL);
        assert_eq!(config.provider.anthropic_model, anthropic::DEFAULT_MODEL);
        assert_eq!(config.output.dir, PathBuf::from("output"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            [provider]
            name = "anthropic"
            timeout_ms = 5000
            "#,
        )
        .unwrap();
        assert_eq!(config.provider.kind(), ProviderKind::Anthropic);
        assert_eq!(config.provider.timeout_ms, 5000);
        assert_eq!(config.provider.anthropic_model, anthropic::DEFAULT_MODEL);
        assert!(config.output.write_json);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = Config::default();
        config.provider.timeout_ms = 0;
        assert!(matches!(
            config.validate(),
            Err(ProposalError::Config { .. })
        ));
    }

    #[test]
    fn test_api_key_follows_provider() {
        let mut config = Config::default();
        config.runtime.openai_api_key = Some("sk-openai".to_string());
        config.runtime.anthropic_api_key = Some("sk-ant".to_string());
        assert_eq!(config.api_key(), Some("sk-openai"));
        config.provider.name = "anthropic".to_string();
        assert_eq!(config.api_key(), Some("sk-ant"));
        config.provider.name = "none".to_string();
        assert_eq!(config.api_key(), None);
    }

    #[test]
    fn test_log_level_from_lookup() {
        let runtime = RuntimeConfig::from_lookup(|_| None);
        assert_eq!(runtime.log_level, DEFAULT_LOG_LEVEL);
        assert_eq!(runtime.openai_api_key, None);

        let runtime = RuntimeConfig::from_lookup(|key| match key {
            "RUST_LOG" => Some("proposal_forge=debug,reqwest=warn".to_string()),
            "ANTHROPIC_API_KEY" => Some("sk-ant".to_string()),
            _ => None,
        });
        assert_eq!(runtime.log_level, "proposal_forge=debug,reqwest=warn");
        assert_eq!(runtime.anthropic_api_key.as_deref(), Some("sk-ant"));

        let runtime =
            RuntimeConfig::from_lookup(|key| (key == "RUST_LOG").then(|| " ".to_string()));
        assert_eq!(runtime.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn test_cli_overrides_keep_toml_output_dir() {
        let mut config = Config::from_toml_str(
            r#"
            [output]
            dir = "reports/2025"
            "#,
        )
        .unwrap();
        config.apply_cli_overrides(Some("none"), None);
        assert_eq!(config.output.dir, PathBuf::from("reports/2025"));
        assert_eq!(config.provider.kind(), ProviderKind::None);

        config.apply_cli_overrides(None, Some(Path::new("elsewhere")));
        assert_eq!(config.output.dir, PathBuf::from("elsewhere"));
        assert_eq!(config.provider.kind(), ProviderKind::None);
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let res = Config::from_toml_str("[provider\nname = ");
        assert!(matches!(res, Err(ProposalError::Config { .. })));
    }
}
