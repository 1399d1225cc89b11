use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_api_endpoint")]
    pub api_endpoint: String,
    #[serde(default = "default_api_model")]
    pub api_model: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_theme() -> String {
    "terminal-default".to_string()
}
fn default_api_endpoint() -> String {
    "https://chat-api.tamu.ai/v1/chat/completions".to_string()
}
fn default_api_model() -> String {
    "protected.gemini-2.0-flash-lite".to_string()
}
fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            api_endpoint: default_api_endpoint(),
            api_model: default_api_model(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("casedr")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_all_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.theme, "terminal-default");
        assert!(config.api_endpoint.contains("/chat/completions"));
        assert!(!config.api_model.is_empty());
        assert_eq!(config.request_timeout_secs, 10);
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let toml_str = r#"
theme = "catppuccin-mocha"
api_model = "gpt-4o-mini"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.theme, "catppuccin-mocha");
        assert_eq!(config.api_model, "gpt-4o-mini");
        assert_eq!(config.api_endpoint, default_api_endpoint());
        assert_eq!(config.request_timeout_secs, 10);
    }

    #[test]
    fn round_trips_through_toml() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(config.theme, deserialized.theme);
        assert_eq!(config.api_endpoint, deserialized.api_endpoint);
        assert_eq!(config.api_model, deserialized.api_model);
        assert_eq!(config.request_timeout_secs, deserialized.request_timeout_secs);
    }
}
