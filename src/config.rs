use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Model endpoint configuration
    #[serde(default)]
    pub model: ModelConfig,
    /// Paths to the durable prompt and inbox documents
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Model endpoint configuration (OpenRouter-compatible chat completions)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// API key (MAILMIND_API_KEY environment variable takes precedence)
    #[serde(default)]
    pub api_key: Option<String>,
    /// Model to use (default: anthropic/claude-3-haiku)
    #[serde(default = "default_model")]
    pub model: String,
    /// Chat completions endpoint URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Maximum tokens per completion
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl ModelConfig {
    /// Resolve the API key: environment variable first, then config file.
    pub fn resolve_api_key(&self) -> Option<String> {
        std::env::var("MAILMIND_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .or_else(|| self.api_key.clone())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path to the prompt configuration document (default: data dir)
    #[serde(default)]
    pub prompts_path: Option<PathBuf>,
    /// Path to the mock inbox document (default: data dir)
    #[serde(default)]
    pub inbox_path: Option<PathBuf>,
}

impl StoreConfig {
    pub fn prompts_path(&self) -> Result<PathBuf> {
        match &self.prompts_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Config::data_dir()?.join("prompts.json")),
        }
    }

    pub fn inbox_path(&self) -> Result<PathBuf> {
        match &self.inbox_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Config::data_dir()?.join("mock_inbox.json")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub keybinding_mode: KeybindingMode,
    /// Split pane ratio for the inbox view (30-70, default 50 = equal split)
    #[serde(default = "default_split_ratio")]
    pub split_ratio: u16,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            keybinding_mode: KeybindingMode::default(),
            split_ratio: default_split_ratio(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum KeybindingMode {
    #[default]
    Vim,
    Arrows,
}

fn default_model() -> String {
    "anthropic/claude-3-haiku".to_string()
}

fn default_base_url() -> String {
    "https://openrouter.ai/api/v1/chat/completions".to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_split_ratio() -> u16 {
    50
}

impl Config {
    pub fn config_dir() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("mailmind");
        Ok(dir)
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    pub fn data_dir() -> Result<PathBuf> {
        let dir = dirs::data_local_dir()
            .context("Could not find data directory")?
            .join("mailmind");
        Ok(dir)
    }

    /// Load the config file, falling back to defaults when it does not exist.
    /// A present but unparseable file is a startup error.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        let dir = path.parent().unwrap();

        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn ensure_dirs(&self) -> Result<()> {
        fs::create_dir_all(Self::config_dir()?)?;
        fs::create_dir_all(Self::data_dir()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            [model]
            api_key = "sk-test"
            model = "meta-llama/llama-3.1-8b-instruct"
            max_tokens = 512

            [store]
            inbox_path = "/tmp/inbox.json"

            [ui]
            keybinding_mode = "arrows"
            split_ratio = 60
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.model.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.model.model, "meta-llama/llama-3.1-8b-instruct");
        assert_eq!(config.model.max_tokens, 512);
        assert_eq!(config.model.base_url, default_base_url());
        assert_eq!(
            config.store.inbox_path,
            Some(PathBuf::from("/tmp/inbox.json"))
        );
        assert_eq!(config.ui.keybinding_mode, KeybindingMode::Arrows);
        assert_eq!(config.ui.split_ratio, 60);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.model.api_key.is_none());
        assert_eq!(config.model.model, "anthropic/claude-3-haiku");
        assert_eq!(config.ui.keybinding_mode, KeybindingMode::Vim);
        assert_eq!(config.ui.split_ratio, 50);
        assert!(config.store.prompts_path.is_none());
    }

    #[test]
    fn test_store_paths_honor_overrides() {
        let store = StoreConfig {
            prompts_path: Some(PathBuf::from("/tmp/p.json")),
            inbox_path: None,
        };
        assert_eq!(store.prompts_path().unwrap(), PathBuf::from("/tmp/p.json"));
        assert!(store.inbox_path().unwrap().ends_with("mock_inbox.json"));
    }
}
