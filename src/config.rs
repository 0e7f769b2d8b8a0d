use serde::Deserialize;
use std::fs;
use tracing::warn;

use crate::error::{QuizError, Result};

/// Service configuration loaded from `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub backend: BackendConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    pub prompt: PromptConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    pub base_url: String,
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

impl BackendConfig {
    /// Reads the API key from the configured environment variable.
    pub fn api_key(&self) -> Result<String> {
        std::env::var(&self.api_key_env).map_err(|_| {
            QuizError::Config(format!(
                "environment variable '{}' is not set",
                self.api_key_env
            ))
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_quizzes_dir")]
    pub quizzes_dir: String,
    #[serde(default = "default_history_dir")]
    pub history_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            quizzes_dir: default_quizzes_dir(),
            history_dir: default_history_dir(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub username: String,
    pub password: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: "student".to_string(),
            password: "123123".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PromptConfig {
    pub system: SystemPrompt,
}

/// The system instruction may be written as a single string or as a list of
/// lines joined with newlines.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SystemPrompt {
    Text(String),
    Lines(Vec<String>),
}

impl SystemPrompt {
    pub fn joined(&self) -> String {
        match self {
            SystemPrompt::Text(text) => text.clone(),
            SystemPrompt::Lines(lines) => lines.join("\n"),
        }
    }
}

fn default_temperature() -> f64 {
    0.1
}

fn default_timeout_seconds() -> u64 {
    120
}

fn default_api_key_env() -> String {
    "DEEPSEEK_API_KEY".to_string()
}

fn default_quizzes_dir() -> String {
    "quizzes".to_string()
}

fn default_history_dir() -> String {
    "history".to_string()
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            QuizError::Config(format!("Failed to read config file '{}': {}", path, e))
        })?;

        let config: Config = toml::from_str(&content)?;
        if config.prompt.system.joined().trim().is_empty() {
            warn!("system prompt in '{}' is empty", path);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_prompt_written_as_lines() {
        let config: Config = toml::from_str(
            r#"
            [backend]
            base_url = "https://api.deepseek.com"
            model = "deepseek-chat"

            [prompt]
            system = ["first line", "second line"]
            "#,
        )
        .unwrap();

        assert_eq!(config.prompt.system.joined(), "first line\nsecond line");
        assert_eq!(config.backend.temperature, 0.1);
        assert_eq!(config.backend.timeout_seconds, 120);
        assert_eq!(config.storage.quizzes_dir, "quizzes");
    }

    #[test]
    fn loads_prompt_written_as_string() {
        let config: Config = toml::from_str(
            r#"
            [backend]
            base_url = "https://api.deepseek.com"
            model = "deepseek-chat"
            temperature = 0.7

            [prompt]
            system = "one instruction"
            "#,
        )
        .unwrap();

        assert_eq!(config.prompt.system.joined(), "one instruction");
        assert_eq!(config.backend.temperature, 0.7);
    }
}
