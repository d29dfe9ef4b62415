#[cfg(feature = "cli")]
pub mod cli;

use crate::utils::error::{HoroscopeError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "horoscope.toml";
pub const MEMORY_DATABASE_URL: &str = "memory";
pub const API_KEY_ENV: &str = "CLAUDE_API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// sqlx SQLite URL, or `memory` for a process-local store.
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://horoscope.db".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// When false no request is sent and every horoscope uses the template.
    pub enabled: bool,
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
    pub anthropic_version: String,
    pub timeout_seconds: Option<u64>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "https://api.anthropic.com/v1/messages".to_string(),
            api_key: String::new(),
            model: "claude-sonnet-4-20250514".to_string(),
            max_tokens: 1000,
            anthropic_version: "2023-06-01".to_string(),
            timeout_seconds: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub verbose: bool,
    pub json: bool,
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(HoroscopeError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 檔案不存在時使用預設值
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = if path.as_ref().exists() {
            Self::from_file(&path)?
        } else {
            tracing::info!(
                "No configuration file at {}, using defaults",
                path.as_ref().display()
            );
            Self::default()
        };
        config.apply_env_defaults();
        Ok(config)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| HoroscopeError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CLAUDE_API_KEY})，找不到的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| HoroscopeError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    fn apply_env_defaults(&mut self) {
        if self.generation.api_key.is_empty() {
            if let Ok(key) = std::env::var(API_KEY_ENV) {
                self.generation.api_key = key;
            }
        }
    }

    pub fn uses_memory_store(&self) -> bool {
        self.database.url == MEMORY_DATABASE_URL
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Validate for GenerationConfig {
    fn validate(&self) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        validate_url("generation.endpoint", &self.endpoint)?;
        validate_non_empty_string("generation.model", &self.model)?;
        validate_non_empty_string("generation.anthropic_version", &self.anthropic_version)?;
        validate_range("generation.max_tokens", self.max_tokens, 1, 8192)?;

        if self.api_key.trim().is_empty() {
            return Err(HoroscopeError::ConfigError {
                message: format!(
                    "generation.api_key is required (or set {}) unless generation is disabled",
                    API_KEY_ENV
                ),
            });
        }

        Ok(())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("server.host", &self.server.host)?;
        if self.server.port == 0 {
            return Err(HoroscopeError::InvalidConfigValueError {
                field: "server.port".to_string(),
                value: "0".to_string(),
                reason: "port must be greater than 0".to_string(),
            });
        }
        validate_non_empty_string("database.url", &self.database.url)?;
        self.generation.validate()?;
        Ok(())
    }
}
