use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::CoreError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub llm: LlmConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub provider: String,
    /// Primary model, tried first on every call.
    pub model: String,
    /// Secondary model, tried once after the primary fails.
    #[serde(default)]
    pub fallback_model: Option<String>,
    /// Credential variables, checked in order. First non-empty wins.
    #[serde(default = "default_api_key_envs")]
    pub api_key_envs: Vec<String>,
    #[serde(default)]
    pub base_url: Option<String>,

    /// Optional: Override max_tokens for LLM requests
    /// If not specified, uses provider-specific defaults:
    /// - gemini: 8192
    /// - anthropic: 4096
    /// - openai: 4096
    /// - openai-compatible (ollama): 16384
    #[serde(default)]
    pub max_tokens: Option<u32>,

    /// Per-call deadline in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl LlmConfig {
    /// Get max_tokens value, using provider-specific default if not specified
    pub fn get_max_tokens(&self) -> u32 {
        if let Some(tokens) = self.max_tokens {
            return tokens;
        }

        match self.provider.as_str() {
            "gemini" => 8192,
            "anthropic" => 4096,
            "openai" => 4096,
            "openai-compatible" => 16384,
            _ => 4096,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Text sources longer than this lose their tail before prompting
    #[serde(default = "default_max_source_chars")]
    pub max_source_chars: usize,
    /// Bound on raw-output excerpts carried by parse errors
    #[serde(default = "default_excerpt_chars")]
    pub excerpt_chars: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_source_chars: default_max_source_chars(),
            excerpt_chars: default_excerpt_chars(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Models probed by the diagnostics endpoint
    #[serde(default = "default_diagnostic_models")]
    pub diagnostic_models: Vec<String>,
    /// JSON file with learning topics to seed the course store
    #[serde(default)]
    pub topics_path: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            diagnostic_models: default_diagnostic_models(),
            topics_path: None,
        }
    }
}

pub const DEFAULT_PRIMARY_MODEL: &str = "gemini-2.0-flash-exp";
pub const DEFAULT_FALLBACK_MODEL: &str = "gemini-1.5-flash";

fn default_api_key_envs() -> Vec<String> {
    vec!["GOOGLE_API_KEY".to_string(), "GEMINI_API_KEY".to_string()]
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_max_source_chars() -> usize {
    10_000
}

fn default_excerpt_chars() -> usize {
    200
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_diagnostic_models() -> Vec<String> {
    vec![
        DEFAULT_PRIMARY_MODEL.to_string(),
        DEFAULT_FALLBACK_MODEL.to_string(),
    ]
}

impl Config {
    /// Load configuration from a specific path, or use default search paths
    pub fn load_with_path(path: Option<String>) -> Result<Self> {
        if let Some(config_path) = path {
            debug!("Loading config from explicit path: {}", config_path);
            return Self::load_from_path(&config_path);
        }

        if let Ok(config) = Self::load_from_path("corestack.toml") {
            debug!("Loaded config from ./corestack.toml");
            return Ok(config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("corestack").join("config.toml");
            if let Ok(config) = Self::load_from_path(&config_path) {
                debug!("Loaded config from {:?}", config_path);
                return Ok(config);
            }
        }

        debug!("Using default config");
        Ok(Self::default())
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Resolve the provider credential from the configured variables.
    ///
    /// Returns the key and the name of the variable it came from.
    pub fn get_api_key(&self) -> Result<(String, String), CoreError> {
        for var in &self.llm.api_key_envs {
            if var.eq_ignore_ascii_case("none") {
                return Ok((String::new(), var.clone()));
            }
            if let Ok(value) = env::var(var) {
                if !value.trim().is_empty() {
                    return Ok((value, var.clone()));
                }
            }
        }

        // Local gateways run keyless
        if self.llm.provider == "openai-compatible" {
            return Ok((String::new(), "NONE".to_string()));
        }

        Err(CoreError::Configuration(format!(
            "API key missing: set one of {}",
            self.llm.api_key_envs.join(" or ")
        )))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm: LlmConfig {
                provider: "gemini".to_string(),
                model: DEFAULT_PRIMARY_MODEL.to_string(),
                fallback_model: Some(DEFAULT_FALLBACK_MODEL.to_string()),
                api_key_envs: default_api_key_envs(),
                base_url: None,
                max_tokens: None,
                timeout_secs: default_timeout_secs(),
            },
            extraction: ExtractionConfig::default(),
            server: ServerConfig::default(),
        }
    }
}
