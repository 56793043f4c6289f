pub mod diagnostics;
pub mod magic_fill;
pub mod render;
pub mod serve;
pub mod style;

use anyhow::{Context, Result};
use clap::Args;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::config::Config;

/// Flags shared by every model-backed command.
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Path to config file (defaults to ./corestack.toml or ~/.config/corestack/config.toml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Override the primary model (e.g., "gemini-2.0-flash-exp")
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Override the fallback model tried after a primary failure
    #[arg(long, global = true)]
    pub fallback_model: Option<String>,

    /// Override the LLM provider (gemini, openai, openai-compatible, anthropic)
    #[arg(long, global = true)]
    pub provider: Option<String>,

    /// Use mock LLM client for testing
    #[arg(long, global = true)]
    pub dry_run: bool,
}

impl CommonArgs {
    /// Load config and apply CLI overrides.
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_path(self.config.clone())?;

        if let Some(ref provider) = self.provider {
            info!("CLI override: provider = {}", provider);
            config.llm.provider = provider.clone();
        }
        if let Some(ref model) = self.model {
            info!("CLI override: model = {}", model);
            config.llm.model = model.clone();
        }
        if let Some(ref fallback) = self.fallback_model {
            info!("CLI override: fallback_model = {}", fallback);
            config.llm.fallback_model = Some(fallback.clone());
        }

        Ok(config)
    }
}

pub(crate) fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

pub(crate) fn write_json<T: serde::Serialize>(path: impl AsRef<Path>, value: &T) -> Result<()> {
    let path = path.as_ref();
    let content = serde_json::to_string_pretty(value)?;
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_overrides_applied() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[llm]
provider = "gemini"
model = "gemini-2.0-flash-exp"
fallback_model = "gemini-1.5-flash"
"#
        )
        .unwrap();

        let args = CommonArgs {
            config: Some(file.path().to_string_lossy().to_string()),
            model: Some("gemini-exp-1206".to_string()),
            fallback_model: Some("gemini-1.5-pro".to_string()),
            provider: None,
            dry_run: false,
        };
        let config = args.load_config().unwrap();
        assert_eq!(config.llm.model, "gemini-exp-1206");
        assert_eq!(config.llm.fallback_model.as_deref(), Some("gemini-1.5-pro"));
        assert_eq!(config.llm.provider, "gemini");
    }

    #[test]
    fn test_read_json_reports_path() {
        let err = read_json::<serde_json::Value>("/nonexistent/project.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/project.json"));
    }
}
