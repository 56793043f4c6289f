use anyhow::{bail, Result};

use super::client::LlmClient;
use super::client::MockLlmClient;
use super::client_impl::{AnthropicClient, GeminiClient, OpenAIClient};
use super::fallback::FallbackClient;
use crate::config::Config;

/// Create a client for one model of the configured provider.
pub fn create_client_for_model(
    config: &Config,
    model: &str,
    dry_run: bool,
) -> Result<Box<dyn LlmClient>> {
    if dry_run {
        return Ok(Box::new(MockLlmClient::new()));
    }

    let (api_key, _source) = config.get_api_key()?;
    let max_tokens = config.llm.get_max_tokens();
    let timeout = config.llm.timeout_secs;
    let model = model.to_string();
    let base_url = config.llm.base_url.clone();

    match config.llm.provider.as_str() {
        "gemini" => match base_url {
            Some(url) => Ok(Box::new(GeminiClient::with_base_url(
                api_key, model, url, max_tokens, timeout,
            )?)),
            None => Ok(Box::new(GeminiClient::new(
                api_key, model, max_tokens, timeout,
            )?)),
        },

        "openai" => match base_url {
            Some(url) => Ok(Box::new(OpenAIClient::with_base_url(
                api_key, model, url, max_tokens, timeout,
            )?)),
            None => Ok(Box::new(OpenAIClient::new(
                api_key, model, max_tokens, timeout,
            )?)),
        },

        "openai-compatible" => {
            let url = base_url.unwrap_or_else(|| "http://localhost:11434/v1".to_string());
            Ok(Box::new(OpenAIClient::with_base_url(
                api_key, model, url, max_tokens, timeout,
            )?))
        }

        "anthropic" => match base_url {
            Some(url) => Ok(Box::new(AnthropicClient::with_base_url(
                api_key, model, url, max_tokens, timeout,
            )?)),
            None => Ok(Box::new(AnthropicClient::new(
                api_key, model, max_tokens, timeout,
            )?)),
        },

        unknown => bail!("Unknown LLM provider: {}", unknown),
    }
}

/// Create the primary client plus, when configured, its secondary fallback.
pub fn create_client(config: &Config, dry_run: bool) -> Result<FallbackClient> {
    let primary = create_client_for_model(config, &config.llm.model, dry_run)?;
    let mut client = FallbackClient::new(primary);

    if let Some(ref fallback) = config.llm.fallback_model {
        if !dry_run && fallback != &config.llm.model {
            client = client.with_secondary(create_client_for_model(config, fallback, dry_run)?);
        }
    }

    Ok(client)
}
