//! Credential presence report plus a minimal live call per candidate model.

use serde::Serialize;
use std::collections::BTreeMap;
use std::env;
use tracing::{error, info};

use crate::config::Config;
use crate::llm::factory::create_client_for_model;
use crate::llm::{GenerationRequest, LlmClient};

const PROBE_PROMPT: &str = "Test";

#[derive(Debug, Clone, Serialize)]
pub struct EnvReport {
    /// `<VAR>_PRESENT` for every configured credential variable
    #[serde(flatten)]
    pub present: BTreeMap<String, bool>,
    #[serde(rename = "ACTIVE_KEY_SOURCE")]
    pub active_key_source: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProbeStatus {
    #[serde(rename = "success")]
    Success,
    #[serde(rename = "failed (empty response)")]
    EmptyResponse,
    #[serde(rename = "failed")]
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelCheck {
    pub model: String,
    pub status: ProbeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticsReport {
    pub env: EnvReport,
    pub models: Vec<ModelCheck>,
    pub error: Option<String>,
}

impl DiagnosticsReport {
    /// At least one candidate model answered.
    pub fn healthy(&self) -> bool {
        self.models.iter().any(|m| m.status == ProbeStatus::Success)
    }
}

pub fn env_report(config: &Config) -> EnvReport {
    let mut present = BTreeMap::new();
    let mut active = None;
    for var in &config.llm.api_key_envs {
        let set = env::var(var).map(|v| !v.trim().is_empty()).unwrap_or(false);
        if set && active.is_none() {
            active = Some(var.clone());
        }
        present.insert(format!("{}_PRESENT", var), set);
    }
    EnvReport {
        present,
        active_key_source: active.unwrap_or_else(|| "NONE".to_string()),
    }
}

pub async fn probe_model(client: &dyn LlmClient) -> ModelCheck {
    let model = client.model().to_string();
    match client.complete(&GenerationRequest::text(PROBE_PROMPT)).await {
        Ok(text) if !text.trim().is_empty() => ModelCheck {
            model,
            status: ProbeStatus::Success,
            error: None,
        },
        Ok(_) => ModelCheck {
            model,
            status: ProbeStatus::EmptyResponse,
            error: None,
        },
        Err(e) => {
            error!("Diagnostics probe for {} failed: {:#}", model, e);
            ModelCheck {
                model,
                status: ProbeStatus::Failed,
                error: Some(format!("{:#}", e)),
            }
        }
    }
}

/// Report credentials and probe every model in `server.diagnostic_models`.
pub async fn run_diagnostics(config: &Config, dry_run: bool) -> DiagnosticsReport {
    let env = env_report(config);

    if !dry_run {
        if let Err(e) = config.get_api_key() {
            return DiagnosticsReport {
                env,
                models: Vec::new(),
                error: Some(e.to_string()),
            };
        }
    }

    let mut models = Vec::with_capacity(config.server.diagnostic_models.len());
    for model in &config.server.diagnostic_models {
        info!("Probing model {}", model);
        let check = match create_client_for_model(config, model, dry_run) {
            Ok(client) => ModelCheck {
                model: model.clone(),
                ..probe_model(client.as_ref()).await
            },
            Err(e) => ModelCheck {
                model: model.clone(),
                status: ProbeStatus::Failed,
                error: Some(format!("{:#}", e)),
            },
        };
        models.push(check);
    }

    let error = if models.iter().any(|m| m.status == ProbeStatus::Success) {
        None
    } else {
        Some("No candidate model produced a response".to_string())
    };

    DiagnosticsReport { env, models, error }
}
