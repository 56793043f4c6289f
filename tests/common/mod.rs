//! Shared test doubles for integration tests

#![allow(dead_code)]

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use corestack::llm::{FallbackClient, GenerationRequest, LlmClient};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// LLM double that replays scripted replies and records every request.
#[derive(Clone)]
pub struct ScriptedClient {
    model: String,
    replies: Arc<Mutex<VecDeque<Result<String, String>>>>,
    calls: Arc<Mutex<Vec<GenerationRequest>>>,
}

impl ScriptedClient {
    pub fn new(model: &str) -> Self {
        Self {
            model: model.to_string(),
            replies: Arc::default(),
            calls: Arc::default(),
        }
    }

    pub fn reply(self, text: &str) -> Self {
        self.replies.lock().unwrap().push_back(Ok(text.to_string()));
        self
    }

    pub fn fail(self, message: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<GenerationRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for ScriptedClient {
    async fn complete(&self, request: &GenerationRequest) -> Result<String> {
        self.calls.lock().unwrap().push(request.clone());
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(anyhow!(message)),
            None => Err(anyhow!("no scripted reply left for {}", self.model)),
        }
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Fallback client over a single scripted primary.
pub fn single(client: &ScriptedClient) -> FallbackClient {
    FallbackClient::new(Box::new(client.clone()))
}

/// Fallback client over a scripted primary and secondary.
pub fn pair(primary: &ScriptedClient, secondary: &ScriptedClient) -> FallbackClient {
    FallbackClient::new(Box::new(primary.clone())).with_secondary(Box::new(secondary.clone()))
}

pub const STYLE_JSON: &str = r##"{
  "colors": {"primary": "#2563eb", "background": "#ffffff", "text": "#0f172a", "accent": "#f97316"},
  "typography": {
    "fontFamilyBase": "Inter, sans-serif",
    "scale": {"body": {"size": "16px", "weight": 400, "lineHeight": 1.5}}
  },
  "spacingScale": [4, 8, 16],
  "components": [
    {"name": "button", "variants": ["primary"], "description": "Rounded blue button"},
    {"name": "Tooltip", "description": "Dark bubble"},
    {"name": "Button", "description": "Duplicate"}
  ],
  "principles": ["clean and airy"]
}"##;
