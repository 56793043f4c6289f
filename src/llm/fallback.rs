//! Primary/secondary model invocation.
//!
//! The secondary model is only tried after the primary's failure has been
//! observed; the two calls are never raced. At most one fallback per call.

use tracing::{debug, warn};

use super::client::{GenerationRequest, LlmClient};
use crate::error::{CoreError, CoreResult};

pub struct FallbackClient {
    primary: Box<dyn LlmClient>,
    secondary: Option<Box<dyn LlmClient>>,
}

impl FallbackClient {
    pub fn new(primary: Box<dyn LlmClient>) -> Self {
        Self {
            primary,
            secondary: None,
        }
    }

    pub fn with_secondary(mut self, secondary: Box<dyn LlmClient>) -> Self {
        self.secondary = Some(secondary);
        self
    }

    pub fn primary_model(&self) -> &str {
        self.primary.model()
    }

    pub fn secondary_model(&self) -> Option<&str> {
        self.secondary.as_deref().map(|c| c.model())
    }

    /// Run `request` against the primary model, falling back once to the
    /// secondary on failure or when the primary cannot carry image parts.
    pub async fn invoke(&self, request: &GenerationRequest) -> CoreResult<String> {
        let primary_error = if request.has_image() && !self.primary.supports_images() {
            warn!(
                "Model {} cannot accept images, skipping to fallback",
                self.primary.model()
            );
            format!("model {} does not accept image input", self.primary.model())
        } else {
            debug!("Invoking primary model {}", self.primary.model());
            match self.primary.complete(request).await {
                Ok(text) => return Ok(text),
                Err(e) => {
                    warn!("Primary model {} failed: {:#}", self.primary.model(), e);
                    format!("{}: {:#}", self.primary.model(), e)
                }
            }
        };

        let Some(secondary) = self.secondary.as_deref() else {
            return Err(CoreError::ModelInvocation(primary_error));
        };

        warn!("Retrying with fallback model {}", secondary.model());
        secondary.complete(request).await.map_err(|e| {
            CoreError::ModelInvocation(format!(
                "{}; fallback {}: {:#}",
                primary_error,
                secondary.model(),
                e
            ))
        })
    }
}
