//! Component-code synthesis against an activated style system.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::types::{StyleComponent, StyleSystem};
use crate::error::{CoreError, CoreResult};
use crate::llm::sanitize::parse_typed;
use crate::llm::{prompts, FallbackClient, GenerationRequest};
use crate::util::is_blank;

/// Previously observed details of the component, used to bias fidelity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ComponentContext {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub variants: Option<Vec<String>>,
    #[serde(default)]
    pub usage: Option<String>,
}

impl ComponentContext {
    pub fn is_empty(&self) -> bool {
        self.description.as_deref().is_none_or(is_blank)
            && self.variants.as_ref().is_none_or(|v| v.is_empty())
            && self.usage.as_deref().is_none_or(is_blank)
    }
}

impl From<&StyleComponent> for ComponentContext {
    fn from(component: &StyleComponent) -> Self {
        Self {
            description: Some(component.description.clone()),
            variants: component.variants.clone(),
            usage: component.usage.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRequest {
    pub style_system: StyleSystem,
    /// Any name; not limited to the extraction set
    pub component_name: String,
    #[serde(default)]
    pub component_context: Option<ComponentContext>,
    #[serde(default)]
    pub user_instruction: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CodeEnvelope {
    code: String,
}

/// Generate one HTML fragment for `request.component_name`.
///
/// Output is non-deterministic; only its shape is checked: a `{"code": ...}`
/// envelope whose code is a non-empty markup fragment.
pub async fn generate_component(
    llm: &FallbackClient,
    request: &ComponentRequest,
    excerpt_chars: usize,
) -> CoreResult<String> {
    if is_blank(&request.component_name) {
        return Err(CoreError::invalid_input("componentName is required"));
    }

    let instruction = request
        .user_instruction
        .as_deref()
        .filter(|s| !is_blank(s));
    let prompt = prompts::component_prompt(
        &request.style_system,
        request.component_name.trim(),
        request.component_context.as_ref(),
        instruction,
    );

    info!("Generating component {}", request.component_name.trim());
    let raw = llm.invoke(&GenerationRequest::text(prompt).json()).await?;

    let envelope: CodeEnvelope = parse_typed(&raw, excerpt_chars)?;
    let code = envelope.code.trim();
    if !code.starts_with('<') {
        return Err(CoreError::schema(
            "code must be a non-empty HTML fragment starting with '<'",
        ));
    }

    Ok(code.to_string())
}
