//! Style extraction: CSS text, a free description, or an image in; a
//! validated `StyleSystem` plus its rendered style prompt out.

use base64::Engine;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info, warn};

use super::types::{StyleComponent, StyleSystem, TargetPlatform, COMPONENT_NAMES};
use crate::config::ExtractionConfig;
use crate::error::{CoreError, CoreResult};
use crate::llm::sanitize::parse_typed;
use crate::llm::{prompts, FallbackClient, GenerationRequest, InlineImage};
use crate::render::build_style_prompt;
use crate::util::{is_blank, truncate_chars};

const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMode {
    Css,
    Description,
    Image,
}

impl ExtractionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionMode::Css => "css",
            ExtractionMode::Description => "description",
            ExtractionMode::Image => "image",
        }
    }
}

impl FromStr for ExtractionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "css" => Ok(ExtractionMode::Css),
            "description" => Ok(ExtractionMode::Description),
            "image" => Ok(ExtractionMode::Image),
            other => Err(format!(
                "unknown mode '{}' (expected css, description or image)",
                other
            )),
        }
    }
}

impl fmt::Display for ExtractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of an analyse-style call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyseRequest {
    pub mode: ExtractionMode,
    #[serde(default)]
    pub target_platform: TargetPlatform,
    #[serde(default)]
    pub source: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleAnalysis {
    pub style_system: StyleSystem,
    pub style_prompt: String,
}

/// Split a `data:<mime>;base64,<payload>` URI into an inline image.
pub fn parse_image_data_uri(source: &str) -> CoreResult<InlineImage> {
    let Some((prefix, payload)) = source.split_once(',') else {
        return Err(CoreError::invalid_input("Invalid image data format"));
    };

    let mime_type = prefix
        .split(';')
        .next()
        .and_then(|meta| meta.split(':').nth(1))
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .unwrap_or(DEFAULT_IMAGE_MIME)
        .to_string();

    let payload = payload.trim();
    if payload.is_empty() {
        return Err(CoreError::invalid_input("Image payload is empty"));
    }
    base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| CoreError::invalid_input(format!("Image payload is not valid base64: {}", e)))?;

    Ok(InlineImage {
        mime_type,
        data: payload.to_string(),
    })
}

/// Build the model request for one extraction. All input checks happen here,
/// before anything touches the network.
pub fn build_extraction_request(
    mode: ExtractionMode,
    source: &str,
    max_source_chars: usize,
) -> CoreResult<GenerationRequest> {
    if is_blank(source) {
        return Err(CoreError::invalid_input("Source is required"));
    }

    let request = match mode {
        ExtractionMode::Image => {
            let image = parse_image_data_uri(source)?;
            GenerationRequest::text(prompts::style_extraction_prompt(mode.as_str(), None))
                .with_image(image)
        }
        ExtractionMode::Css | ExtractionMode::Description => {
            let bounded = truncate_chars(source, max_source_chars);
            if bounded.len() < source.len() {
                debug!(
                    "Source truncated to {} characters for extraction",
                    max_source_chars
                );
            }
            GenerationRequest::text(prompts::style_extraction_prompt(
                mode.as_str(),
                Some(bounded),
            ))
        }
    };

    Ok(request.json())
}

/// Keep only components from the closed name set, one entry per name.
///
/// Names match case-insensitively and are rewritten to their canonical
/// spelling; the first occurrence of a name wins.
pub fn normalize_components(components: Vec<StyleComponent>) -> Vec<StyleComponent> {
    let mut seen = HashSet::new();
    let mut kept = Vec::with_capacity(components.len());

    for mut component in components {
        let Some(canonical) = COMPONENT_NAMES
            .iter()
            .find(|n| n.eq_ignore_ascii_case(component.name.trim()))
        else {
            warn!("Dropping component outside the known set: {}", component.name);
            continue;
        };
        if !seen.insert(*canonical) {
            warn!("Dropping duplicate component: {}", component.name);
            continue;
        }
        component.name = canonical.to_string();
        kept.push(component);
    }

    kept
}

/// Run one extraction end to end.
pub async fn analyse_style(
    llm: &FallbackClient,
    request: &AnalyseRequest,
    extraction: &ExtractionConfig,
) -> CoreResult<StyleAnalysis> {
    let generation =
        build_extraction_request(request.mode, &request.source, extraction.max_source_chars)?;

    info!(
        "Extracting style system (mode: {}, platform: {})",
        request.mode, request.target_platform
    );
    let raw = llm.invoke(&generation).await?;

    let mut style_system: StyleSystem = parse_typed(&raw, extraction.excerpt_chars)?;
    style_system.validate()?;
    style_system.components = normalize_components(style_system.components);

    let style_prompt = build_style_prompt(&style_system, request.target_platform);
    info!(
        "Extracted style system with {} components",
        style_system.components.len()
    );

    Ok(StyleAnalysis {
        style_system,
        style_prompt,
    })
}
