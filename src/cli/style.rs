use anyhow::{Context, Result};
use base64::Engine;
use std::fs;
use std::path::Path;
use tracing::info;

use super::{read_json, write_json, CommonArgs};
use crate::llm::factory;
use crate::style::{
    analyse_style, generate_component, AnalyseRequest, ComponentContext, ComponentRequest,
    ExtractionMode, StyleSystem, TargetPlatform,
};

pub async fn analyse(
    common: CommonArgs,
    mode: ExtractionMode,
    source_path: String,
    platform: TargetPlatform,
    output: Option<String>,
) -> Result<()> {
    let config = common.load_config()?;
    let source = read_source(mode, Path::new(&source_path))?;
    let llm = factory::create_client(&config, common.dry_run)?;

    let request = AnalyseRequest {
        mode,
        target_platform: platform,
        source,
    };
    let analysis = analyse_style(&llm, &request, &config.extraction).await?;

    if let Some(path) = output {
        write_json(path, &analysis.style_system)?;
    }
    println!("{}", analysis.style_prompt);
    Ok(())
}

pub async fn component(
    common: CommonArgs,
    style_path: String,
    name: String,
    context: Option<String>,
    instruction: Option<String>,
) -> Result<()> {
    let config = common.load_config()?;
    let style_system: StyleSystem = read_json(&style_path)?;
    let llm = factory::create_client(&config, common.dry_run)?;

    // Prefer the observation recorded for this component during extraction.
    let observed = style_system
        .components
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(&name))
        .map(ComponentContext::from);
    let component_context = match (context, observed) {
        (Some(description), _) => Some(ComponentContext {
            description: Some(description),
            ..Default::default()
        }),
        (None, observed) => observed,
    };

    let request = ComponentRequest {
        style_system,
        component_name: name,
        component_context,
        user_instruction: instruction,
    };
    let code = generate_component(&llm, &request, config.extraction.excerpt_chars).await?;
    println!("{}", code);
    Ok(())
}

/// Read the extraction source. Images become a base64 data URI.
pub fn read_source(mode: ExtractionMode, path: &Path) -> Result<String> {
    match mode {
        ExtractionMode::Image => {
            let bytes =
                fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
            let mime = image_mime(path);
            info!("Encoding {} ({}, {} bytes)", path.display(), mime, bytes.len());
            Ok(format!(
                "data:{};base64,{}",
                mime,
                base64::engine::general_purpose::STANDARD.encode(bytes)
            ))
        }
        ExtractionMode::Css | ExtractionMode::Description => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
    }
}

fn image_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "image/jpeg",
    }
}
