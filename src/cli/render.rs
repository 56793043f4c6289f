use anyhow::Result;
use tracing::info;

use super::read_json;
use crate::project::{AgentData, ProjectData};
use crate::render::{build_style_prompt, generate_agent_prompt, generate_prompt};
use crate::style::{StyleContext, StyleSystem, TargetPlatform};

/// Render a project or agent draft, optionally followed by style guidelines.
pub fn run(
    project_path: String,
    agent: bool,
    style_path: Option<String>,
    platform: TargetPlatform,
) -> Result<()> {
    println!("{}", render_file(&project_path, agent, style_path.as_deref(), platform)?);
    Ok(())
}

pub fn render_file(
    project_path: &str,
    agent: bool,
    style_path: Option<&str>,
    platform: TargetPlatform,
) -> Result<String> {
    let base = if agent {
        let data: AgentData = read_json(project_path)?;
        generate_agent_prompt(&data)
    } else {
        let data: ProjectData = read_json(project_path)?;
        generate_prompt(&data)
    };

    let mut context = StyleContext::new();
    if let Some(path) = style_path {
        let system: StyleSystem = read_json(path)?;
        system.validate()?;
        info!("Activating style from {} for {}", path, platform);
        let prompt = build_style_prompt(&system, platform);
        context.set(system, prompt);
    }

    Ok(context.compose(&base))
}
