use anyhow::Result;
use tracing::info;

use super::{read_json, write_json, CommonArgs};
use crate::llm::factory;
use crate::magic_fill::{magic_fill, merge_draft};
use crate::project::ProjectData;

pub async fn run(
    common: CommonArgs,
    idea: String,
    project_path: Option<String>,
    output: Option<String>,
) -> Result<()> {
    let config = common.load_config()?;
    let llm = factory::create_client(&config, common.dry_run)?;

    let draft = magic_fill(&llm, &idea, config.extraction.excerpt_chars).await?;
    info!(
        "Draft: {} entities, {} relationships, {} flows",
        draft.entities.len(),
        draft.relationships.len(),
        draft.flows.len()
    );

    let Some(project_path) = project_path else {
        match output {
            Some(path) => write_json(path, &draft)?,
            None => println!("{}", serde_json::to_string_pretty(&draft)?),
        }
        return Ok(());
    };

    let existing: ProjectData = read_json(&project_path)?;
    let merged = merge_draft(&existing, &draft);
    write_json(output.unwrap_or(project_path), &merged)
}
