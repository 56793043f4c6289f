//! Expand a one-line project idea into a draft project skeleton.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::entity_tree::normalize_forest;
use crate::error::{CoreError, CoreResult};
use crate::llm::sanitize::parse_typed;
use crate::llm::{prompts, FallbackClient, GenerationRequest};
use crate::project::{EntityNode, ProjectData};
use crate::util::is_blank;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MagicFillDraft {
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub project_summary: String,
    #[serde(default)]
    pub entities: Vec<EntityNode>,
    #[serde(default)]
    pub relationships: Vec<String>,
    #[serde(default)]
    pub flows: Vec<String>,
}

/// Ask the model for a skeleton matching `idea`.
///
/// The returned entity forest always has unique, non-blank ids.
pub async fn magic_fill(
    llm: &FallbackClient,
    idea: &str,
    excerpt_chars: usize,
) -> CoreResult<MagicFillDraft> {
    if is_blank(idea) {
        return Err(CoreError::invalid_input("Prompt is required"));
    }

    info!("Magic fill for idea ({} chars)", idea.chars().count());
    let request = GenerationRequest::text(prompts::MAGIC_FILL_SYSTEM_PROMPT)
        .with_text(prompts::magic_fill_idea(idea.trim()))
        .json();
    let raw = llm.invoke(&request).await?;

    let mut draft: MagicFillDraft = parse_typed(&raw, excerpt_chars)?;
    draft.entities = normalize_forest(&draft.entities);
    Ok(draft)
}

/// Non-destructive merge: a draft field replaces the existing one only when
/// it is non-empty.
pub fn merge_draft(existing: &ProjectData, draft: &MagicFillDraft) -> ProjectData {
    let mut merged = existing.clone();

    if !is_blank(&draft.project_name) {
        merged.project_name = draft.project_name.clone();
    }
    if !is_blank(&draft.project_summary) {
        merged.project_summary = draft.project_summary.clone();
    }
    if !draft.entities.is_empty() {
        merged.entities = draft.entities.clone();
    }
    if !draft.relationships.is_empty() {
        merged.relationships = draft.relationships.clone();
    }
    if !draft.flows.is_empty() {
        merged.flows = draft.flows.clone();
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_populated_fields_when_draft_is_empty() {
        let existing = ProjectData {
            project_name: "Foo".to_string(),
            entities: vec![EntityNode::leaf("x", "X")],
            notes: "keep me".to_string(),
            ..Default::default()
        };
        let draft = MagicFillDraft {
            project_name: String::new(),
            entities: vec![EntityNode::leaf("y", "Y"), EntityNode::leaf("z", "Z")],
            ..Default::default()
        };

        let merged = merge_draft(&existing, &draft);
        assert_eq!(merged.project_name, "Foo");
        assert_eq!(
            merged.entities,
            vec![EntityNode::leaf("y", "Y"), EntityNode::leaf("z", "Z")]
        );
        assert_eq!(merged.notes, "keep me");
    }

    #[test]
    fn test_merge_replaces_with_non_empty_values() {
        let existing = ProjectData {
            project_summary: "old".to_string(),
            flows: vec!["A -> B".to_string()],
            ..Default::default()
        };
        let draft = MagicFillDraft {
            project_summary: "new".to_string(),
            flows: vec!["C -> D".to_string()],
            ..Default::default()
        };
        let merged = merge_draft(&existing, &draft);
        assert_eq!(merged.project_summary, "new");
        assert_eq!(merged.flows, vec!["C -> D"]);
        assert!(merged.relationships.is_empty());
    }

    #[test]
    fn test_whitespace_name_does_not_clobber() {
        let existing = ProjectData {
            project_name: "Foo".to_string(),
            ..Default::default()
        };
        let draft = MagicFillDraft {
            project_name: "   ".to_string(),
            ..Default::default()
        };
        assert_eq!(merge_draft(&existing, &draft).project_name, "Foo");
    }
}
