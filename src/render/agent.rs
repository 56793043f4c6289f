use crate::project::AgentData;
use crate::util::is_blank;

/// Render the bootstrap prompt for an automation agent.
///
/// The output format is embedded verbatim in a fenced block; an empty one
/// renders as `{}`.
pub fn generate_agent_prompt(data: &AgentData) -> String {
    let mut out = String::new();

    out.push_str("You are an expert AI engineer helping me design and implement an automation agent.\n\n");

    out.push_str("## Agent Overview\n");
    out.push_str(&format!("- Name: {}\n", or_none(&data.agent_name)));

    out.push_str("\n## Persona\n");
    out.push_str(or_none(&data.agent_persona));
    out.push('\n');

    for (heading, items) in [
        ("Triggers", &data.triggers),
        ("Tools", &data.tools),
        ("Constraints", &data.constraints),
    ] {
        out.push_str(&format!("\n## {}\n", heading));
        if items.is_empty() {
            out.push_str("(none)\n");
        } else {
            for item in items {
                out.push_str(&format!("- {}\n", item));
            }
        }
    }

    let format = if is_blank(&data.output_format) {
        "{}"
    } else {
        data.output_format.trim()
    };
    out.push_str("\n## Output Format\n");
    out.push_str(&format!("```json\n{}\n```\n", format));

    out.push_str("\n---\n\n# Your Task\n\n");
    out.push_str("1. Write the system prompt for this agent, embodying the persona above.\n");
    out.push_str("2. Define the input and output contract of every tool.\n");
    out.push_str("3. Describe how each trigger starts a run and what the agent does next.\n");
    out.push_str("4. Enforce every constraint explicitly in the system prompt.\n");
    out.push_str("5. Make every response conform to the output format above.\n");

    out
}

fn or_none(s: &str) -> &str {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        "(none)"
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_agent() {
        let out = generate_agent_prompt(&AgentData::default());
        assert!(out.contains("- Name: (none)\n"));
        assert!(out.contains("## Persona\n(none)\n"));
        assert!(out.contains("## Triggers\n(none)\n"));
        assert!(out.contains("## Tools\n(none)\n"));
        assert!(out.contains("## Constraints\n(none)\n"));
        assert!(out.contains("## Output Format\n```json\n{}\n```\n"));
    }

    #[test]
    fn test_output_format_kept_verbatim() {
        let data = AgentData {
            agent_name: "Triage Bot".to_string(),
            agent_persona: "Calm support engineer".to_string(),
            triggers: vec!["New ticket".to_string()],
            tools: vec!["search_docs".to_string(), "reply".to_string()],
            constraints: vec!["Never promise refunds".to_string()],
            output_format: "{\n  \"thought\": \"string\",\n  \"action\": \"string\"\n}".to_string(),
        };
        let out = generate_agent_prompt(&data);
        assert!(out.contains("- Name: Triage Bot\n"));
        assert!(out.contains("## Tools\n- search_docs\n- reply\n"));
        assert!(out.contains("```json\n{\n  \"thought\": \"string\",\n  \"action\": \"string\"\n}\n```"));
    }
}
