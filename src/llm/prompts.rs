// Instruction texts sent to the models. Recognisable openings ("You are a
// system architect", ...) are also what the mock provider keys on.

use serde::Serialize;

use crate::style::{ComponentContext, StyleSystem, COMPONENT_NAMES};

pub const MAGIC_FILL_SYSTEM_PROMPT: &str = r#"You are a system architect.
I will give you a project idea.
You must return a valid JSON object with this exact structure:
{
  "projectName": "string",
  "projectSummary": "string",
  "entities": [
    { "id": "string", "name": "string", "children": [] }
  ],
  "relationships": ["string"],
  "flows": ["string"]
}

Rules:
1. 'entities' should be a hierarchical tree if possible (e.g. User -> Profile).
2. 'flows' should be simple steps separated by ' -> ' (e.g. "Login -> Dashboard").
3. Return ONLY the JSON. No markdown formatting.
"#;

pub fn magic_fill_idea(idea: &str) -> String {
    format!("Project Idea: {}", idea)
}

const STYLE_SCHEMA: &str = r#"interface StyleSystem {
  colors: {
    primary: string;
    primarySoft?: string; // lighter/softer version of primary
    accent?: string;
    background: string;
    surface?: string; // card/panel background
    border?: string;
    text: string;
    mutedText?: string;
    success?: string;
    error?: string;
  };
  typography: {
    fontFamilyBase: string;
    fontFamilyHeading?: string;
    scale: {
      h1?: { size: string; weight: number; lineHeight: number | string };
      h2?: { size: string; weight: number; lineHeight: number | string };
      h3?: { size: string; weight: number; lineHeight: number | string };
      body: { size: string; weight: number; lineHeight: number | string };
      small?: { size: string; weight: number; lineHeight: number | string };
    };
  };
  spacingScale: number[]; // e.g. [4, 8, 12, 16, 24]
  radius?: {
    button?: string;
    card?: string;
    input?: string;
    chip?: string;
  };
  shadows?: { [name: string]: string }; // e.g. { card: "0 8px 24px rgba(0,0,0,0.2)" }
  components: {
    name: string;
    variants?: string[];
    description: string;
    usage?: string;
  }[];
  principles: string[]; // qualitative style guidelines
}"#;

/// Build the extraction instruction for one input mode.
///
/// `source` is the already-truncated text for `css` and `description`
/// modes; image payloads travel as a separate request part.
pub fn style_extraction_prompt(mode: &str, source: Option<&str>) -> String {
    let input = match source {
        Some(text) => format!("Input Data:\n```\n{}\n```", text),
        None => "Analyze the uploaded image to extract colors, typography, and component styles."
            .to_string(),
    };
    let names = COMPONENT_NAMES
        .iter()
        .map(|n| format!("   - \"{}\"", n))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are an expert design system engineer.
Your task is to analyze the following input and extract a strict design system.

Input Mode: {mode}
{input}

Output must be a valid JSON object matching this TypeScript interface:

{schema}

Rules:
1. Infer reasonable defaults for any required value the input does not state (e.g. a readable body size and line height).
2. Cluster near-duplicate colors into a single canonical token; do not list every shade you see.
3. 'components' should ONLY include the following if clearly visible or described:
{names}
   For each found component, provide:
   - name: One of the exact names above.
   - variants: List of visible variants (e.g. "primary", "outline").
   - description: Visual description (shape, color, shadow).
   - usage: Brief usage note.
   Never list the same component name twice.
4. 'principles' should capture the overall visual language in a few short phrases.
5. Return ONLY the JSON. No markdown formatting.
"#,
        mode = mode,
        input = input,
        schema = STYLE_SCHEMA,
        names = names,
    )
}

/// Build the component-synthesis instruction.
pub fn component_prompt(
    system: &StyleSystem,
    component_name: &str,
    context: Option<&ComponentContext>,
    user_instruction: Option<&str>,
) -> String {
    let mut prompt = format!(
        r#"You are an expert UI engineer using Tailwind CSS.
Your task is to generate a production-ready HTML component for a "{name}".

STRICT DESIGN SYSTEM TO FOLLOW:
- Colors: {colors}
- Radius: {radius}
- Typography: {typography}
- Spacing Scale: {spacing}
"#,
        name = component_name,
        colors = to_json(&system.colors),
        radius = to_json(&system.radius),
        typography = to_json(&system.typography),
        spacing = to_json(&system.spacing_scale),
    );

    if let Some(ctx) = context.filter(|c| !c.is_empty()) {
        prompt.push_str("\nOBSERVED COMPONENT DETAILS (match these for visual fidelity):\n");
        if let Some(description) = &ctx.description {
            prompt.push_str(&format!("- Description: {}\n", description));
        }
        if let Some(variants) = ctx.variants.as_ref().filter(|v| !v.is_empty()) {
            prompt.push_str(&format!("- Variants: {}\n", variants.join(", ")));
        }
        if let Some(usage) = &ctx.usage {
            prompt.push_str(&format!("- Usage: {}\n", usage));
        }
    }

    if let Some(instruction) = user_instruction {
        prompt.push_str(&format!(
            "\nUSER INSTRUCTION (highest priority, follow it even where it departs from the tokens above):\n{}\n",
            instruction
        ));
    }

    prompt.push_str(
        r#"
INSTRUCTIONS:
1. Return a single JSON object with a "code" field containing the HTML string.
2. Use ONLY Tailwind CSS classes built from the design tokens above. Do not use arbitrary values (e.g. w-[123px]) unless absolutely necessary.
3. If the observed details mention visual effects the tokens cannot express (e.g. "purple gradient", "glassmorphism"), reproduce those effects faithfully instead of flattening them to the palette.
4. Include hover, focus and active states, and correct ARIA attributes so the component is accessible.
5. Do not include <html>, <body>, or markdown fences. Just the component HTML.
6. Ensure high contrast and visual fidelity.

Output Format:
{
    "code": "<button class='...'>...</button>"
}
"#,
    );

    prompt
}

pub const COURSE_SYSTEM_PROMPT: &str = r#"You are an expert curriculum designer and technical educator. Your goal is to create a structured, high-quality learning course based on a given topic.

The output must be a valid JSON object matching the following structure:
{
  "title": "Course Title",
  "short_summary": "Brief overview of the course",
  "difficulty": "basic" | "intermediate" | "advanced",
  "estimated_total_minutes": 120,
  "modules": [
    {
      "title": "Module Title",
      "summary": "Module summary",
      "lessons": [
        {
          "title": "Lesson Title",
          "objective": "What the student will learn",
          "key_points": ["Point 1", "Point 2"],
          "estimated_minutes": 15,
          "practice_task": "A hands-on exercise",
          "quiz_question": "A question to test understanding"
        }
      ]
    }
  ]
}

- Break the topic down into logical modules.
- Ensure lessons are bite-sized and actionable.
- The tone should be encouraging but technical and precise.
- For "practice_task", provide a concrete thing the user can do (e.g., "Write a function that...", "Create a file named...").
"#;

pub fn course_topic_prompt(
    title: &str,
    description: Option<&str>,
    context_area: Option<&str>,
    difficulty: &str,
) -> String {
    format!(
        "Topic: {}\nDescription: {}\nContext: {}\nDifficulty: {}\n\nGenerate a comprehensive course for this topic.",
        title,
        description.unwrap_or("No description provided"),
        context_area.unwrap_or("General"),
        difficulty
    )
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}
