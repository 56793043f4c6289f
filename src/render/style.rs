use crate::style::{StyleSystem, TargetPlatform, TypeLevel};
use crate::util::is_blank;

const GUIDELINES: [&str; 4] = [
    "- Never invent new colours; only use the tokens defined above.",
    "- Reuse existing components instead of recreating similar ones.",
    "- Use the spacing scale values; avoid arbitrary pixel values.",
    "- Maintain visual consistency between screens (same card and button treatments).",
];

/// Render an extracted style system as a fixed-order style guide.
///
/// Optional tokens that are absent or blank are left out as whole lines;
/// nothing is ever rendered as a placeholder. Section order is stable so the
/// output is predictable for the same input.
pub fn build_style_prompt(system: &StyleSystem, platform: TargetPlatform) -> String {
    let mut lines: Vec<String> = vec![
        "Use the following design system for all UI in this project.".to_string(),
        String::new(),
    ];

    let colors = &system.colors;
    lines.push("COLORS:".to_string());
    lines.push(format!("- primary: {}", colors.primary));
    push_optional(&mut lines, "primarySoft", &colors.primary_soft);
    push_optional(&mut lines, "accent", &colors.accent);
    lines.push(format!("- background: {}", colors.background));
    push_optional(&mut lines, "surface", &colors.surface);
    push_optional(&mut lines, "border", &colors.border);
    lines.push(format!("- text: {}", colors.text));
    push_optional(&mut lines, "mutedText", &colors.muted_text);
    push_optional(&mut lines, "success", &colors.success);
    push_optional(&mut lines, "error", &colors.error);

    let typography = &system.typography;
    lines.push(String::new());
    lines.push("TYPOGRAPHY:".to_string());
    lines.push(format!("- base font: {}", typography.font_family_base));
    push_optional(&mut lines, "heading font", &typography.font_family_heading);
    lines.push(type_line("body", &typography.scale.body));
    for (label, level) in [
        ("h1", &typography.scale.h1),
        ("h2", &typography.scale.h2),
        ("h3", &typography.scale.h3),
        ("small", &typography.scale.small),
    ] {
        if let Some(level) = level {
            lines.push(type_line(label, level));
        }
    }

    lines.push(String::new());
    lines.push("SPACING SCALE (px):".to_string());
    if !system.spacing_scale.is_empty() {
        lines.push(
            system
                .spacing_scale
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        );
    }

    if let Some(radius) = system.radius.as_ref().filter(|r| !r.is_empty()) {
        lines.push(String::new());
        lines.push("RADII:".to_string());
        push_optional(&mut lines, "button", &radius.button);
        push_optional(&mut lines, "card", &radius.card);
        push_optional(&mut lines, "input", &radius.input);
        push_optional(&mut lines, "chip", &radius.chip);
    }

    if let Some(shadows) = system.shadows.as_ref().filter(|s| !s.is_empty()) {
        lines.push(String::new());
        lines.push("SHADOWS:".to_string());
        for (name, value) in shadows {
            if !is_blank(value) {
                lines.push(format!("- {}: {}", name, value));
            }
        }
    }

    lines.push(String::new());
    lines.push("COMPONENTS:".to_string());
    for component in &system.components {
        let variants = match &component.variants {
            Some(v) if !v.is_empty() => format!(" (variants: {})", v.join(", ")),
            _ => String::new(),
        };
        let usage = match &component.usage {
            Some(u) if !is_blank(u) => format!(" Usage: {}", u),
            _ => String::new(),
        };
        lines.push(format!(
            "- {}{}: {}.{}",
            component.name, variants, component.description, usage
        ));
    }

    lines.push(String::new());
    lines.push("STYLE PRINCIPLES:".to_string());
    lines.extend(system.principles.iter().map(|p| format!("- {}", p)));

    lines.push(String::new());
    lines.push("GUIDELINES:".to_string());
    lines.extend(GUIDELINES.iter().map(|g| g.to_string()));
    lines.push(format!("- {}", platform.notes()));

    lines.join("\n")
}

fn push_optional(lines: &mut Vec<String>, label: &str, value: &Option<String>) {
    if let Some(v) = value.as_deref().filter(|v| !is_blank(v)) {
        lines.push(format!("- {}: {}", label, v));
    }
}

fn type_line(label: &str, level: &TypeLevel) -> String {
    format!(
        "- {}: {}, weight {}, line-height {}",
        label, level.size, level.weight, level.line_height
    )
}
