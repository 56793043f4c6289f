use crate::project::{DesignSystem, EntityNode, EnvVar, ProjectData};
use crate::util::is_blank;

const NONE: &str = "(none)";

/// Render the bootstrap prompt for a web-app project.
///
/// Every blank text field and empty list renders as `(none)`. The deployment
/// block only appears when a repository URL is set, the design-system block
/// only when a design system is present.
pub fn generate_prompt(data: &ProjectData) -> String {
    let backend = Backend::from_stack(&data.backend_stack);
    let mut out = String::new();

    out.push_str("You are an expert full-stack TypeScript engineer helping me bootstrap a new admin dashboard using my standard CoreStack architecture.\n\n");

    out.push_str("## Project Overview\n");
    out.push_str(&format!("- Name: {}\n", text_or_none(&data.project_name)));
    out.push_str(&format!("- Summary: {}\n", text_or_none(&data.project_summary)));

    if !is_blank(&data.github_repo) {
        out.push_str("\n## Deployment\n");
        out.push_str(&format!("- Repository: {}\n", data.github_repo.trim()));
        out.push_str(&format!(
            "- Platform: {}\n",
            text_or_none(&data.deployment_platform)
        ));
    }

    if let Some(design) = &data.design_system {
        out.push_str("\n## Design System\n");
        out.push_str(&design_block(design));
    }

    out.push_str("\n## Tech Stack (fixed)\n");
    out.push_str("- Next.js (App Router)\n- TypeScript\n- Tailwind CSS\n");
    for line in backend.stack_lines() {
        out.push_str(&format!("- {}\n", line));
    }
    let platform = if is_blank(&data.deployment_platform) {
        "Vercel"
    } else {
        data.deployment_platform.trim()
    };
    out.push_str(&format!("- {} (deployment)\n", platform));
    out.push_str("- GitHub (repo)\n");

    out.push_str("\n## Backend Configuration\n");
    if is_blank(&data.backend_config_code) {
        out.push_str(NONE);
        out.push('\n');
    } else {
        out.push_str(&format!("```\n{}\n```\n", data.backend_config_code.trim()));
    }

    out.push_str("\n## Environment Variables\n");
    out.push_str(&env_block(&data.env_vars));

    out.push_str("\n## Domain Entities\n");
    out.push_str(&entity_block(&data.entities));

    out.push_str("\n## Key Relationships\n");
    out.push_str(&list_block(&data.relationships));

    out.push_str("\n## Core MVP Flows\n");
    out.push_str(&list_block(&data.flows));

    out.push_str("\n## Special Requirements / Notes\n");
    out.push_str(text_or_none(&data.notes));
    out.push('\n');

    out.push_str("\n---\n\n# Your Task\n\n");
    out.push_str("1. Scaffold a reusable admin dashboard shell:\n");
    out.push_str("   - Public routes under `app/` (/, /auth/login)\n");
    out.push_str("   - Authenticated area under `app/app/*`\n");
    out.push_str("   - Protected layout with sidebar + topbar\n");
    out.push_str(&format!(
        "2. Use {} with email/password for login.\n",
        backend.auth_name()
    ));
    out.push_str("3. Use Tailwind for all styling, with clean, minimal UI.\n");
    out.push_str("4. Keep dependencies minimal and mainstream (no extra UI libraries).\n");
    out.push_str("5. Do **not** build CRUD pages yet – only the shell and auth.\n");

    out.push_str("\n# Output Format\n");
    out.push_str("1. Propose the folder/file structure.\n");
    out.push_str("2. Provide `package.json`, Tailwind config, PostCSS config, tsconfig, next.config.\n");
    out.push_str("3. Provide full code for:\n");
    out.push_str("   - `app/layout.tsx`\n");
    out.push_str("   - `app/page.tsx`\n");
    out.push_str("   - `app/auth/login/page.tsx`\n");
    out.push_str("   - `app/app/layout.tsx`\n");
    out.push_str("   - `app/app/page.tsx`\n");
    out.push_str(&format!(
        "   - {} client/server helpers in `lib/`.\n",
        backend.client_name()
    ));
    out.push_str("4. Briefly explain how everything fits together.\n");

    out
}

/// Backend selection; blank means the default Supabase stack.
enum Backend<'a> {
    Supabase,
    Firebase,
    Both,
    Custom(&'a str),
}

impl<'a> Backend<'a> {
    fn from_stack(stack: &'a str) -> Self {
        let trimmed = stack.trim();
        match trimmed.to_lowercase().as_str() {
            "" | "supabase" => Backend::Supabase,
            "firebase" => Backend::Firebase,
            "both" => Backend::Both,
            _ => Backend::Custom(trimmed),
        }
    }

    fn stack_lines(&self) -> Vec<&'a str> {
        match self {
            Backend::Supabase => vec!["Supabase (Postgres + Auth)"],
            Backend::Firebase => vec!["Firebase (Firestore + Auth)"],
            Backend::Both => vec!["Supabase (Postgres + Auth)", "Firebase (Firestore + Auth)"],
            Backend::Custom(s) => vec![*s],
        }
    }

    fn auth_name(&self) -> String {
        match self {
            Backend::Supabase | Backend::Both => "Supabase Auth".to_string(),
            Backend::Firebase => "Firebase Auth".to_string(),
            Backend::Custom(s) => format!("{} auth", s),
        }
    }

    fn client_name(&self) -> String {
        match self {
            Backend::Supabase => "Supabase".to_string(),
            Backend::Firebase => "Firebase".to_string(),
            Backend::Both => "Supabase and Firebase".to_string(),
            Backend::Custom(s) => s.to_string(),
        }
    }
}

fn text_or_none(s: &str) -> &str {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        NONE
    } else {
        trimmed
    }
}

fn list_block(items: &[String]) -> String {
    if items.is_empty() {
        return format!("{}\n", NONE);
    }
    items.iter().map(|item| format!("- {}\n", item)).collect()
}

fn env_block(vars: &[EnvVar]) -> String {
    let lines: Vec<String> = vars
        .iter()
        .filter(|v| !is_blank(&v.key))
        .map(|v| {
            if v.value.is_empty() {
                format!("- {}\n", v.key.trim())
            } else {
                format!("- {}={}\n", v.key.trim(), v.value)
            }
        })
        .collect();
    if lines.is_empty() {
        format!("{}\n", NONE)
    } else {
        lines.concat()
    }
}

/// Entities as an indented bullet tree, two spaces per level.
fn entity_block(forest: &[EntityNode]) -> String {
    fn walk(nodes: &[EntityNode], depth: usize, out: &mut String) {
        for node in nodes {
            out.push_str(&format!("{}- {}\n", "  ".repeat(depth), node.name));
            walk(&node.children, depth + 1, out);
        }
    }

    if forest.is_empty() {
        return format!("{}\n", NONE);
    }
    let mut out = String::new();
    walk(forest, 0, &mut out);
    out
}

fn design_block(design: &DesignSystem) -> String {
    let palette = design.color_palette;
    let mut out = format!(
        "- Color palette: {} ({})\n",
        palette,
        palette.swatches().join(", ")
    );
    out.push_str(&format!("- Border radius: {}\n", design.border_radius));
    out.push_str(&format!("- Spacing: {}\n", design.spacing));
    out.push_str(&format!("- Shadows: {}\n", design.shadows));
    out.push_str(&format!("- Buttons: {}\n", design.button_style));
    out.push_str(&format!("- Cards: {}\n", design.card_style));
    out.push_str(&format!("- Navigation: {}\n", design.navigation_style));
    out.push_str(&format!(
        "- Mobile-first: {}\n",
        if design.mobile_first { "yes" } else { "no" }
    ));
    out
}
