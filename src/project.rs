//! Project and agent drafts as the form layer hands them to the core.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between the steps of a flow.
pub const FLOW_SEPARATOR: &str = " -> ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProjectData {
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
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub github_repo: String,
    #[serde(default)]
    pub deployment_platform: String,
    #[serde(default)]
    pub backend_stack: String,
    #[serde(default)]
    pub backend_config_code: String,
    #[serde(default)]
    pub env_vars: Vec<EnvVar>,
    #[serde(default)]
    pub design_system: Option<DesignSystem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EntityNode {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub children: Vec<EntityNode>,
}

impl EntityNode {
    pub fn leaf(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<EntityNode>) -> Self {
        self.children = children;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EnvVar {
    #[serde(default)]
    pub id: String,
    pub key: String,
    #[serde(default)]
    pub value: String,
}

/// Join flow steps with the fixed separator.
pub fn join_flow<S: AsRef<str>>(steps: &[S]) -> String {
    steps
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(FLOW_SEPARATOR)
}

/// Split a rendered flow back into its steps.
pub fn split_flow(flow: &str) -> Vec<String> {
    flow.split(FLOW_SEPARATOR).map(str::to_string).collect()
}

// ============================================================================
// Design system choices
// ============================================================================

macro_rules! closed_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? } default $default:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

closed_enum!(ColorPalette {
    Monochrome => "monochrome",
    Cyberpunk => "cyberpunk",
    Pastel => "pastel",
    Corporate => "corporate",
    Forest => "forest",
} default Monochrome);

closed_enum!(BorderRadius {
    Square => "square",
    Rounded => "rounded",
    Pill => "pill",
} default Square);

closed_enum!(Spacing {
    Tight => "tight",
    Comfy => "comfy",
    Airy => "airy",
} default Comfy);

closed_enum!(Shadows {
    Flat => "flat",
    Soft => "soft",
    Hard => "hard",
} default Flat);

closed_enum!(ButtonStyle {
    Solid => "solid",
    Outline => "outline",
    Ghost => "ghost",
} default Solid);

closed_enum!(CardStyle {
    Border => "border",
    Elevated => "elevated",
    Flat => "flat",
} default Border);

closed_enum!(NavigationStyle {
    Sticky => "sticky",
    Floating => "floating",
    Sidebar => "sidebar",
} default Sticky);

impl ColorPalette {
    /// The three swatches shown for a palette.
    pub fn swatches(&self) -> [&'static str; 3] {
        match self {
            ColorPalette::Monochrome => ["#000000", "#ffffff", "#333333"],
            ColorPalette::Cyberpunk => ["#000000", "#00ff00", "#ff00ff"],
            ColorPalette::Pastel => ["#ffb7b2", "#dac4f7", "#b5ead7"],
            ColorPalette::Corporate => ["#0f172a", "#3b82f6", "#64748b"],
            ColorPalette::Forest => ["#1a2e1a", "#4ade80", "#166534"],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignSystem {
    pub color_palette: ColorPalette,
    pub border_radius: BorderRadius,
    pub spacing: Spacing,
    pub shadows: Shadows,
    pub button_style: ButtonStyle,
    pub card_style: CardStyle,
    pub navigation_style: NavigationStyle,
    pub mobile_first: bool,
}

impl Default for DesignSystem {
    fn default() -> Self {
        Self {
            color_palette: ColorPalette::default(),
            border_radius: BorderRadius::default(),
            spacing: Spacing::default(),
            shadows: Shadows::default(),
            button_style: ButtonStyle::default(),
            card_style: CardStyle::default(),
            navigation_style: NavigationStyle::default(),
            mobile_first: true,
        }
    }
}

// ============================================================================
// Agents
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AgentData {
    #[serde(default)]
    pub agent_name: String,
    #[serde(default)]
    pub agent_persona: String,
    #[serde(default)]
    pub triggers: Vec<String>,
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default)]
    pub constraints: Vec<String>,
    /// Free-text description of the agent's output schema
    #[serde(default)]
    pub output_format: String,
}
