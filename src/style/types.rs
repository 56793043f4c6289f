//! Canonical design-token schema every style-related model output must meet.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};
use crate::util::is_blank;

/// Component names an extraction may report.
pub const COMPONENT_NAMES: [&str; 6] = ["Button", "Card", "Input", "Navbar", "Modal", "Alert"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleSystem {
    pub colors: ColorTokens,
    pub typography: Typography,
    #[serde(default)]
    pub spacing_scale: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<RadiusTokens>,
    /// Named CSS box-shadow values, e.g. `card`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadows: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub components: Vec<StyleComponent>,
    #[serde(default)]
    pub principles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorTokens {
    pub primary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_soft: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    pub background: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<String>,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muted_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    pub font_family_base: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family_heading: Option<String>,
    pub scale: TypeScale,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeScale {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h1: Option<TypeLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h2: Option<TypeLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h3: Option<TypeLevel>,
    pub body: TypeLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small: Option<TypeLevel>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeLevel {
    pub size: TokenValue,
    pub weight: TokenValue,
    pub line_height: TokenValue,
}

/// A token models emit either as a JSON number or as a string (`1.5` vs `"1.5rem"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenValue {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::Number(n) => write!(f, "{}", n),
            TokenValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for TokenValue {
    fn from(s: &str) -> Self {
        TokenValue::Text(s.to_string())
    }
}

impl From<u64> for TokenValue {
    fn from(n: u64) -> Self {
        TokenValue::Number(n.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RadiusTokens {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chip: Option<String>,
}

impl RadiusTokens {
    pub fn is_empty(&self) -> bool {
        [&self.button, &self.card, &self.input, &self.chip]
            .iter()
            .all(|v| v.as_deref().is_none_or(is_blank))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleComponent {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variants: Option<Vec<String>>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,
}

impl StyleSystem {
    /// Check the fields every successful extraction must carry.
    pub fn validate(&self) -> CoreResult<()> {
        let required = [
            ("colors.primary", self.colors.primary.as_str()),
            ("colors.background", self.colors.background.as_str()),
            ("colors.text", self.colors.text.as_str()),
            (
                "typography.fontFamilyBase",
                self.typography.font_family_base.as_str(),
            ),
        ];
        for (field, value) in required {
            if is_blank(value) {
                return Err(CoreError::schema(format!("{} must not be empty", field)));
            }
        }
        if is_blank(&self.typography.scale.body.size.to_string()) {
            return Err(CoreError::schema("typography.scale.body.size must not be empty"));
        }
        Ok(())
    }
}

/// Code-generation tool the style prompt is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum TargetPlatform {
    Lovable,
    Vibe,
    Cursor,
    #[default]
    Generic,
}

impl TargetPlatform {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetPlatform::Lovable => "lovable",
            TargetPlatform::Vibe => "vibe",
            TargetPlatform::Cursor => "cursor",
            TargetPlatform::Generic => "generic",
        }
    }

    /// Closing guideline specific to the platform.
    pub fn notes(&self) -> &'static str {
        match self {
            TargetPlatform::Lovable => "Reuse existing components. Do not invent new colours. Use Tailwind classes derived from the configured theme. Avoid inline styles.",
            TargetPlatform::Vibe => "Keep classNames consistent. Prefer composition of existing components over duplicating styles.",
            TargetPlatform::Cursor => "Generate idiomatic React/TSX with clean Tailwind classes. Avoid magic numbers; respect the spacing scale.",
            TargetPlatform::Generic => "Respect the design system. Do not invent new tokens.",
        }
    }
}

/// Unknown platform names fall back to `generic`.
impl From<String> for TargetPlatform {
    fn from(s: String) -> Self {
        match s.trim().to_lowercase().as_str() {
            "lovable" => TargetPlatform::Lovable,
            "vibe" => TargetPlatform::Vibe,
            "cursor" => TargetPlatform::Cursor,
            _ => TargetPlatform::Generic,
        }
    }
}

impl FromStr for TargetPlatform {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(TargetPlatform::from(s.to_string()))
    }
}

impl fmt::Display for TargetPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
