use super::types::StyleSystem;
use crate::util::is_blank;

#[derive(Debug, Clone, PartialEq)]
pub struct ActiveStyle {
    pub system: StyleSystem,
    pub prompt: String,
}

/// The style activated for one session. Passed explicitly to whatever builds
/// the final prompt; there is no process-wide active style.
#[derive(Debug, Clone, Default)]
pub struct StyleContext {
    active: Option<ActiveStyle>,
}

impl StyleContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<&ActiveStyle> {
        self.active.as_ref()
    }

    pub fn set(&mut self, system: StyleSystem, prompt: String) {
        self.active = Some(ActiveStyle { system, prompt });
    }

    pub fn clear(&mut self) {
        self.active = None;
    }

    /// Append the active style guidelines to a rendered project or agent prompt.
    pub fn compose(&self, base: &str) -> String {
        compose_with_style(base, self.active.as_ref().map(|a| a.prompt.as_str()))
    }
}

pub fn compose_with_style(base: &str, style_prompt: Option<&str>) -> String {
    match style_prompt.filter(|p| !is_blank(p)) {
        Some(style) => format!("{}\n\n---\nSTYLE GUIDELINES\n{}", base, style),
        None => base.to_string(),
    }
}
