//! Style systems: schema, extraction from CSS/description/image, component
//! synthesis, and the session-scoped active style.

pub mod component;
pub mod context;
pub mod extract;
pub mod types;

pub use component::{generate_component, ComponentContext, ComponentRequest};
pub use context::{compose_with_style, ActiveStyle, StyleContext};
pub use extract::{analyse_style, AnalyseRequest, ExtractionMode, StyleAnalysis};
pub use types::{
    ColorTokens, RadiusTokens, StyleComponent, StyleSystem, TargetPlatform, TokenValue,
    TypeLevel, TypeScale, Typography, COMPONENT_NAMES,
};
