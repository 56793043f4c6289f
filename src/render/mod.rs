//! Deterministic template renderers. No I/O and no model calls; every
//! structurally valid input renders without error.

pub mod agent;
pub mod project;
pub mod style;

pub use agent::generate_agent_prompt;
pub use project::generate_prompt;
pub use style::build_style_prompt;
