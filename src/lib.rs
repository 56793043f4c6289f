//! corestack - Bootstrap prompts and design systems for code-generation tools
//!
//! Renders project and agent drafts into deterministic bootstrap prompts,
//! expands one-line ideas into project skeletons, extracts design-token
//! systems from CSS, descriptions or screenshots, and synthesizes UI
//! components against them. Model calls go through a primary/fallback
//! controller and every response is sanitized and validated before use.

pub mod cli;
pub mod config;
pub mod course;
pub mod diagnostics;
pub mod entity_tree;
pub mod error;
pub mod llm;
pub mod magic_fill;
pub mod project;
pub mod render;
pub mod server;
pub mod style;
pub mod util;

pub use error::{CoreError, CoreResult};
