pub mod client;
pub mod client_impl;
pub mod factory;
pub mod fallback;
pub mod prompts;
pub mod sanitize;

pub use client::{GenerationRequest, InlineImage, LlmClient, MockLlmClient, RequestPart};
pub use fallback::FallbackClient;
