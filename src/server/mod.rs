//! HTTP boundary: marshals JSON, forwards to core operations, and maps
//! `CoreError` kinds to status codes.

pub mod error;
pub mod handlers;

use anyhow::{Context, Result};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::Config;
use crate::course::{CourseStore, MemoryCourseStore};
use crate::error::CoreError;
use crate::llm::factory::create_client;
use crate::llm::FallbackClient;

pub use error::ApiError;

pub struct AppState {
    pub config: Config,
    /// Client construction failure is kept and reported per request, so a
    /// missing credential surfaces as a configuration error instead of
    /// preventing startup.
    llm: Result<FallbackClient, String>,
    pub courses: Arc<dyn CourseStore>,
    pub dry_run: bool,
}

impl AppState {
    pub fn new(config: Config, courses: Arc<dyn CourseStore>, dry_run: bool) -> Self {
        let llm = create_client(&config, dry_run).map_err(|e| {
            warn!("LLM client unavailable: {:#}", e);
            format!("{:#}", e)
        });
        Self {
            config,
            llm,
            courses,
            dry_run,
        }
    }

    /// State with an explicit client, for embedding and tests.
    pub fn with_client(config: Config, llm: FallbackClient, courses: Arc<dyn CourseStore>) -> Self {
        Self {
            config,
            llm: Ok(llm),
            courses,
            dry_run: false,
        }
    }

    pub fn llm(&self) -> Result<&FallbackClient, CoreError> {
        self.llm
            .as_ref()
            .map_err(|msg| CoreError::Configuration(msg.clone()))
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/generate", post(handlers::generate_from_idea))
        .route("/api/style/analyse", post(handlers::analyse))
        .route("/api/style/generate-component", post(handlers::component))
        .route("/api/generate-course", post(handlers::course))
        .route("/api/diagnostics", get(handlers::diagnostics))
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(config: Config, dry_run: bool) -> Result<()> {
    let courses: Arc<dyn CourseStore> = match &config.server.topics_path {
        Some(path) => Arc::new(MemoryCourseStore::from_topics_file(path)?),
        None => Arc::new(MemoryCourseStore::new()),
    };
    let bind = config.server.bind.clone();
    let state = Arc::new(AppState::new(config, courses, dry_run));

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("Failed to bind {}", bind))?;
    info!("Listening on http://{}", bind);

    axum::serve(listener, router(state))
        .await
        .context("Server error")?;
    Ok(())
}
