use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use super::error::ApiError;
use super::AppState;
use crate::course::generate_course;
use crate::diagnostics::{run_diagnostics, DiagnosticsReport};
use crate::error::CoreError;
use crate::magic_fill::{magic_fill, MagicFillDraft};
use crate::style::{
    analyse_style, generate_component, AnalyseRequest, ComponentContext, ComponentRequest,
    ExtractionMode, StyleAnalysis, StyleSystem, TargetPlatform,
};
use crate::util::is_blank;

/// Header set by the upstream identity proxy for authenticated callers.
pub const USER_ID_HEADER: &str = "x-user-id";

type ApiResult<T> = Result<Json<T>, ApiError>;

pub async fn health() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": "corestack",
            "version": env!("CARGO_PKG_VERSION"),
        })),
    )
}

#[derive(Debug, Deserialize)]
pub struct GenerateBody {
    #[serde(default)]
    prompt: Option<String>,
}

pub async fn generate_from_idea(
    State(state): State<Arc<AppState>>,
    body: Result<Json<GenerateBody>, JsonRejection>,
) -> ApiResult<MagicFillDraft> {
    let Json(body) = body?;
    let idea = required(body.prompt, "Prompt is required")?;
    let llm = state.llm()?;
    let draft = magic_fill(llm, &idea, state.config.extraction.excerpt_chars).await?;
    Ok(Json(draft))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyseBody {
    #[serde(default)]
    mode: Option<ExtractionMode>,
    #[serde(default)]
    target_platform: TargetPlatform,
    #[serde(default)]
    source: Option<String>,
}

pub async fn analyse(
    State(state): State<Arc<AppState>>,
    body: Result<Json<AnalyseBody>, JsonRejection>,
) -> ApiResult<StyleAnalysis> {
    let Json(body) = body?;
    let source = required(body.source, "Source is required")?;
    let mode = body
        .mode
        .ok_or_else(|| CoreError::invalid_input("Mode is required"))?;
    let llm = state.llm()?;

    let request = AnalyseRequest {
        mode,
        target_platform: body.target_platform,
        source,
    };
    let analysis = analyse_style(llm, &request, &state.config.extraction).await?;
    Ok(Json(analysis))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentBody {
    #[serde(default)]
    style_system: Option<StyleSystem>,
    #[serde(default)]
    component_name: Option<String>,
    #[serde(default)]
    component_context: Option<ComponentContext>,
    #[serde(default)]
    user_instruction: Option<String>,
}

pub async fn component(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ComponentBody>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(body) = body?;
    let (Some(style_system), Some(component_name)) = (
        body.style_system,
        body.component_name.filter(|n| !is_blank(n)),
    ) else {
        return Err(CoreError::invalid_input("StyleSystem and ComponentName are required").into());
    };
    let llm = state.llm()?;

    let request = ComponentRequest {
        style_system,
        component_name,
        component_context: body.component_context,
        user_instruction: body.user_instruction,
    };
    let code = generate_component(llm, &request, state.config.extraction.excerpt_chars).await?;
    Ok(Json(json!({ "code": code })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseBody {
    #[serde(default)]
    topic_id: Option<String>,
}

pub async fn course(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Json<CourseBody>, JsonRejection>,
) -> ApiResult<Value> {
    let authenticated = headers
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| !is_blank(v));
    if !authenticated {
        return Err(CoreError::Unauthorized.into());
    }

    let Json(body) = body?;
    let topic_id = required(body.topic_id, "Topic ID is required")?;
    if state.courses.fetch_topic(&topic_id).await?.is_none() {
        return Err(CoreError::NotFound("Topic not found".to_string()).into());
    }
    let llm = state.llm()?;

    let course_id = generate_course(
        llm,
        state.courses.as_ref(),
        &topic_id,
        state.config.extraction.excerpt_chars,
    )
    .await?;
    Ok(Json(json!({ "courseId": course_id })))
}

pub async fn diagnostics(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<DiagnosticsReport>) {
    let report = run_diagnostics(&state.config, state.dry_run).await;
    let status = if report.healthy() {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(report))
}

fn required(value: Option<String>, message: &str) -> Result<String, CoreError> {
    value
        .filter(|v| !is_blank(v))
        .ok_or_else(|| CoreError::invalid_input(message))
}
