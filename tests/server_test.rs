//! HTTP boundary tests: routing, validation order and status mapping

mod common;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use common::{single, ScriptedClient, STYLE_JSON};
use corestack::config::Config;
use corestack::course::{CourseStore, LearningTopic, MemoryCourseStore};
use corestack::llm::{FallbackClient, MockLlmClient};
use corestack::server::handlers::USER_ID_HEADER;
use corestack::server::{router, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn keyless_config() -> Config {
    let mut config = Config::default();
    config.llm.api_key_envs = vec!["CORESTACK_TEST_KEY_THAT_IS_NEVER_SET".to_string()];
    config
}

fn topics() -> Arc<dyn CourseStore> {
    Arc::new(MemoryCourseStore::with_topics(vec![LearningTopic {
        id: "t1".to_string(),
        title: "Rust Ownership".to_string(),
        description: None,
        context_area: None,
        difficulty: "basic".to_string(),
    }]))
}

/// Router whose client could not be built: every model-backed route is a
/// configuration error once input checks pass.
fn unconfigured_app() -> Router {
    router(Arc::new(AppState::new(keyless_config(), topics(), false)))
}

fn app_with(llm: FallbackClient) -> Router {
    router(Arc::new(AppState::with_client(Config::default(), llm, topics())))
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_as_user(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header(USER_ID_HEADER, "user-42")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_health() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(unconfigured_app(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_generate_missing_prompt_is_bad_request() {
    let (status, body) = send(unconfigured_app(), post("/api/generate", json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "invalid_input");
}

#[tokio::test]
async fn test_generate_without_credentials_is_configuration_error() {
    let (status, body) = send(
        unconfigured_app(),
        post("/api/generate", json!({"prompt": "pet sitting app"})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["kind"], "configuration_error");
}

#[tokio::test]
async fn test_generate_success_with_mock() {
    let llm = FallbackClient::new(Box::new(MockLlmClient::new()));
    let (status, body) = send(
        app_with(llm),
        post("/api/generate", json!({"prompt": "pet sitting app"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["projectName"], "PetPal");
    assert!(body["entities"].as_array().is_some_and(|e| !e.is_empty()));
}

#[tokio::test]
async fn test_analyse_requires_source() {
    let (status, body) = send(
        unconfigured_app(),
        post("/api/style/analyse", json!({"mode": "css"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "invalid_input");
}

#[tokio::test]
async fn test_analyse_bad_image_is_bad_request() {
    let client = ScriptedClient::new("primary").reply(STYLE_JSON);
    let (status, _) = send(
        app_with(single(&client)),
        post(
            "/api/style/analyse",
            json!({"mode": "image", "source": "data:image/png;base64"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn test_analyse_returns_system_and_prompt() {
    let client = ScriptedClient::new("primary").reply(STYLE_JSON);
    let (status, body) = send(
        app_with(single(&client)),
        post(
            "/api/style/analyse",
            json!({"mode": "description", "targetPlatform": "cursor", "source": "clean blue SaaS"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["styleSystem"]["colors"]["primary"], "#2563eb");
    assert!(body["stylePrompt"].as_str().unwrap().contains("COLORS:"));
}

#[tokio::test]
async fn test_malformed_model_output_is_server_error_with_excerpt() {
    let client = ScriptedClient::new("primary").reply("I'd rather not");
    let (status, body) = send(
        app_with(single(&client)),
        post("/api/style/analyse", json!({"mode": "css", "source": "a{}"})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["kind"], "malformed_model_output");
    assert_eq!(body["excerpt"], "I'd rather not");
}

#[tokio::test]
async fn test_component_requires_style_and_name() {
    let (status, _) = send(
        unconfigured_app(),
        post(
            "/api/style/generate-component",
            json!({"componentName": "Button"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_component_success() {
    let style: Value = serde_json::from_str(STYLE_JSON).unwrap();
    let llm = FallbackClient::new(Box::new(MockLlmClient::new()));
    let (status, body) = send(
        app_with(llm),
        post(
            "/api/style/generate-component",
            json!({"styleSystem": style, "componentName": "Button"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["code"].as_str().unwrap().starts_with('<'));
}

#[tokio::test]
async fn test_course_requires_authenticated_caller() {
    let (status, body) = send(
        unconfigured_app(),
        post("/api/generate-course", json!({"topicId": "t1"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["kind"], "unauthorized");
}

#[tokio::test]
async fn test_course_requires_topic_id() {
    let (status, _) = send(
        unconfigured_app(),
        post_as_user("/api/generate-course", json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_course_unknown_topic_is_not_found() {
    let (status, body) = send(
        unconfigured_app(),
        post_as_user("/api/generate-course", json!({"topicId": "nope"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "not_found");
}

#[tokio::test]
async fn test_course_success_with_mock() {
    let llm = FallbackClient::new(Box::new(MockLlmClient::new()));
    let (status, body) = send(
        app_with(llm),
        post_as_user("/api/generate-course", json!({"topicId": "t1"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["courseId"].as_str().is_some_and(|id| !id.is_empty()));
}

#[tokio::test]
async fn test_invalid_json_body_is_bad_request() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/generate")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(unconfigured_app(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "invalid_input");
}
