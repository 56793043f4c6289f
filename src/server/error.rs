use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{error, warn};

use crate::error::CoreError;

/// HTTP face of a `CoreError`.
#[derive(Debug)]
pub struct ApiError(pub CoreError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            CoreError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            CoreError::Unauthorized => StatusCode::UNAUTHORIZED,
            CoreError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(CoreError::invalid_input(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed ({}): {}", self.0.kind(), self.0);
        } else {
            warn!("Request rejected ({}): {}", self.0.kind(), self.0);
        }

        let mut body = json!({
            "error": self.0.to_string(),
            "kind": self.0.kind(),
        });
        if let Some(excerpt) = self.0.excerpt() {
            body["excerpt"] = json!(excerpt);
        }
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (CoreError::invalid_input("x"), StatusCode::BAD_REQUEST),
            (CoreError::Unauthorized, StatusCode::UNAUTHORIZED),
            (CoreError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (CoreError::Configuration("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (CoreError::ModelInvocation("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (CoreError::schema("x"), StatusCode::INTERNAL_SERVER_ERROR),
            (CoreError::Persistence("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError(err).status(), status);
        }
    }

    #[test]
    fn test_response_status() {
        let response = ApiError(CoreError::NotFound("Topic not found".into())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
