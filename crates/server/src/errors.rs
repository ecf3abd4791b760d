use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use models::ModelError;
use serde::Serialize;
use service::ServiceError;
use tracing::{error, warn};

/// Error body shared by every endpoint: `{"error": <title>, "detail": <message>}`.
#[derive(Debug, Serialize)]
pub struct JsonApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: &str, detail: Option<String>) -> Self {
        Self { status, error: title.to_string(), detail }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Malformed Input", Some(detail.into()))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        let (status, title) = match &e {
            ServiceError::Model(ModelError::Validation(_)) => (StatusCode::BAD_REQUEST, "Malformed Input"),
            ServiceError::NotFound(_) => (StatusCode::NOT_FOUND, "Not Found"),
            ServiceError::VoterNotFound(_) | ServiceError::PollNotFound(_) => {
                (StatusCode::NOT_FOUND, "Reference Not Found")
            }
            ServiceError::AlreadyExists(_) => (StatusCode::CONFLICT, "Already Exists"),
            ServiceError::PartialFailure { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "Partial Failure"),
            ServiceError::Backend(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Backend Unavailable"),
            ServiceError::Corrupt { .. } | ServiceError::Model(ModelError::Encoding(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Serialization Error")
            }
        };
        if status.is_server_error() {
            error!(err = %e, status = status.as_u16(), "request failed");
        } else {
            warn!(err = %e, status = status.as_u16(), "request rejected");
        }
        Self::new(status, title, Some(e.to_string()))
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(err = %rejection.body_text(), "malformed request body");
        Self::bad_request(rejection.body_text())
    }
}
