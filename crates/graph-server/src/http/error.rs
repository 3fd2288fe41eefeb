//! Maps every core/backend error kind onto the status codes in the HTTP
//! surface table: `400` validation, `422` cycle, `404` unknown vertex, `500`
//! everything else.
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use graph_core::{InsertError, ModelError, TreesError};
use serde::Serialize;

use crate::http::dto::ValidationError;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(status = %self.status, message = %self.message, "request failed");
        }
        (self.status, Json(ErrorBody { error: self.message })).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::new(StatusCode::BAD_REQUEST, e.0)
    }
}

impl From<InsertError> for ApiError {
    fn from(e: InsertError) -> Self {
        match e {
            InsertError::Cycle(reason) => Self::new(StatusCode::UNPROCESSABLE_ENTITY, reason.reason().to_owned()),
            InsertError::Backend(detail) => Self::new(StatusCode::INTERNAL_SERVER_ERROR, detail),
        }
    }
}

impl From<ModelError> for ApiError {
    fn from(e: ModelError) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, e.0)
    }
}

impl From<TreesError> for ApiError {
    fn from(e: TreesError) -> Self {
        match e {
            TreesError::NotFound => Self::new(StatusCode::NOT_FOUND, "vertex not found"),
            TreesError::Backend(detail) => Self::new(StatusCode::INTERNAL_SERVER_ERROR, detail),
        }
    }
}
