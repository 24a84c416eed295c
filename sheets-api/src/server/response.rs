//! Uniform JSON envelope for every response

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

use super::validation::FieldError;
use crate::sheets::SheetError;

#[derive(Debug, Serialize)]
struct SuccessBody<T> {
    status: &'static str,
    message: String,
    data: T,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    status: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

/// `200 OK` with `{status: "success", message, data}`
#[derive(Debug)]
pub struct ApiResponse<T> {
    message: String,
    data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let body = SuccessBody {
            status: "success",
            message: self.message,
            data: self.data,
        };
        (StatusCode::OK, Json(body)).into_response()
    }
}

/// Every failure a handler can return
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unprocessable Entity")]
    Validation(Vec<FieldError>),
    #[error(transparent)]
    Sheet(#[from] SheetError),
    #[error("Not Found")]
    NotFound,
    #[error("Method Not Allowed")]
    MethodNotAllowed,
    #[error("Internal Server Error")]
    Internal,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Sheet(SheetError::InvalidRowNumber { .. }) => StatusCode::BAD_REQUEST,
            // A status outside 100..=999 can't come from a real response
            ApiError::Sheet(SheetError::RemoteApi { status, .. }) => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ApiError::Sheet(SheetError::RemoteUnexpected { .. }) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn error_response(status: StatusCode, message: impl Into<String>, details: Option<Value>) -> Response {
    let body = ErrorBody {
        status: "error",
        message: message.into(),
        details,
    };
    (status, Json(body)).into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let details = match &self {
            ApiError::Validation(errors) if !errors.is_empty() => Some(json!(errors)),
            _ => None,
        };
        error_response(status, self.to_string(), details)
    }
}
