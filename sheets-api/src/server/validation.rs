//! Request validation
//!
//! Row payloads are checked field by field so a client sees every problem in
//! one response. Extractors here reject with [`ApiError::Validation`], which
//! renders as a 422 envelope.

use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use super::response::ApiError;
use crate::sheets::RowData;

const MIN_NAME_LENGTH: usize = 2;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s.]+$").expect("email pattern is valid")
});

/// One field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Check a JSON body against the row schema. Unknown keys are ignored.
pub fn validate_row(body: &Value) -> Result<RowData, Vec<FieldError>> {
    let Some(obj) = body.as_object() else {
        return Err(vec![FieldError::new("body", "Input should be a JSON object")]);
    };

    let mut errors = Vec::new();

    let name = match obj.get("name") {
        None => {
            errors.push(FieldError::new("name", "Field required"));
            None
        }
        Some(Value::String(s)) if s.chars().count() >= MIN_NAME_LENGTH => Some(s.clone()),
        Some(Value::String(_)) => {
            errors.push(FieldError::new(
                "name",
                format!("String should have at least {} characters", MIN_NAME_LENGTH),
            ));
            None
        }
        Some(_) => {
            errors.push(FieldError::new("name", "Input should be a valid string"));
            None
        }
    };

    let email = match obj.get("email") {
        None => {
            errors.push(FieldError::new("email", "Field required"));
            None
        }
        Some(Value::String(s)) if is_valid_email(s) => Some(s.clone()),
        Some(_) => {
            errors.push(FieldError::new(
                "email",
                "value is not a valid email address",
            ));
            None
        }
    };

    let age = match obj.get("age") {
        None => {
            errors.push(FieldError::new("age", "Field required"));
            None
        }
        Some(v) => match v.as_i64() {
            Some(n) if n > 0 => Some(n),
            Some(_) => {
                errors.push(FieldError::new("age", "Input should be greater than 0"));
                None
            }
            None => {
                errors.push(FieldError::new("age", "Input should be a valid integer"));
                None
            }
        },
    };

    match (name, email, age) {
        (Some(name), Some(email), Some(age)) if errors.is_empty() => {
            Ok(RowData { name, email, age })
        }
        _ => Err(errors),
    }
}

pub fn is_valid_email(candidate: &str) -> bool {
    EMAIL_RE.is_match(candidate)
}

/// Body extractor yielding a validated [`RowData`]
#[derive(Debug)]
pub struct ValidRow(pub RowData);

impl<S> FromRequest<S> for ValidRow
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| {
                ApiError::Validation(vec![FieldError::new("body", rejection.body_text())])
            })?;

        validate_row(&body).map(ValidRow).map_err(ApiError::Validation)
    }
}

/// `{row_number}` path segment parsed as an integer.
///
/// Any integer is accepted here; header protection belongs to the gateway.
#[derive(Debug, Clone, Copy)]
pub struct RowNumber(pub i64);

impl<S> FromRequestParts<S> for RowNumber
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let invalid = || {
            ApiError::Validation(vec![FieldError::new(
                "row_number",
                "Input should be a valid integer",
            )])
        };

        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| invalid())?;

        raw.trim().parse::<i64>().map(RowNumber).map_err(|_| invalid())
    }
}
