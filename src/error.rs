//! Error types for EquipTrack server

use std::collections::BTreeMap;

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use thiserror::Error;
use validator::ValidationErrors;

/// Per-field validation messages keyed by camelCase field name
pub type FieldErrors = BTreeMap<String, String>;

const INTEGRITY_MESSAGE: &str =
    "Data integrity violation. The record may already exist or is referenced by another record.";

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Validation failed on {} field(s)", .0.len())]
    InvalidFields(FieldErrors),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Business rule violation: {0}")]
    BusinessRule(String),
}

impl AppError {
    pub fn not_found(resource: &str, id: i64) -> Self {
        AppError::NotFound(format!("{} not found with id: {}", resource, id))
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let fields = errors
            .field_errors()
            .into_iter()
            .filter_map(|(field, errors)| {
                let first = errors.first()?;
                let message = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| first.code.to_string());
                Some((camel_case(&field), message))
            })
            .collect();
        AppError::InvalidFields(fields)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Error response body
#[skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// HTTP status code
    pub status: u16,
    /// Reason phrase, e.g. `Not Found`
    pub error: String,
    pub message: String,
    pub field_errors: Option<FieldErrors>,
    pub timestamp: DateTime<Utc>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut field_errors = None;
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Validation(msg) | AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::InvalidFields(fields) => {
                field_errors = Some(fields);
                (StatusCode::BAD_REQUEST, "One or more fields are invalid".to_string())
            }
            AppError::Database(e) if is_integrity_violation(&e) => {
                tracing::warn!("Integrity violation: {:?}", e);
                (StatusCode::CONFLICT, INTEGRITY_MESSAGE.to_string())
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string())
            }
            AppError::BusinessRule(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
        };

        let error = match status {
            StatusCode::BAD_REQUEST if field_errors.is_some() => "Validation Failed".to_string(),
            StatusCode::UNPROCESSABLE_ENTITY => "Business Rule Violation".to_string(),
            other => other.canonical_reason().unwrap_or("Error").to_string(),
        };

        let body = Json(ErrorResponse {
            status: status.as_u16(),
            error,
            message,
            field_errors,
            timestamp: Utc::now(),
        });

        (status, body).into_response()
    }
}

/// Postgres class 23 covers unique, foreign key and check violations
fn is_integrity_violation(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(db) => db.code().is_some_and(|code| code.starts_with("23")),
        _ => false,
    }
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
