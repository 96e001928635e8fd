//! Console client errors

use serde::Deserialize;
use thiserror::Error;

use crate::error::FieldErrors;

/// Failure of one call to the record-keeping service
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network failure, timeout or undecodable response
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("Request rejected with status {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Api {
        status: u16,
        message: Option<String>,
        field_errors: FieldErrors,
    },
}

impl ClientError {
    /// Server-provided message, if any
    pub fn message(&self) -> Option<&str> {
        match self {
            ClientError::Api { message, .. } => message.as_deref(),
            ClientError::Transport(_) => None,
        }
    }

    /// Server-provided per-field errors, if any
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ClientError::Api { field_errors, .. } if !field_errors.is_empty() => Some(field_errors),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status().map(|s| s.as_u16()),
        }
    }

    /// Text shown to the user: the server message or `fallback`
    pub fn user_message(&self, fallback: &str) -> String {
        self.message().unwrap_or(fallback).to_string()
    }
}

/// Error body as sent by the service; every field is optional so that
/// bodies from proxies or older servers still decode
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct ApiErrorBody {
    pub message: Option<String>,
    pub field_errors: FieldErrors,
}

pub type ClientResult<T> = Result<T, ClientError>;
