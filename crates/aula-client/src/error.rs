//! Client-side error taxonomy.
//!
//! Every backend failure lands in one of these variants so callers can react
//! per category: validation errors attach to form fields, authorization and
//! not-found errors become page-level messages, everything else becomes a
//! transient notification.

use std::collections::BTreeMap;

use serde_json::Value;

/// Fallback shown when the response body carries no usable message.
pub const DEFAULT_ERROR_MESSAGE: &str = "Ocurrió un error inesperado. Intenta de nuevo.";

pub type FieldErrorMap = BTreeMap<String, Vec<String>>;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP 422 with field-keyed messages.
    #[error("validation failed")]
    Validation { errors: FieldErrorMap },

    /// HTTP 401/403.
    #[error("{message}")]
    Unauthorized { status: u16, message: String },

    /// HTTP 404.
    #[error("{message}")]
    NotFound { message: String },

    /// Any other non-success status.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The request never produced a response.
    #[error("request failed: {0}")]
    Network(String),

    /// The response arrived but was not the expected shape.
    #[error("could not decode response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Field errors when this is a validation failure.
    pub fn field_errors(&self) -> Option<&FieldErrorMap> {
        match self {
            ClientError::Validation { errors } => Some(errors),
            _ => None,
        }
    }
}

/// Best-effort message extraction from an error body: the `message` key when
/// present, otherwise the static default.
pub fn extract_message(body: &[u8]) -> String {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string())
}

/// Classify a non-success response into the taxonomy.
pub fn classify_response(status: u16, body: &[u8]) -> ClientError {
    match status {
        422 => {
            let errors = serde_json::from_slice::<Value>(body)
                .ok()
                .and_then(|v| {
                    serde_json::from_value::<FieldErrorMap>(v.get("errors")?.clone()).ok()
                })
                .unwrap_or_default();
            if errors.is_empty() {
                // A 422 without the field map still surfaces as a plain error
                ClientError::Http {
                    status,
                    message: extract_message(body),
                }
            } else {
                ClientError::Validation { errors }
            }
        }
        401 | 403 => ClientError::Unauthorized {
            status,
            message: extract_message(body),
        },
        404 => ClientError::NotFound {
            message: extract_message(body),
        },
        _ => ClientError::Http {
            status,
            message: extract_message(body),
        },
    }
}
