use std::collections::BTreeMap;

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Field name → human-readable messages, the 422 body shape.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// `{message}` body returned for non-validation errors. Only used for
/// documentation; the actual body is built in [`AppError::into_response`].
#[derive(serde::Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}

/// Map a sqlx write error onto the API error shape: unique violations and
/// broken foreign keys come back as 422s keyed by the offending column so
/// forms can attach them to the right input.
pub fn map_sqlx_error(err: sqlx::Error, table: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if let Some(constraint) = db_err.constraint() {
            let field = constraint
                .trim_start_matches(table)
                .trim_start_matches('_')
                .trim_end_matches("_key")
                .trim_end_matches("_fkey")
                .to_string();
            if db_err.is_unique_violation() {
                return AppError::unprocessable_field(
                    &field,
                    &format!("{field} is already in use"),
                );
            }
            if db_err.is_foreign_key_violation() {
                return AppError::unprocessable_field(
                    &field,
                    &format!("referenced {field} does not exist"),
                );
            }
        }
    }
    AppError::database(anyhow::Error::from(err))
}

/// Delete-specific mapping: a foreign-key violation here means other records
/// still reference the row, which is a conflict rather than a field error.
pub fn map_delete_error(err: sqlx::Error, what: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_foreign_key_violation() {
            return AppError::conflict(anyhow::anyhow!(
                "{what} is referenced by other records and cannot be deleted"
            ));
        }
    }
    AppError::database(anyhow::Error::from(err))
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
    pub field_errors: Option<FieldErrors>,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
            field_errors: None,
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn conflict<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::CONFLICT, err)
    }

    pub fn database<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    /// A 422 with field-keyed messages, the shape form controllers map onto
    /// their inputs.
    pub fn unprocessable(field_errors: FieldErrors) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            error: anyhow::anyhow!("Validation failed"),
            field_errors: Some(field_errors),
        }
    }

    /// A 422 carrying a single field's message.
    pub fn unprocessable_field(field: &str, message: &str) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.to_string(), vec![message.to_string()]);
        Self::unprocessable(errors)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = match self.field_errors {
            Some(errors) => Json(json!({ "errors": errors })),
            None => Json(json!({ "message": self.error.to_string() })),
        };

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unprocessable_field_builds_singleton_map() {
        let err = AppError::unprocessable_field("nombre", "nombre is required");
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        let map = err.field_errors.unwrap();
        assert_eq!(map.get("nombre").unwrap(), &vec!["nombre is required".to_string()]);
    }

    #[test]
    fn test_generic_error_has_no_field_map() {
        let err = AppError::not_found(anyhow::anyhow!("Student not found"));
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert!(err.field_errors.is_none());
    }
}
