//! Application error type shared by the core and the HTTP boundary.
//!
//! Every failure is reported as one of a small set of kinds:
//!
//! | Variant         | Meaning                                   | HTTP |
//! |-----------------|-------------------------------------------|------|
//! | `Validation`    | malformed destination or custom code      | 400  |
//! | `NotFound`      | no link with the requested code           | 404  |
//! | `Conflict`      | code already taken                        | 409  |
//! | `Unavailable`   | transient store failure, safe to retry    | 503  |
//! | `Internal`      | unexpected failure                        | 500  |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload returned inside `{"error": ...}`.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    Conflict { message: String, details: Value },
    #[error("{message}")]
    Unavailable { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::Unavailable {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Returns true when the caller may retry the operation with backoff.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::Unavailable { .. })
    }

    fn parts(&self) -> (StatusCode, &'static str, &str, &Value) {
        match self {
            AppError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message,
                details,
            ),
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
            AppError::Conflict { message, details } => {
                (StatusCode::CONFLICT, "conflict", message, details)
            }
            AppError::Unavailable { message, details } => (
                StatusCode::SERVICE_UNAVAILABLE,
                "unavailable",
                message,
                details,
            ),
            AppError::Internal { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                message,
                details,
            ),
        }
    }

    /// HTTP status this error maps to at the boundary.
    pub fn status_code(&self) -> StatusCode {
        self.parts().0
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (_, code, message, details) = self.parts();
        ErrorInfo {
            code,
            message: message.to_string(),
            details: details.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

/// Returns true for SQLSTATE codes that signal a transient server condition.
///
/// Covers connection exceptions (class `08`), `too_many_connections`,
/// shutdown and startup states (`57P01`-`57P03`), serialization failures
/// and deadlocks.
pub fn is_transient_sqlstate(code: &str) -> bool {
    code.starts_with("08")
        || matches!(
            code,
            "53300" | "57P01" | "57P02" | "57P03" | "40001" | "40P01"
        )
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error() {
            if db.is_unique_violation() {
                return AppError::conflict(
                    "Short code already exists",
                    json!({ "constraint": db.constraint() }),
                );
            }

            if let Some(code) = db.code()
                && is_transient_sqlstate(&code)
            {
                tracing::warn!(error = %e, sqlstate = %code, "Link store unavailable");
                return AppError::unavailable(
                    "Link store is temporarily unavailable",
                    json!({ "sqlstate": code.to_string() }),
                );
            }
        }

        match e {
            sqlx::Error::RowNotFound => AppError::not_found("Short link not found", json!({})),
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => {
                tracing::warn!(error = %e, "Link store unavailable");
                AppError::unavailable(
                    "Link store is temporarily unavailable",
                    json!({ "reason": e.to_string() }),
                )
            }
            other => {
                tracing::error!(error = %other, "Database error");
                AppError::internal("Database error", json!({}))
            }
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(e.field_errors()).unwrap_or_else(|_| json!({}));
        AppError::bad_request("Request validation failed", details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_sqlstates() {
        for code in [
            "08000", "08006", "08P01", "53300", "57P01", "57P02", "57P03", "40001", "40P01",
        ] {
            assert!(is_transient_sqlstate(code), "{code} should be transient");
        }
    }

    #[test]
    fn test_permanent_sqlstates() {
        // unique_violation, check_violation, undefined_table, syntax_error, disk_full
        for code in ["23505", "23514", "42P01", "42601", "53100"] {
            assert!(!is_transient_sqlstate(code), "{code} should not be transient");
        }
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::bad_request("x", json!({})).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::not_found("x", json!({})).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::conflict("x", json!({})).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::unavailable("x", json!({})).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AppError::internal("x", json!({})).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_only_unavailable_is_retryable() {
        assert!(AppError::unavailable("down", json!({})).is_retryable());
        assert!(!AppError::conflict("taken", json!({})).is_retryable());
        assert!(!AppError::not_found("gone", json!({})).is_retryable());
        assert!(!AppError::bad_request("bad", json!({})).is_retryable());
    }

    #[test]
    fn test_display_uses_message() {
        let err = AppError::conflict("Short code already exists", json!({ "code": "abc123" }));
        assert_eq!(err.to_string(), "Short code already exists");
    }

    #[test]
    fn test_error_info() {
        let info = AppError::not_found("Short link not found", json!({ "code": "zzz999" }))
            .to_error_info();

        assert_eq!(info.code, "not_found");
        assert_eq!(info.message, "Short link not found");
        assert_eq!(info.details["code"], "zzz999");
    }

    #[test]
    fn test_sqlx_row_not_found_maps_to_not_found() {
        let err = AppError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[test]
    fn test_sqlx_pool_timeout_maps_to_unavailable() {
        let err = AppError::from(sqlx::Error::PoolTimedOut);
        assert!(err.is_retryable());
    }
}
