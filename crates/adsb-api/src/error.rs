//! HTTP error response conversion
//!
//! Handlers return `Result<_, HttpAppError>`; anything convertible into
//! `AppError` renders with the same status, body, and log line. Production
//! deployments strip the details in [`crate::middleware::error_details`].

use adsb_core::{AppError, ErrorMetadata, LogLevel};
use adsb_storage::StorageError;
use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    /// Whether this error is recoverable (can be retried)
    pub recoverable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

/// Rendered error body, attached to the response extensions.
#[derive(Debug, Clone)]
pub struct RenderedError(pub ErrorResponse);

impl ErrorResponse {
    /// Same response without the internal error text.
    pub fn without_details(self) -> Self {
        Self {
            details: None,
            error_type: None,
            ..self
        }
    }
}

/// Wrapper type for AppError to implement IntoResponse (orphan rule).
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        })
    }
}

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        HttpAppError(err.into())
    }
}

/// Query string deserialization failures become a 400 in the ErrorResponse format.
impl From<QueryRejection> for HttpAppError {
    fn from(rejection: QueryRejection) -> Self {
        HttpAppError(AppError::InvalidInput(format!(
            "Invalid query parameters: {}",
            rejection.body_text()
        )))
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Error occurred");
        }
    }
}

fn error_body(app_error: &AppError, with_details: bool) -> ErrorResponse {
    ErrorResponse {
        error: app_error.client_message(),
        details: with_details.then(|| app_error.detailed_message()),
        error_type: with_details.then(|| app_error.error_type().to_string()),
        code: app_error.error_code().to_string(),
        recoverable: app_error.is_recoverable(),
        suggested_action: app_error.suggested_action().map(String::from),
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let body = error_body(app_error, !app_error.is_sensitive());

        let mut response = (status, Json(body.clone())).into_response();
        response.extensions_mut().insert(RenderedError(body));
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_storage_error_not_found() {
        let HttpAppError(app_err) = StorageError::NotFound("raw/x".to_string()).into();
        match app_err {
            AppError::NotFound(msg) => assert_eq!(msg, "Object not found: raw/x"),
            _ => panic!("Expected NotFound variant"),
        }
    }

    #[test]
    fn test_from_storage_error_upload_failed() {
        let HttpAppError(app_err) = StorageError::UploadFailed("boom".to_string()).into();
        assert!(matches!(app_err, AppError::Storage(_)));
    }

    #[test]
    fn test_configuration_error_body_keeps_message() {
        let body = error_body(&AppError::missing_bucket(), true);
        assert_eq!(body.code, "CONFIGURATION_ERROR");
        assert!(body.error.contains("BDI_S3_BUCKET"));
        assert_eq!(body.error_type.as_deref(), Some("Configuration"));
        assert!(!body.recoverable);
    }

    #[test]
    fn test_error_body_without_details() {
        let body = error_body(&AppError::Source("GET failed".to_string()), false);
        assert_eq!(body.code, "SOURCE_FETCH_FAILED");
        assert!(body.details.is_none());
        assert!(body.error_type.is_none());

        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("details").is_none());
        assert_eq!(json["recoverable"], serde_json::Value::Bool(true));
    }

    #[test]
    fn test_response_carries_rendered_error() {
        let response = HttpAppError(AppError::missing_bucket()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let RenderedError(body) = response
            .extensions()
            .get::<RenderedError>()
            .cloned()
            .unwrap();
        assert_eq!(body.code, "CONFIGURATION_ERROR");
        assert!(body.details.is_some());

        let stripped = body.without_details();
        assert!(stripped.details.is_none());
        assert!(stripped.error_type.is_none());
        assert_eq!(stripped.code, "CONFIGURATION_ERROR");
    }

    #[test]
    fn test_sensitive_error_renders_without_details() {
        let response = HttpAppError(AppError::Storage("s3 key leaked".to_string())).into_response();
        let RenderedError(body) = response
            .extensions()
            .get::<RenderedError>()
            .cloned()
            .unwrap();
        assert!(body.details.is_none());
    }
}
