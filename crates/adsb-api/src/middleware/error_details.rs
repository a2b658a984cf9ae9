//! Strips internal error details from responses in production.

use crate::error::RenderedError;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

/// Re-render error bodies without `details` and `error_type` when the
/// configured environment is production.
pub async fn error_details_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;

    if !state.config.is_production() {
        return response;
    }

    let Some(RenderedError(body)) = response.extensions().get::<RenderedError>().cloned() else {
        return response;
    };

    (response.status(), Json(body.without_details())).into_response()
}
