//! Aircraft snapshot endpoints: copy the day's snapshots into storage, then
//! mirror them locally for preparation.

use crate::error::{ErrorResponse, HttpAppError};
use crate::services::{upload_status, DEFAULT_FILE_LIMIT};
use crate::state::AppState;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Json,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

fn default_file_limit() -> i64 {
    DEFAULT_FILE_LIMIT
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DownloadQuery {
    /// Maximum number of snapshots to upload. Zero or a negative value uploads nothing.
    #[serde(default = "default_file_limit")]
    pub file_limit: i64,
}

#[utoipa::path(
    post,
    path = "/api/s4/aircraft/download",
    tag = "s4",
    params(DownloadQuery),
    responses(
        (status = 200, description = "Number of snapshots uploaded", body = String),
        (status = 400, description = "file_limit is not an integer", body = ErrorResponse),
        (status = 500, description = "Bucket not configured or storage failure", body = ErrorResponse),
        (status = 502, description = "Snapshot fetch failed after a successful probe", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, query))]
pub async fn download_data(
    State(state): State<Arc<AppState>>,
    query: Result<Query<DownloadQuery>, QueryRejection>,
) -> Result<Json<String>, HttpAppError> {
    let Query(query) = query?;
    let started = std::time::Instant::now();

    let uploaded = state.downloader.download(query.file_limit).await?;

    tracing::info!(
        file_limit = query.file_limit,
        uploaded,
        duration_ms = started.elapsed().as_millis() as u64,
        "Download request completed"
    );

    Ok(Json(upload_status(uploaded)))
}

#[utoipa::path(
    post,
    path = "/api/s4/aircraft/prepare",
    tag = "s4",
    responses(
        (status = 200, description = "Status returned by the preparation step", body = String),
        (status = 500, description = "Bucket not configured, storage or preparation failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn prepare_data(State(state): State<Arc<AppState>>) -> Result<Json<String>, HttpAppError> {
    let started = std::time::Instant::now();

    let status = state.localizer.localize().await?;

    tracing::info!(
        duration_ms = started.elapsed().as_millis() as u64,
        "Prepare request completed"
    );

    Ok(Json(status))
}
