//! Log viewing and download handlers.

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
};

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Current log contents as plain text.
pub async fn get_log(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let contents = state.log.lock().await.contents()?;
    Ok(([(header::CONTENT_TYPE, "text/plain")], contents))
}

/// Current log contents as a file download.
pub async fn download_log(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let log = state.log.lock().await;
    let contents = log.contents()?;
    let file_name = log
        .path()
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "screening_log.txt".to_string());

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        contents,
    ))
}
