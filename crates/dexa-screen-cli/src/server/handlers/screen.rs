//! Upload screening handler.

use axum::{
    body::Bytes,
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use dexa_screen::ScreenReport;

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Shown after every successful upload.
pub const SUCCESS_MESSAGE: &str = "Data screening completed. Check log for details.";

#[derive(Deserialize)]
pub struct UploadParams {
    /// Original file name of the upload.
    pub name: Option<String>,
}

/// Response for the screening endpoint.
#[derive(Serialize)]
pub struct ScreenResponse {
    pub message: String,
    pub report: ScreenReport,
}

/// Screen an uploaded CSV body and append its discrepancies to the log.
pub async fn screen_upload(
    State(state): State<AppState>,
    Query(params): Query<UploadParams>,
    body: Bytes,
) -> Result<Json<ScreenResponse>, ApiError> {
    if body.is_empty() {
        return Err(ApiError::BadRequest("Upload is empty".to_string()));
    }
    let name = params.name.unwrap_or_else(|| "upload.csv".to_string());

    let mut log = state.log.lock().await;
    let report = state.screener.screen_bytes(&body, name, &mut *log)?;

    tracing::info!(
        "Screened {}: {} discrepancies",
        report.source.file,
        report.discrepancies.len()
    );

    Ok(Json(ScreenResponse {
        message: SUCCESS_MESSAGE.to_string(),
        report,
    }))
}
