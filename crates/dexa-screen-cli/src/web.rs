//! Embedded upload page for the web front end.

use axum::response::{Html, IntoResponse};

const INDEX_HTML: &str = include_str!("../static/index.html");

/// Serve the upload page.
pub async fn index_handler() -> impl IntoResponse {
    Html(INDEX_HTML)
}
