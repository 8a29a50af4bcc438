use axum::{Router, http::header, response::IntoResponse, routing::get};

use crate::constants::HEALTH_PATH;

/// Liveness probe for the hosting platform. Unknown paths fall through to axum's 404.
pub fn router() -> Router {
    Router::new().route(HEALTH_PATH, get(health))
}

async fn health() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/plain")], "OK")
}

/// Serves the health router until the listener fails.
pub async fn serve(bind_address: &str) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_address).await?;
    tracing::info!(address = %bind_address, "health server listening");
    axum::serve(listener, router()).await
}
