use axum::{http::StatusCode, routing::get, Router};

/// Liveness routes for the hosting platform's health checks.
pub fn router() -> Router {
    Router::new().route("/", get(health))
}

/// Empty 200 response; carries no information about sync state.
async fn health() -> StatusCode {
    StatusCode::OK
}
