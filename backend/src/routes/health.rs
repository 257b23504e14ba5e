use axum::{http::StatusCode, response::IntoResponse};

#[allow(clippy::unused_async)]
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
