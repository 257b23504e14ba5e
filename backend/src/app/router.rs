use axum::Router;
use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware;
use axum::middleware::Next;
use axum::response::Response;
use axum::routing::get;
use axum::routing::post;
use tower_http::trace::TraceLayer;

use crate::auth;
use crate::core;
use crate::routes;

/// Server routes: the generation API requires a bearer token, the legacy
/// showcase endpoint and the health check stay public.
pub fn create_router(context: core::ArcContext) -> Router {
    // Create API routes that need ArcContext and auth middleware
    let api_routes = Router::new()
        .route("/api/ai/texts", post(routes::ai::generate_texts))
        .route("/api/ai/generate", post(routes::ai::generate_campaign))
        .layer(middleware::from_fn_with_state(context.clone(), auth_middleware))
        .with_state(context.clone());

    let public_routes = Router::new()
        .route("/ai", get(routes::ai::showcase)) // legacy showcase payload
        .route("/health", get(routes::health::health_check)) // Health check endpoint
        .with_state(context);

    // Combine all routes
    Router::new()
        .merge(api_routes)
        .merge(public_routes)
        .fallback(routes::assets::static_handler) // Serve embedded poster images
        .layer(TraceLayer::new_for_http())
}

async fn auth_middleware(
    State(context): State<core::ArcContext>,
    req: Request<Body>,
    next: Next,
) -> Response {
    match auth::decode_access_token_from_req(&context.jwt, &req) {
        Ok(claims) => {
            tracing::debug!(
                user_id = claims.sub,
                username = claims.username,
                "Authenticated user accessing API"
            );
            next.run(req).await
        }
        Err(e) => {
            tracing::warn!("Unauthorized access attempt: {}", e);
            let mut response = Response::new(axum::body::Body::from("Unauthorized"));
            *response.status_mut() = axum::http::StatusCode::UNAUTHORIZED;
            response
        }
    }
}
