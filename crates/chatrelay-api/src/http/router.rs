//! Axum router configuration with middleware.
//!
//! The webhook receiver and hello route live at the root, matching the
//! service's public contract; the session API is under `/api/v1/`.
//! Middleware: CORS, tracing.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/sessions", post(handlers::chat::create_session))
        .route(
            "/sessions/{id}/messages",
            post(handlers::chat::send_message),
        )
        .route(
            "/sessions/{id}/messages/{message_id}/regenerate",
            post(handlers::chat::regenerate_response),
        )
        .route(
            "/sessions/{id}/transcript",
            get(handlers::chat::get_transcript),
        );

    Router::new()
        .route("/", get(homepage))
        .route("/webhook", post(handlers::webhook::receive_webhook))
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET / - Hello route.
async fn homepage() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "Message": "Hello" }))
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
