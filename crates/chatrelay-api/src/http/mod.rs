//! HTTP layer for Chatrelay.
//!
//! Axum-based server: the webhook receiver, the hello and health routes,
//! and the session API under `/api/v1/`.

pub mod error;
pub mod handlers;
pub mod router;

use std::net::SocketAddr;

use crate::state::AppState;

/// Bind and serve the HTTP API until the process is stopped.
pub async fn serve(state: AppState, addr: SocketAddr) -> anyhow::Result<()> {
    let router = router::build_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "chatrelay listening");
    axum::serve(listener, router).await?;
    Ok(())
}
