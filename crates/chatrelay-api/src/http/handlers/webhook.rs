//! Webhook receiver handler.
//!
//! Accepts an HTTP POST with an arbitrary JSON body, logs it, and
//! acknowledges with `{"status": "Received"}`. When a webhook secret is
//! configured, the `X-Hub-Signature-256` header is verified against the
//! raw body before the payload is accepted.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use secrecy::ExposeSecret;

use chatrelay_infra::webhook::verify_signature;

use crate::http::error::AppError;
use crate::state::AppState;

/// POST /webhook - Receive an incoming webhook event.
pub async fn receive_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<serde_json::Value>, AppError> {
    if let Some(secret) = &state.webhook_secret {
        let signature = headers
            .get("x-hub-signature-256")
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                AppError::Unauthorized("missing X-Hub-Signature-256 header".to_string())
            })?;
        verify_signature(secret.expose_secret().as_bytes(), &body, signature)
            .map_err(|_| AppError::Unauthorized("webhook signature rejected".to_string()))?;
    }

    let payload: serde_json::Value = serde_json::from_slice(&body)
        .map_err(|e| AppError::Validation(format!("invalid JSON body: {e}")))?;

    tracing::info!(payload = %payload, "webhook received");

    Ok(Json(serde_json::json!({ "status": "Received" })))
}
