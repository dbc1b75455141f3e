//! Webhook signature verification.
//!
//! Incoming webhook requests may carry an HMAC-SHA256 signature over the
//! raw body (GitHub-style `X-Hub-Signature-256` header). Verification uses
//! the `hmac` crate's constant-time comparison.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Errors from webhook signature verification.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    /// Signature did not match the body.
    #[error("HMAC signature verification failed")]
    VerificationFailed,

    /// Signature header was malformed (not valid hex).
    #[error("malformed signature: {0}")]
    MalformedSignature(String),

    /// Invalid HMAC key.
    #[error("invalid HMAC key: {0}")]
    InvalidKey(String),
}

/// Verify an HMAC-SHA256 signature against a request body.
///
/// The comparison is constant-time (via the `hmac` crate's `verify_slice`).
pub fn verify_hmac_sha256(
    secret: &[u8],
    body: &[u8],
    signature_hex: &str,
) -> Result<(), WebhookError> {
    let expected = hex_decode(signature_hex)
        .ok_or_else(|| WebhookError::MalformedSignature(signature_hex.to_string()))?;

    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| WebhookError::InvalidKey(e.to_string()))?;
    mac.update(body);

    mac.verify_slice(&expected)
        .map_err(|_| WebhookError::VerificationFailed)
}

/// Verify a signature with an optional `sha256=` prefix.
///
/// GitHub-style webhooks send signatures as `sha256=<hex>`; plain hex is
/// accepted too.
pub fn verify_signature(secret: &[u8], body: &[u8], signature: &str) -> Result<(), WebhookError> {
    let hex_sig = signature.strip_prefix("sha256=").unwrap_or(signature);
    verify_hmac_sha256(secret, body, hex_sig)
}

/// Compute the hex-encoded HMAC-SHA256 signature of a body.
///
/// The counterpart of [`verify_hmac_sha256`], used to sign outgoing test
/// requests and fixtures.
pub fn compute_hmac_sha256_hex(secret: &[u8], body: &[u8]) -> Result<String, WebhookError> {
    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| WebhookError::InvalidKey(e.to_string()))?;
    mac.update(body);
    Ok(hex_encode(&mac.finalize().into_bytes()))
}

/// Decode a hex string to bytes. Returns `None` on odd length or non-hex.
fn hex_decode(hex: &str) -> Option<Vec<u8>> {
    if hex.len() % 2 != 0 {
        return None;
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).ok())
        .collect()
}

/// Encode bytes to a lowercase hex string.
fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
