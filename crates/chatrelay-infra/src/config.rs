//! Environment-based configuration for Chatrelay.
//!
//! The credential for the remote provider is supplied externally via
//! `OPENAI_API_KEY`; it is wrapped in [`SecretString`] immediately and never
//! appears in `Debug` output or logs. Everything else has a default.

use std::net::SocketAddr;

use secrecy::SecretString;
use thiserror::Error;

/// Default model identifier when `CHATRELAY_MODEL` is unset.
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default bind address when `CHATRELAY_BIND` is unset.
const DEFAULT_BIND: &str = "127.0.0.1:8000";

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,

    #[error("invalid bind address '{0}'")]
    InvalidBindAddr(String),
}

/// Service configuration resolved from the environment.
pub struct RelayConfig {
    /// Remote provider credential, exposed only when building auth headers.
    pub api_key: SecretString,
    /// Model identifier sent with every completion request.
    pub model: String,
    /// Override for the provider base URL (proxies, test servers).
    pub base_url: Option<String>,
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// Shared secret for webhook signature verification, when enabled.
    pub webhook_secret: Option<SecretString>,
}

impl RelayConfig {
    /// Resolve configuration from process environment variables.
    ///
    /// - `OPENAI_API_KEY` -- required
    /// - `CHATRELAY_MODEL` -- defaults to `gpt-4o-mini`
    /// - `CHATRELAY_BASE_URL` -- optional provider override
    /// - `CHATRELAY_BIND` -- defaults to `127.0.0.1:8000`
    /// - `CHATRELAY_WEBHOOK_SECRET` -- optional; enables signature checks
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::build(|key| match std::env::var(key) {
            Ok(value) => Some(value),
            Err(std::env::VarError::NotPresent) => None,
            // Env var exists but has invalid Unicode -- treat as not set,
            // since all of these must be valid strings.
            Err(std::env::VarError::NotUnicode(_)) => None,
        })
    }

    fn build(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup("OPENAI_API_KEY")
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let model = lookup("CHATRELAY_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let base_url = lookup("CHATRELAY_BASE_URL");

        let bind = lookup("CHATRELAY_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind_addr = bind
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidBindAddr(bind))?;

        let webhook_secret = lookup("CHATRELAY_WEBHOOK_SECRET").map(SecretString::from);

        Ok(Self {
            api_key: SecretString::from(api_key),
            model,
            base_url,
            bind_addr,
            webhook_secret,
        })
    }
}
