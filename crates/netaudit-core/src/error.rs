// ── Core error types ──
//
// User-facing errors from netaudit-core. These are NOT API-specific --
// consumers never see HTTP status codes or JSON parse failures directly.
// The `From<netaudit_api::Error>` impl translates transport-layer errors
// into domain-appropriate variants.
//
// Per-device extraction failures are deliberately a separate type:
// they are recovered locally (the device is skipped or the field becomes
// a sentinel) and never abort a run.

use thiserror::Error;

use crate::model::fact::Platform;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to controller at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Report errors ────────────────────────────────────────────────
    #[error("report serialization failed: {0}")]
    Report(#[from] csv::Error),

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A device whose output could not be reduced to a fact.
///
/// This is a skip signal, not a run-fatal condition: the caller logs it
/// and moves on to the next device.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("no extraction rules for platform '{0}'")]
    UnsupportedPlatform(Platform),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<netaudit_api::Error> for CoreError {
    fn from(err: netaudit_api::Error) -> Self {
        match err {
            netaudit_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            netaudit_api::Error::SessionExpired => CoreError::AuthenticationFailed {
                message: "Session expired -- re-authentication required".into(),
            },
            netaudit_api::Error::Transport(ref e) => {
                if e.is_connect() || e.is_timeout() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(|u| u.to_string())
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            netaudit_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            netaudit_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            netaudit_api::Error::Api { message, status } => CoreError::Api {
                message,
                status: Some(status),
            },
            netaudit_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
