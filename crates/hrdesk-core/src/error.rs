// ── Core error types ──
//
// User-facing errors from hrdesk-core. Slices store these as display
// strings; callers get the typed value. The `From<hrdesk_api::Error>` impl
// translates transport-layer errors into domain-appropriate variants.

use thiserror::Error;

/// Shown when a request never reached the server.
pub const NETWORK_FALLBACK: &str = "Network error: unable to reach the server";

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Network error: unable to reach the server ({reason})")]
    Network { reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("{feature} are not available on this server")]
    FeatureUnavailable { feature: String },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    /// `message` is the server's own text, or the generic status line.
    #[error("{message}")]
    Api { message: String, status: Option<u16> },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// The string stored in a slice's `error` field on rejection.
    ///
    /// Server validation text and generic status lines pass through as-is;
    /// unreachable-server failures collapse to [`NETWORK_FALLBACK`].
    pub fn display_message(&self) -> String {
        match self {
            Self::Network { .. } => NETWORK_FALLBACK.to_owned(),
            Self::Api { message, .. } => message.clone(),
            Self::AuthenticationFailed { message } => message.clone(),
            other => other.to_string(),
        }
    }

    /// HTTP status code, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => *status,
            Self::AuthenticationFailed { .. } => Some(401),
            _ => None,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<hrdesk_api::Error> for CoreError {
    fn from(err: hrdesk_api::Error) -> Self {
        match err {
            hrdesk_api::Error::Unauthorized { message } => {
                CoreError::AuthenticationFailed { message }
            }
            hrdesk_api::Error::InvalidToken(reason) => CoreError::AuthenticationFailed {
                message: format!("invalid bearer token: {reason}"),
            },
            hrdesk_api::Error::Transport(ref e) => {
                if e.is_connect() || e.is_request() || e.is_timeout() {
                    CoreError::Network {
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            hrdesk_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            hrdesk_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            hrdesk_api::Error::Tls(reason) => CoreError::Network {
                reason: format!("TLS error: {reason}"),
            },
            http @ hrdesk_api::Error::Http { .. } => CoreError::Api {
                status: http.status(),
                message: http.to_string(),
            },
            hrdesk_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
            hrdesk_api::Error::Attachment { field, reason } => CoreError::ValidationFailed {
                message: format!("{field}: {reason}"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_wins() {
        let err = CoreError::from(hrdesk_api::Error::Http {
            status: 400,
            message: Some("IFSC code is invalid".into()),
        });
        assert_eq!(err.display_message(), "IFSC code is invalid");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn generic_status_message_without_body() {
        let err = CoreError::from(hrdesk_api::Error::Http {
            status: 503,
            message: None,
        });
        assert_eq!(
            err.display_message(),
            "Request failed with status code 503"
        );
    }

    #[test]
    fn network_failures_use_fallback() {
        let err = CoreError::Network {
            reason: "connection refused".into(),
        };
        assert_eq!(err.display_message(), NETWORK_FALLBACK);
    }

    #[test]
    fn unavailable_feature_message() {
        let err = CoreError::FeatureUnavailable {
            feature: "Lead notes".into(),
        };
        assert_eq!(
            err.display_message(),
            "Lead notes are not available on this server"
        );
    }
}
