use thiserror::Error;

/// Top-level error type for the `hrdesk-api` crate.
///
/// Covers every failure mode of the REST surface: authentication,
/// transport, HTTP status errors, and payload decoding.
/// `hrdesk-core` collapses these into display strings for slice state.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The server rejected the bearer token (HTTP 401).
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// The token could not be turned into a header value.
    #[error("Invalid bearer token: {0}")]
    InvalidToken(String),

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// TLS or client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── HTTP ────────────────────────────────────────────────────────
    /// Non-success status. `message` is the server-supplied text, if any.
    #[error("{}", http_message(*status, message.as_deref()))]
    Http {
        status: u16,
        message: Option<String>,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// An attachment was refused before upload.
    #[error("Attachment '{field}' rejected: {reason}")]
    Attachment { field: String, reason: String },
}

fn http_message(status: u16, message: Option<&str>) -> String {
    match message {
        Some(m) => m.to_owned(),
        None => format!("Request failed with status code {status}"),
    }
}

impl Error {
    /// HTTP status code, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Unauthorized { .. } => Some(401),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns `true` if the server does not implement the method (HTTP 405).
    pub fn is_method_not_allowed(&self) -> bool {
        self.status() == Some(405)
    }

    /// Returns `true` if the request never reached the server.
    pub fn is_network(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_connect() || e.is_request() || e.is_timeout(),
            Self::Timeout { .. } => true,
            _ => false,
        }
    }

    /// Server-supplied validation message, if the body carried one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Http { message, .. } => message.as_deref(),
            Self::Unauthorized { message } => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_prefers_server_message() {
        let err = Error::Http {
            status: 422,
            message: Some("Department name already exists".into()),
        };
        assert_eq!(err.to_string(), "Department name already exists");
        assert_eq!(err.server_message(), Some("Department name already exists"));
    }

    #[test]
    fn http_error_falls_back_to_status_text() {
        let err = Error::Http {
            status: 500,
            message: None,
        };
        assert_eq!(err.to_string(), "Request failed with status code 500");
        assert!(err.server_message().is_none());
    }

    #[test]
    fn status_predicates() {
        let not_found = Error::Http {
            status: 404,
            message: None,
        };
        assert!(not_found.is_not_found());
        assert!(!not_found.is_method_not_allowed());

        let not_allowed = Error::Http {
            status: 405,
            message: None,
        };
        assert!(not_allowed.is_method_not_allowed());
        assert!(Error::Timeout { timeout_secs: 5 }.is_network());
    }
}
