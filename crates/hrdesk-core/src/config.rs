// ── Runtime console configuration ──
//
// These types describe *where* the backend lives and *who* is calling.
// They carry credential data and behavior switches, but never touch disk.
// The CLI resolves a profile into a `ConsoleConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use hrdesk_api::AuthContext;
use url::Url;

/// Default pause before an availability check is sent.
pub const DEFAULT_AVAILABILITY_DEBOUNCE: Duration = Duration::from_millis(500);

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed development backends).
    DangerAcceptInvalid,
}

/// Configuration for one console session against one company.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Main REST API base URL.
    pub api_url: Url,
    /// Attendance microservice base URL.
    pub attendance_url: Url,
    /// Bearer token and tenant identifiers.
    pub auth: AuthContext,
    pub tls: TlsVerification,
    /// Client-wide request ceiling. `None` leaves requests unbounded
    /// except where an endpoint sets its own.
    pub timeout: Option<Duration>,
    /// On HTTP 405 from the notes endpoints, mutate the local slice with a
    /// client-generated ID instead of failing.
    pub notes_local_fallback: bool,
    pub availability_debounce: Duration,
}

impl ConsoleConfig {
    pub fn new(api_url: Url, attendance_url: Url, auth: AuthContext) -> Self {
        Self {
            api_url,
            attendance_url,
            auth,
            tls: TlsVerification::default(),
            timeout: None,
            notes_local_fallback: false,
            availability_debounce: DEFAULT_AVAILABILITY_DEBOUNCE,
        }
    }
}
