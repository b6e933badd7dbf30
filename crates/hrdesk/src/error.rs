//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors with
//! actionable help text and a process exit code.

use miette::Diagnostic;
use thiserror::Error;

use hrdesk_config::ConfigError;
use hrdesk_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const UNAVAILABLE: i32 = 5;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Network error: unable to reach the server")]
    #[diagnostic(
        code(hrdesk::network),
        help(
            "Check api_url / attendance_url in your profile and that the backend is up.\n\
             Cause: {reason}"
        )
    )]
    Network { reason: String },

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(hrdesk::timeout),
        help("Increase the timeout with --timeout or check backend responsiveness.")
    )]
    Timeout { seconds: u64 },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(hrdesk::auth_failed),
        help(
            "The token is missing or expired.\n\
             Run: hrdesk session login --company <ID>  or  hrdesk config set-token"
        )
    )]
    AuthFailed { message: String },

    #[error("No token configured for profile '{profile}'")]
    #[diagnostic(
        code(hrdesk::no_credentials),
        help(
            "Configure one with: hrdesk config init\n\
             Or set the HRDESK_TOKEN environment variable."
        )
    )]
    NoCredentials { profile: String },

    #[error("No company ID configured for profile '{profile}'")]
    #[diagnostic(
        code(hrdesk::no_company),
        help("Pass --company, run: hrdesk config set company_id <ID>, or log in a session.")
    )]
    NoCompany { profile: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(hrdesk::not_found),
        help("Run: hrdesk {list_command} to see what exists")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("{feature} are not available on this server")]
    #[diagnostic(
        code(hrdesk::unavailable),
        help("Set notes_local_fallback = true in the profile to keep notes locally instead.")
    )]
    FeatureUnavailable { feature: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(hrdesk::api_error))]
    ApiError { status: Option<u16>, message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(hrdesk::validation))]
    Validation { field: String, reason: String },

    #[error("The onboarding draft has {count} problem(s); first on the {tab} tab")]
    #[diagnostic(
        code(hrdesk::invalid_draft),
        help("Fix the fields listed above, then run: hrdesk validate <DRAFT>")
    )]
    InvalidDraft { count: usize, tab: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(hrdesk::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: hrdesk config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Configuration file not found")]
    #[diagnostic(
        code(hrdesk::no_config),
        help(
            "Create one with: hrdesk config init\n\
             Expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(hrdesk::config))]
    Config(Box<ConfigError>),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(hrdesk::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Network { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::FeatureUnavailable { .. } => exit_code::UNAVAILABLE,
            Self::ApiError {
                status: Some(409), ..
            } => exit_code::CONFLICT,
            Self::ApiError {
                status: Some(404), ..
            } => exit_code::NOT_FOUND,
            Self::Validation { .. }
            | Self::InvalidDraft { .. }
            | Self::NoCompany { .. }
            | Self::ProfileNotFound { .. }
            | Self::NoConfig { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Network { reason } => CliError::Network { reason },

            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },

            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },

            CoreError::NotFound {
                entity_type,
                identifier,
            } => CliError::NotFound {
                list_command: format!("{}s list", entity_type.to_lowercase()),
                resource_type: entity_type,
                identifier,
            },

            CoreError::FeatureUnavailable { feature } => CliError::FeatureUnavailable { feature },

            CoreError::ValidationFailed { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },

            CoreError::Api { message, status } => CliError::ApiError { status, message },

            CoreError::Config { message } => CliError::Validation {
                field: "configuration".into(),
                reason: message,
            },

            CoreError::Internal(message) => CliError::ApiError {
                status: None,
                message,
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::NoCompany { profile } => CliError::NoCompany { profile },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            other => CliError::Config(Box::new(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_rejections_keep_their_message() {
        let err = CliError::from(CoreError::Api {
            message: "Department name already exists".into(),
            status: Some(409),
        });
        assert_eq!(err.to_string(), "Department name already exists");
        assert_eq!(err.exit_code(), exit_code::CONFLICT);
    }

    #[test]
    fn unavailable_notes_have_their_own_exit_code() {
        let err = CliError::from(CoreError::FeatureUnavailable {
            feature: "Lead notes".into(),
        });
        assert_eq!(err.exit_code(), exit_code::UNAVAILABLE);
    }

    #[test]
    fn missing_company_is_a_usage_error() {
        let err = CliError::from(ConfigError::NoCompany {
            profile: "default".into(),
        });
        assert_eq!(err.exit_code(), exit_code::USAGE);
    }
}
