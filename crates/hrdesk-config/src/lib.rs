//! Shared configuration for the hrdesk CLI.
//!
//! TOML profiles, token resolution (env + keyring + plaintext + session
//! file), the session store, and translation to
//! `hrdesk_core::ConsoleConfig`. The CLI adds flag-aware wrappers on top.

pub mod session;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use hrdesk_core::{AuthContext, ConsoleConfig, TlsVerification};

pub use session::{SessionKey, SessionStore};

/// Keyring service name; entries are `<profile>/token`.
pub const KEYRING_SERVICE: &str = "hrdesk";

/// Environment variable holding the session passphrase.
pub const SESSION_KEY_ENV: &str = "HRDESK_SESSION_KEY";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no token configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("no company ID configured for profile '{profile}'")]
    NoCompany { profile: String },

    #[error("session store: {message}")]
    Session { message: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named backend profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// One backend deployment and the operator's identity on it.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Main REST API base URL (e.g., "https://hr.example.com/api/").
    pub api_url: String,

    /// Attendance microservice base URL. Empty means `api_url`.
    #[serde(default)]
    pub attendance_url: String,

    /// Company being administered. Falls back to the session file.
    pub company_id: Option<String>,

    /// The operator's own employee ID. Falls back to the session file.
    pub employee_id: Option<String>,

    /// Bearer token (plaintext; prefer keyring or env var).
    pub token: Option<String>,

    /// Environment variable name containing the token.
    pub token_env: Option<String>,

    /// Session file shared with the web console.
    pub session_file: Option<PathBuf>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    pub insecure: Option<bool>,

    pub timeout: Option<u64>,

    /// Apply note changes locally when the server answers 405.
    #[serde(default)]
    pub notes_local_fallback: bool,

    /// Delay before email/phone availability checks fire.
    pub availability_debounce_ms: Option<u64>,
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "hrdesk", "hrdesk")
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("hrdesk");
    p
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback().join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Default session file, used when a profile names none.
pub fn default_session_path() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback().join("session.json"),
        |dirs| dirs.data_dir().join("session.json"),
    )
}

// ── Loading / saving ────────────────────────────────────────────────

/// Load the full Config from file + `HRDESK_` environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file; a missing file yields the defaults.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("HRDESK_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Session ─────────────────────────────────────────────────────────

/// Open the profile's session store, decrypting with `HRDESK_SESSION_KEY`
/// when set.
pub fn open_session(profile: &Profile) -> Result<SessionStore, ConfigError> {
    let path = profile
        .session_file
        .clone()
        .unwrap_or_else(default_session_path);
    let passphrase = std::env::var(SESSION_KEY_ENV).ok().map(SecretString::from);
    SessionStore::open(path, passphrase)
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the bearer token: profile env var, keyring, plaintext config,
/// then the session file.
pub fn resolve_token(
    profile: &Profile,
    profile_name: &str,
    session: Option<&SessionStore>,
) -> Result<SecretString, ConfigError> {
    // 1. Profile's token_env → env var lookup
    if let Some(val) = profile
        .token_env
        .as_deref()
        .and_then(|name| std::env::var(name).ok())
    {
        return Ok(SecretString::from(val));
    }

    // 2. System keyring
    if let Ok(secret) = keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/token"))
        .and_then(|entry| entry.get_password())
    {
        return Ok(SecretString::from(secret));
    }

    // 3. Plaintext in config
    if let Some(ref token) = profile.token {
        return Ok(SecretString::from(token.clone()));
    }

    // 4. Session file
    if let Some(token) = session.map(|s| s.get(SessionKey::Token)).transpose()?.flatten() {
        return Ok(SecretString::from(token));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Build the `AuthContext`: token plus tenant identifiers, with the
/// profile taking precedence over the session file.
pub fn resolve_auth(
    profile: &Profile,
    profile_name: &str,
    session: Option<&SessionStore>,
) -> Result<AuthContext, ConfigError> {
    let token = resolve_token(profile, profile_name, session)?;
    let from_session = |key: SessionKey| -> Result<Option<String>, ConfigError> {
        Ok(session.map(|s| s.get(key)).transpose()?.flatten())
    };

    let company_id = match profile.company_id.clone() {
        Some(id) => id,
        None => from_session(SessionKey::EmployeeCompanyId)?
            .or(from_session(SessionKey::CurrentCompanyId)?)
            .ok_or_else(|| ConfigError::NoCompany {
                profile: profile_name.into(),
            })?,
    };
    let employee_id = match profile.employee_id.clone() {
        Some(id) => Some(id),
        None => from_session(SessionKey::EmployeeId)?,
    };

    let auth = AuthContext::new(token, company_id);
    Ok(match employee_id {
        Some(id) => auth.with_employee(id),
        None => auth,
    })
}

pub fn parse_url(field: &str, raw: &str) -> Result<Url, ConfigError> {
    raw.parse().map_err(|_| ConfigError::Validation {
        field: field.into(),
        reason: format!("invalid URL: {raw}"),
    })
}

/// Request timeout: the profile's own, else the config-wide default.
pub fn resolve_timeout(profile: &Profile, defaults: &Defaults) -> Duration {
    Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout))
}

/// Build a `ConsoleConfig` from a profile alone, no CLI overrides.
pub fn profile_to_console_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
    session: Option<&SessionStore>,
) -> Result<ConsoleConfig, ConfigError> {
    let api_url = parse_url("api_url", &profile.api_url)?;
    let attendance_url = if profile.attendance_url.is_empty() {
        api_url.clone()
    } else {
        parse_url("attendance_url", &profile.attendance_url)?
    };
    let auth = resolve_auth(profile, profile_name, session)?;

    let mut config = ConsoleConfig::new(api_url, attendance_url, auth);
    config.tls = if profile.insecure.unwrap_or(false) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };
    config.timeout = Some(resolve_timeout(profile, defaults));
    config.notes_local_fallback = profile.notes_local_fallback;
    if let Some(ms) = profile.availability_debounce_ms {
        config.availability_debounce = Duration::from_millis(ms);
    }
    Ok(config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn profile() -> Profile {
        Profile {
            api_url: "https://hr.example.com/api/".into(),
            attendance_url: "https://att.example.com/".into(),
            company_id: Some("c1".into()),
            token: Some("tkn".into()),
            ..Profile::default()
        }
    }

    #[test]
    fn profile_builds_console_config() {
        let mut p = profile();
        p.notes_local_fallback = true;
        p.availability_debounce_ms = Some(250);
        p.insecure = Some(true);

        let config = profile_to_console_config(&p, "test-profile-builds", &Defaults::default(), None).unwrap();

        assert_eq!(config.api_url.as_str(), "https://hr.example.com/api/");
        assert_eq!(config.auth.company_id, "c1");
        assert_eq!(config.tls, TlsVerification::DangerAcceptInvalid);
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
        assert!(config.notes_local_fallback);
        assert_eq!(config.availability_debounce, Duration::from_millis(250));
    }

    #[test]
    fn timeout_prefers_profile_then_defaults() {
        let defaults = Defaults {
            timeout: 45,
            ..Defaults::default()
        };
        let mut p = profile();
        assert_eq!(resolve_timeout(&p, &defaults), Duration::from_secs(45));

        p.timeout = Some(5);
        assert_eq!(resolve_timeout(&p, &defaults), Duration::from_secs(5));
    }

    #[test]
    fn invalid_url_names_the_field() {
        let mut p = profile();
        p.attendance_url = "not a url".into();

        let err = profile_to_console_config(&p, "test-invalid-url", &Defaults::default(), None).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "attendance_url"));
    }

    #[test]
    fn tenant_ids_fall_back_to_session_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(
            &path,
            r#"{"token": "from-session", "currentCompanyId": "c7", "employeeId": "\"e3\""}"#,
        )
        .unwrap();
        let session = SessionStore::open(&path, None).unwrap();

        let p = Profile {
            api_url: "https://hr.example.com/".into(),
            attendance_url: "https://att.example.com/".into(),
            ..Profile::default()
        };
        let auth = resolve_auth(&p, "test-session-fallback", Some(&session)).unwrap();

        assert_eq!(auth.company_id, "c7");
        assert_eq!(auth.employee_id.as_deref(), Some("e3"));
    }

    #[test]
    fn missing_company_is_reported() {
        let mut p = profile();
        p.company_id = None;

        let err = resolve_auth(&p, "test-missing-company", None).unwrap_err();
        assert!(matches!(err, ConfigError::NoCompany { .. }));
    }

    #[test]
    fn config_file_round_trips_profiles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut cfg = Config::default();
        cfg.profiles.insert("prod".into(), profile());
        save_config_to(&cfg, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        let prod = &loaded.profiles["prod"];
        assert_eq!(prod.company_id.as_deref(), Some("c1"));
        assert_eq!(loaded.defaults.output, "table");
    }
}
