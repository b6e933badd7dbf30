//! CLI configuration: a thin wrapper around `hrdesk_config` that applies
//! `GlobalOpts` overrides (--api-url, --token, --company, ...).

use std::time::Duration;

use secrecy::SecretString;
use tracing::warn;

use hrdesk_core::{AuthContext, ConsoleConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use hrdesk_config::{
    Config, Defaults, KEYRING_SERVICE, Profile, SessionKey, SessionStore, config_path,
    load_config_or_default, open_session, save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Parse a base URL given on the command line or in a prompt.
pub fn parse_url_flag(field: &str, raw: &str) -> Result<url::Url, CliError> {
    Ok(hrdesk_config::parse_url(field, raw)?)
}

/// Build a `ConsoleConfig` from the config file, the active profile, the
/// session file and CLI overrides. Flags win over the profile.
pub fn build_console_config(global: &GlobalOpts) -> Result<ConsoleConfig, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);
    let fallback = Profile::default();
    let profile = match cfg.profiles.get(&profile_name) {
        Some(p) => p,
        // No profile: everything has to come from flags / env.
        None if global.api_url.is_some() => &fallback,
        None => {
            return Err(CliError::NoConfig {
                path: config_path().display().to_string(),
            });
        }
    };

    // 1. URLs (flag > env > profile)
    let api_url = parse_url_flag(
        "api_url",
        global.api_url.as_deref().unwrap_or(&profile.api_url),
    )?;
    // Single-host deployments serve attendance from the API base.
    let attendance_raw = match (&global.attendance_url, profile.attendance_url.as_str()) {
        (Some(url), _) => url.clone(),
        (None, "") => api_url.to_string(),
        (None, url) => url.to_owned(),
    };
    let attendance_url = parse_url_flag("attendance_url", &attendance_raw)?;

    // 2. Identity
    let session = match open_session(profile) {
        Ok(session) => Some(session),
        Err(err) => {
            warn!(error = %err, "ignoring unreadable session file");
            None
        }
    };
    let auth = resolve_auth(profile, &profile_name, session.as_ref(), global)?;

    // 3. TLS verification
    let tls = if global.insecure || profile.insecure.unwrap_or(false) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    let mut config = ConsoleConfig::new(api_url, attendance_url, auth);
    config.tls = tls;
    config.timeout = Some(request_timeout(global.timeout, profile, &cfg.defaults));
    config.notes_local_fallback = profile.notes_local_fallback;
    if let Some(ms) = profile.availability_debounce_ms {
        config.availability_debounce = Duration::from_millis(ms);
    }
    Ok(config)
}

/// `--timeout` when given, else the profile's, else the config default.
fn request_timeout(flag: Option<u64>, profile: &Profile, defaults: &Defaults) -> Duration {
    flag.map_or_else(
        || hrdesk_config::resolve_timeout(profile, defaults),
        Duration::from_secs,
    )
}

/// Token and tenant IDs, with `--token` / `--company` taking priority.
fn resolve_auth(
    profile: &Profile,
    profile_name: &str,
    session: Option<&SessionStore>,
    global: &GlobalOpts,
) -> Result<AuthContext, CliError> {
    let Some(ref token) = global.token else {
        let mut auth = hrdesk_config::resolve_auth(profile, profile_name, session)
            .or_else(|err| match (err, &global.company) {
                // The company flag can stand in for a missing company.
                (hrdesk_config::ConfigError::NoCompany { .. }, Some(company)) => {
                    let token = hrdesk_config::resolve_token(profile, profile_name, session)?;
                    Ok(AuthContext::new(token, company.clone()))
                }
                (err, _) => Err(err),
            })?;
        if let Some(ref company) = global.company {
            auth.company_id.clone_from(company);
        }
        return Ok(auth);
    };

    let company = global
        .company
        .clone()
        .or_else(|| profile.company_id.clone())
        .or_else(|| {
            session
                .and_then(|s| s.get(SessionKey::EmployeeCompanyId).ok().flatten())
        })
        .ok_or_else(|| CliError::NoCompany {
            profile: profile_name.into(),
        })?;
    let auth = AuthContext::new(SecretString::from(token.clone()), company);
    let employee = profile.employee_id.clone().or_else(|| {
        session.and_then(|s| s.get(SessionKey::EmployeeId).ok().flatten())
    });
    Ok(match employee {
        Some(id) => auth.with_employee(id),
        None => auth,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_flag_overrides_only_when_given() {
        let defaults = Defaults {
            timeout: 60,
            ..Defaults::default()
        };
        let profile = Profile {
            timeout: Some(12),
            ..Profile::default()
        };

        assert_eq!(
            request_timeout(None, &profile, &defaults),
            Duration::from_secs(12)
        );
        assert_eq!(
            request_timeout(None, &Profile::default(), &defaults),
            Duration::from_secs(60)
        );
        assert_eq!(
            request_timeout(Some(3), &profile, &defaults),
            Duration::from_secs(3)
        );
    }
}
