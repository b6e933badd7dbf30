//! Config subcommand handlers.

use std::collections::HashMap;

use dialoguer::{Input, Select};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Defaults, KEYRING_SERVICE, Profile};
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

/// Format config for display, masking sensitive fields.
fn format_config_redacted(cfg: &Config) -> String {
    use std::fmt::Write;
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "color = \"{}\"", cfg.defaults.color);
    let _ = writeln!(out, "insecure = {}", cfg.defaults.insecure);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);

    let mut names: Vec<_> = cfg.profiles.keys().collect();
    names.sort();
    for name in names {
        let p = &cfg.profiles[name];
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "api_url = \"{}\"", p.api_url);
        if !p.attendance_url.is_empty() {
            let _ = writeln!(out, "attendance_url = \"{}\"", p.attendance_url);
        }
        if let Some(ref c) = p.company_id {
            let _ = writeln!(out, "company_id = \"{c}\"");
        }
        if let Some(ref e) = p.employee_id {
            let _ = writeln!(out, "employee_id = \"{e}\"");
        }
        if p.token.is_some() {
            let _ = writeln!(out, "token = \"****\"");
        }
        if let Some(ref env) = p.token_env {
            let _ = writeln!(out, "token_env = \"{env}\"");
        }
        if let Some(ref s) = p.session_file {
            let _ = writeln!(out, "session_file = \"{}\"", s.display());
        }
        if let Some(ref ca) = p.ca_cert {
            let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
        }
        if let Some(insecure) = p.insecure {
            let _ = writeln!(out, "insecure = {insecure}");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
        if p.notes_local_fallback {
            let _ = writeln!(out, "notes_local_fallback = true");
        }
        if let Some(ms) = p.availability_debounce_ms {
            let _ = writeln!(out, "availability_debounce_ms = {ms}");
        }
    }

    out
}

/// Copy of the config safe to serialize for `--output json|yaml`.
fn redacted(cfg: &Config) -> Config {
    let mut cfg = cfg.clone();
    for profile in cfg.profiles.values_mut() {
        if profile.token.is_some() {
            profile.token = Some("****".into());
        }
    }
    cfg
}

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn keyring_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "keyring".into(),
        reason: format!("keyring unavailable: {e}"),
    }
}

fn store_token_in_keyring(profile_name: &str, token: &str) -> Result<(), CliError> {
    keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/token"))
        .map_err(keyring_err)?
        .set_password(token)
        .map_err(keyring_err)
}

fn profile_names(cfg: &Config) -> String {
    let mut names: Vec<_> = cfg.profiles.keys().cloned().collect();
    names.sort();
    if names.is_empty() {
        "(none)".into()
    } else {
        names.join(", ")
    }
}

fn parse_flag<T: std::str::FromStr>(field: &str, value: &str, hint: &str) -> Result<T, CliError> {
    value.parse().map_err(|_| CliError::Validation {
        field: field.into(),
        reason: hint.into(),
    })
}

/// Apply `config set <key> <value>` to a profile.
fn set_key(profile: &mut Profile, key: &str, value: String) -> Result<(), CliError> {
    match key {
        "api_url" | "api-url" => {
            config::parse_url_flag("api_url", &value)?;
            profile.api_url = value;
        }
        "attendance_url" | "attendance-url" => {
            if !value.is_empty() {
                config::parse_url_flag("attendance_url", &value)?;
            }
            profile.attendance_url = value;
        }
        "company_id" | "company-id" => profile.company_id = Some(value),
        "employee_id" | "employee-id" => profile.employee_id = Some(value),
        "token" => profile.token = Some(value),
        "token_env" | "token-env" => profile.token_env = Some(value),
        "session_file" | "session-file" => profile.session_file = Some(value.into()),
        "ca_cert" | "ca-cert" => profile.ca_cert = Some(value.into()),
        "insecure" => {
            profile.insecure = Some(parse_flag("insecure", &value, "must be 'true' or 'false'")?);
        }
        "timeout" => {
            profile.timeout = Some(parse_flag("timeout", &value, "must be a number (seconds)")?);
        }
        "notes_local_fallback" | "notes-local-fallback" => {
            profile.notes_local_fallback =
                parse_flag("notes_local_fallback", &value, "must be 'true' or 'false'")?;
        }
        "availability_debounce_ms" | "availability-debounce-ms" => {
            profile.availability_debounce_ms = Some(parse_flag(
                "availability_debounce_ms",
                &value,
                "must be a number (milliseconds)",
            )?);
        }
        other => {
            return Err(CliError::Validation {
                field: other.into(),
                reason: format!(
                    "unknown config key '{other}'. Valid keys: api_url, attendance_url, \
                     company_id, employee_id, token, token_env, session_file, ca_cert, \
                     insecure, timeout, notes_local_fallback, availability_debounce_ms"
                ),
            });
        }
    }
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

#[allow(clippy::too_many_lines)]
pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = config::config_path();
            eprintln!("hrdesk configuration wizard");
            eprintln!("   Config path: {}\n", config_path.display());

            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default("default".into())
                .interact_text()
                .map_err(prompt_err)?;

            let api_url: String = Input::new()
                .with_prompt("API base URL")
                .default("http://localhost:8080/api/".into())
                .interact_text()
                .map_err(prompt_err)?;
            config::parse_url_flag("api_url", &api_url)?;

            let attendance_url: String = Input::new()
                .with_prompt("Attendance service URL (blank: same as API)")
                .allow_empty(true)
                .interact_text()
                .map_err(prompt_err)?;
            if !attendance_url.is_empty() {
                config::parse_url_flag("attendance_url", &attendance_url)?;
            }

            let company_id: String = Input::new()
                .with_prompt("Company ID (blank: take it from the session)")
                .allow_empty(true)
                .interact_text()
                .map_err(prompt_err)?;

            let token = rpassword::prompt_password("Bearer token (blank: log in later): ")
                .map_err(prompt_err)?;

            let token_field = if token.is_empty() {
                None
            } else {
                let choices = &[
                    "Store in system keyring (recommended)",
                    "Save to config file (plaintext)",
                ];
                let selection = Select::new()
                    .with_prompt("Where to store the token?")
                    .items(choices)
                    .default(0)
                    .interact()
                    .map_err(prompt_err)?;
                if selection == 0 {
                    store_token_in_keyring(&profile_name, &token)?;
                    eprintln!("   ✓ Token stored in system keyring");
                    None
                } else {
                    Some(token)
                }
            };

            let profile = Profile {
                api_url,
                attendance_url,
                company_id: Some(company_id).filter(|c| !c.is_empty()),
                token: token_field,
                ..Profile::default()
            };

            let mut cfg = config::load_config_or_default();
            if cfg.profiles.is_empty() {
                cfg = Config {
                    default_profile: Some(profile_name.clone()),
                    defaults: Defaults::default(),
                    profiles: HashMap::new(),
                };
            }
            cfg.profiles.insert(profile_name.clone(), profile);
            config::save_config(&cfg)?;

            eprintln!("\n✓ Configuration written to {}", config_path.display());
            eprintln!("  Profile: {profile_name}");
            eprintln!("\n  Test it: hrdesk departments list");
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = redacted(&config::load_config_or_default());
            let out = output::render_single(&global.output, &cfg, format_config_redacted, |_| {
                "config".into()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Set <key> <value> ───────────────────────────────────────
        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_config_or_default();
            let profile_name = config::active_profile_name(global, &cfg);
            let profile = cfg.profiles.entry(profile_name.clone()).or_default();
            set_key(profile, &key, value)?;
            config::save_config(&cfg)?;
            output::success(
                &format!("Set {key} on profile '{profile_name}'"),
                &global.color,
                global.quiet,
            );
            Ok(())
        }

        // ── Profiles ────────────────────────────────────────────────
        ConfigCommand::Profiles => {
            let cfg = config::load_config_or_default();
            let default = cfg.default_profile.as_deref().unwrap_or("default");
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: hrdesk config init");
            } else {
                let mut names: Vec<_> = cfg.profiles.keys().collect();
                names.sort();
                for name in names {
                    let marker = if name == default { " *" } else { "" };
                    println!("{name}{marker}");
                }
            }
            Ok(())
        }

        // ── Use <name> ─────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config_or_default();
            if !cfg.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound {
                    available: profile_names(&cfg),
                    name,
                });
            }
            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            output::success(
                &format!("Default profile set to '{name}'"),
                &global.color,
                global.quiet,
            );
            Ok(())
        }

        // ── SetToken ────────────────────────────────────────────────
        ConfigCommand::SetToken { profile } => {
            let cfg = config::load_config_or_default();
            let profile_name = profile.unwrap_or_else(|| config::active_profile_name(global, &cfg));
            if !cfg.profiles.contains_key(&profile_name) {
                return Err(CliError::ProfileNotFound {
                    available: profile_names(&cfg),
                    name: profile_name,
                });
            }

            let token = rpassword::prompt_password("Bearer token: ").map_err(prompt_err)?;
            if token.is_empty() {
                return Err(CliError::Validation {
                    field: "token".into(),
                    reason: "token cannot be empty".into(),
                });
            }
            store_token_in_keyring(&profile_name, &token)?;
            output::success(
                &format!("Token stored in system keyring for profile '{profile_name}'"),
                &global.color,
                global.quiet,
            );
            Ok(())
        }
    }
}
