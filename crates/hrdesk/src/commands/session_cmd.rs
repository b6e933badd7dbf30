//! Session subcommand handlers.
//!
//! The session file holds the token and tenant IDs the web console keeps
//! in browser storage. Values are encrypted when `HRDESK_SESSION_KEY` is set.

use crate::cli::{GlobalOpts, SessionArgs, SessionCommand};
use crate::config::{self, Profile, SessionKey, SessionStore};
use crate::error::CliError;
use crate::output;

fn open(global: &GlobalOpts) -> Result<SessionStore, CliError> {
    let cfg = config::load_config_or_default();
    let name = config::active_profile_name(global, &cfg);
    let profile = cfg.profiles.get(&name).cloned().unwrap_or_else(Profile::default);
    Ok(config::open_session(&profile)?)
}

fn mask(token: &str) -> String {
    let tail: String = token
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("****{tail}")
}

pub fn handle(args: SessionArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        SessionCommand::Login { company, employee } => {
            let token = match global.token {
                Some(ref t) => t.clone(),
                None => rpassword::prompt_password("Token: ").map_err(CliError::Io)?,
            };
            if token.trim().is_empty() {
                return Err(CliError::Validation {
                    field: "token".into(),
                    reason: "token cannot be empty".into(),
                });
            }

            let mut session = open(global)?;
            session.set(SessionKey::Token, token.trim())?;
            session.set(SessionKey::EmployeeCompanyId, &company)?;
            session.set(SessionKey::CurrentCompanyId, &company)?;
            match employee {
                Some(ref id) => session.set(SessionKey::EmployeeId, id)?,
                None => {
                    session.remove(SessionKey::EmployeeId);
                }
            }
            session.save()?;

            let how = if session.is_encrypted() {
                "encrypted"
            } else {
                "plaintext"
            };
            output::success(
                &format!("Session saved to {} ({how})", session.path().display()),
                &global.color,
                global.quiet,
            );
            Ok(())
        }

        SessionCommand::Show => {
            let session = open(global)?;
            let mut rows = Vec::new();
            for key in SessionKey::ALL {
                let value = match session.get(key)? {
                    Some(v) if key == SessionKey::Token => mask(&v),
                    Some(v) => v,
                    None => continue,
                };
                rows.push((key.as_str(), value));
            }
            if rows.is_empty() {
                eprintln!("No session. Run: hrdesk session login --company <ID>");
                return Ok(());
            }
            output::print_output(&output::detail(&rows), global.quiet);
            Ok(())
        }

        SessionCommand::Logout => {
            let mut session = open(global)?;
            session.clear();
            session.save()?;
            output::success("Session cleared", &global.color, global.quiet);
            Ok(())
        }
    }
}
