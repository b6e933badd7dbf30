//! Shared helpers for command handlers.

use std::path::Path;

use chrono::{Local, NaiveDate};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Read and parse a JSON file for `--from-file` flags.
pub fn read_json_file(path: &Path) -> Result<Value, CliError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| CliError::Validation {
        field: "from-file".into(),
        reason: format!("invalid JSON: {e}"),
    })
}

/// Read a request body from a JSON file, filling in `companyId` when the
/// file leaves it out.
pub fn read_request<T: DeserializeOwned>(path: &Path, company_id: &str) -> Result<T, CliError> {
    let value = with_company(read_json_file(path)?, company_id);
    serde_json::from_value(value).map_err(|e| CliError::Validation {
        field: "from-file".into(),
        reason: e.to_string(),
    })
}

/// Add `companyId` to a JSON object that does not carry one.
pub fn with_company(mut value: Value, company_id: &str) -> Value {
    if let Value::Object(ref mut map) = value {
        map.entry("companyId")
            .or_insert_with(|| Value::String(company_id.to_owned()));
    }
    value
}

/// Parse a `YYYY-MM-DD` flag value.
pub fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| CliError::Validation {
        field: field.into(),
        reason: format!("expected YYYY-MM-DD, got '{raw}'"),
    })
}

/// The given date, or today in local time.
pub fn date_or_today(field: &str, raw: Option<&str>) -> Result<NaiveDate, CliError> {
    raw.map_or_else(|| Ok(Local::now().date_naive()), |d| parse_date(field, d))
}

/// Render an optional value for a table cell.
pub fn or_dash(value: Option<&str>) -> String {
    value.filter(|v| !v.is_empty()).unwrap_or("-").to_owned()
}

/// Two-decimal money formatting.
pub fn money(value: f64) -> String {
    format!("{value:.2}")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn company_is_added_but_never_overwritten() {
        assert_eq!(
            with_company(json!({"name": "Laptop"}), "c1"),
            json!({"name": "Laptop", "companyId": "c1"})
        );
        assert_eq!(
            with_company(json!({"name": "Laptop", "companyId": "c2"}), "c1"),
            json!({"name": "Laptop", "companyId": "c2"})
        );
    }

    #[test]
    fn dates_must_be_iso() {
        assert!(parse_date("from", "2024-02-29").is_ok());
        assert!(parse_date("from", "29/02/2024").is_err());
    }
}
