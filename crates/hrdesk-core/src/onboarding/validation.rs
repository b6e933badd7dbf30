// ── Per-field validators ──
//
// Pure functions over raw input strings. Empty input is the caller's
// concern: required-ness is decided by the draft's cross-field rules.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Why a single field was rejected. Display text is shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("This field is required")]
    Required,
    #[error("Name may contain only letters, spaces, dots, apostrophes and hyphens")]
    InvalidName,
    #[error("Phone number must be exactly 10 digits")]
    InvalidPhone,
    #[error("Enter a valid email address")]
    InvalidEmail,
    #[error("UAN must be exactly 12 digits")]
    InvalidUan,
    #[error("IFSC must be 4 letters, a zero, then 6 letters or digits")]
    InvalidIfsc,
    #[error("Enter a valid UPI ID (e.g. name@bank)")]
    InvalidUpi,
    #[error("Account number must be 9 to 18 digits")]
    InvalidAccountNumber,
    #[error("Aadhaar number must be exactly 12 digits")]
    InvalidAadhaar,
    #[error("PAN must look like ABCDE1234F")]
    InvalidPan,
    #[error("Pincode must be exactly 6 digits")]
    InvalidPincode,
    #[error("Enter a date as YYYY-MM-DD")]
    InvalidDate,
    #[error("Amount must be a non-negative number")]
    InvalidAmount,
    #[error("Basic salary cannot exceed monthly CTC")]
    BasicExceedsCtc,
    #[error("Attach the document for this ID number")]
    MissingDocument,
    #[error("Enter the ID number for the attached document")]
    MissingDocumentNumber,
}

macro_rules! pattern {
    ($name:ident, $re:literal) => {
        static $name: LazyLock<Regex> =
            LazyLock::new(|| Regex::new($re).expect(concat!("invalid pattern ", $re)));
    };
}

pattern!(NAME, r"^[A-Za-z][A-Za-z .'\-]*$");
pattern!(PHONE, r"^[0-9]{10}$");
pattern!(EMAIL, r"^[^\s@]+@[^\s@]+\.[^\s@]+$");
pattern!(UAN, r"^[0-9]{12}$");
pattern!(IFSC, r"^[A-Z]{4}0[A-Z0-9]{6}$");
pattern!(UPI, r"^[A-Za-z0-9.\-_]{2,256}@[A-Za-z]{2,64}$");
pattern!(ACCOUNT_NUMBER, r"^[0-9]{9,18}$");
pattern!(AADHAAR, r"^[0-9]{12}$");
pattern!(PAN, r"^[A-Z]{5}[0-9]{4}[A-Z]$");
pattern!(PINCODE, r"^[0-9]{6}$");

fn check(re: &Regex, value: &str, err: FieldError) -> Result<(), FieldError> {
    if re.is_match(value.trim()) { Ok(()) } else { Err(err) }
}

pub fn validate_name(value: &str) -> Result<(), FieldError> {
    check(&NAME, value, FieldError::InvalidName)
}

pub fn validate_phone(value: &str) -> Result<(), FieldError> {
    check(&PHONE, value, FieldError::InvalidPhone)
}

pub fn validate_email(value: &str) -> Result<(), FieldError> {
    check(&EMAIL, value, FieldError::InvalidEmail)
}

pub fn validate_uan(value: &str) -> Result<(), FieldError> {
    check(&UAN, value, FieldError::InvalidUan)
}

/// IFSC codes are case-insensitive on input; stored uppercase.
pub fn normalize_ifsc(value: &str) -> String {
    value.trim().to_ascii_uppercase()
}

pub fn validate_ifsc(value: &str) -> Result<(), FieldError> {
    check(&IFSC, &normalize_ifsc(value), FieldError::InvalidIfsc)
}

pub fn validate_upi(value: &str) -> Result<(), FieldError> {
    check(&UPI, value, FieldError::InvalidUpi)
}

pub fn validate_account_number(value: &str) -> Result<(), FieldError> {
    check(&ACCOUNT_NUMBER, value, FieldError::InvalidAccountNumber)
}

/// Aadhaar numbers are often typed in groups of four; spaces are ignored.
pub fn validate_aadhaar(value: &str) -> Result<(), FieldError> {
    let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    check(&AADHAAR, &compact, FieldError::InvalidAadhaar)
}

pub fn validate_pan(value: &str) -> Result<(), FieldError> {
    check(&PAN, &value.trim().to_ascii_uppercase(), FieldError::InvalidPan)
}

pub fn validate_pincode(value: &str) -> Result<(), FieldError> {
    check(&PINCODE, value, FieldError::InvalidPincode)
}

/// Parse a money amount; blank input is `None`.
pub fn parse_amount(value: &str) -> Result<Option<f64>, FieldError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.replace(',', "").parse::<f64>() {
        Ok(n) if n.is_finite() && n >= 0.0 => Ok(Some(n)),
        _ => Err(FieldError::InvalidAmount),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_requires_ten_digits() {
        assert_eq!(validate_phone("12345"), Err(FieldError::InvalidPhone));
        assert_eq!(validate_phone("9876543210"), Ok(()));
        assert_eq!(validate_phone("98765 43210"), Err(FieldError::InvalidPhone));
    }

    #[test]
    fn ifsc_is_normalized_before_matching() {
        assert_eq!(validate_ifsc("SBIN0001234"), Ok(()));
        assert_eq!(validate_ifsc("sbin0001234"), Ok(()));
        assert_eq!(validate_ifsc("SBIN1234"), Err(FieldError::InvalidIfsc));
        assert_eq!(validate_ifsc("SBIN1001234"), Err(FieldError::InvalidIfsc));
        assert_eq!(normalize_ifsc(" hdfc0000123 "), "HDFC0000123");
    }

    #[test]
    fn name_rules() {
        assert!(validate_name("Asha Rao").is_ok());
        assert!(validate_name("D'Souza-Menon").is_ok());
        assert!(validate_name("R2D2").is_err());
        assert!(validate_name(" ").is_err());
    }

    #[test]
    fn identity_numbers() {
        assert!(validate_aadhaar("1234 5678 9012").is_ok());
        assert!(validate_aadhaar("12345678901").is_err());
        assert!(validate_pan("abcde1234f").is_ok());
        assert!(validate_pan("ABCD1234FF").is_err());
        assert!(validate_uan("100200300400").is_ok());
        assert!(validate_uan("10020030040").is_err());
    }

    #[test]
    fn bank_and_contact_fields() {
        assert!(validate_account_number("123456789").is_ok());
        assert!(validate_account_number("12345678").is_err());
        assert!(validate_account_number("1234567890123456789").is_err());
        assert!(validate_upi("asha.rao@okbank").is_ok());
        assert!(validate_upi("asha@").is_err());
        assert!(validate_email("asha@example.com").is_ok());
        assert!(validate_email("asha@example").is_err());
        assert!(validate_pincode("560001").is_ok());
        assert!(validate_pincode("56001").is_err());
    }

    #[test]
    fn amounts() {
        assert_eq!(parse_amount(""), Ok(None));
        assert_eq!(parse_amount("1,20,000"), Ok(Some(120_000.0)));
        assert_eq!(parse_amount("-5"), Err(FieldError::InvalidAmount));
        assert_eq!(parse_amount("abc"), Err(FieldError::InvalidAmount));
    }
}
