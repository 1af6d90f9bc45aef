//! Field rules shared by the sign-up and change-password forms.
//!
//! These run before any backend call so a malformed submission never leaves
//! the gateway.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("please enter a valid email address")]
    InvalidEmail,

    #[error(
        "password must be at least {MIN_PASSWORD_LEN} characters and include an uppercase letter, a lowercase letter and a number"
    )]
    WeakPassword { field: &'static str },

    #[error("passwords do not match")]
    PasswordMismatch,

    #[error("{field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ValidationError {
    /// The request field the error refers to.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Missing { field }
            | ValidationError::WeakPassword { field }
            | ValidationError::Invalid { field, .. } => field,
            ValidationError::InvalidEmail => "email",
            ValidationError::PasswordMismatch => "confirmPassword",
        }
    }
}

/// Returns the trimmed value, or `Missing` when absent or blank.
///
/// # Errors
///
/// Returns [`ValidationError::Missing`] for `None` or whitespace-only input.
pub fn require<'a>(field: &'static str, value: Option<&'a str>) -> Result<&'a str, ValidationError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ValidationError::Missing { field }),
    }
}

/// # Errors
///
/// Returns [`ValidationError::InvalidEmail`] when `email` does not look like an address.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if EMAIL_RE.is_match(email.trim()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

/// # Errors
///
/// Returns [`ValidationError::WeakPassword`] when the complexity rule fails.
pub fn validate_password(field: &'static str, password: &str) -> Result<(), ValidationError> {
    let long_enough = password.chars().count() >= MIN_PASSWORD_LEN;
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if long_enough && has_lower && has_upper && has_digit {
        Ok(())
    } else {
        Err(ValidationError::WeakPassword { field })
    }
}

/// # Errors
///
/// Returns [`ValidationError::PasswordMismatch`] when the two values differ.
pub fn validate_confirmation(password: &str, confirm: &str) -> Result<(), ValidationError> {
    if password == confirm {
        Ok(())
    } else {
        Err(ValidationError::PasswordMismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_rule() {
        assert!(validate_email("kiri@example.co.nz").is_ok());
        assert!(validate_email("  kiri@example.com ").is_ok());
        assert_eq!(validate_email("kiri@example"), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email("kiri example@x.com"), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email("@example.com"), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn password_rule() {
        assert!(validate_password("password", "Kiwi2024").is_ok());
        for weak in ["short1A", "alllowercase1", "ALLUPPERCASE1", "NoDigitsHere"] {
            assert_eq!(
                validate_password("password", weak),
                Err(ValidationError::WeakPassword { field: "password" }),
                "{weak} should be rejected"
            );
        }
    }

    #[test]
    fn confirmation_rule() {
        assert!(validate_confirmation("Kiwi2024", "Kiwi2024").is_ok());
        assert_eq!(
            validate_confirmation("Kiwi2024", "Kiwi2025"),
            Err(ValidationError::PasswordMismatch)
        );
    }

    #[test]
    fn require_trims_and_rejects_blank() {
        assert_eq!(require("title", Some("  Hello ")), Ok("Hello"));
        assert_eq!(
            require("title", Some("   ")),
            Err(ValidationError::Missing { field: "title" })
        );
        assert_eq!(
            require("title", None),
            Err(ValidationError::Missing { field: "title" })
        );
    }

    #[test]
    fn field_names_errors() {
        assert_eq!(ValidationError::InvalidEmail.field(), "email");
        assert_eq!(ValidationError::PasswordMismatch.field(), "confirmPassword");
        assert_eq!(ValidationError::Missing { field: "amount" }.field(), "amount");
    }
}
