//! Value objects for the User aggregate.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use common::combine;

use crate::macros::exception_codes;
use crate::validation::{ensure, ensure_max_chars, ensure_min_chars};
use crate::value_object::ValueObject;

const NAME_MIN_LENGTH: usize = 2;
const NAME_MAX_LENGTH: usize = 50;
const EMAIL_MAX_LENGTH: usize = 254;
const PASSWORD_MIN_LENGTH: usize = 8;
const PASSWORD_MAX_LENGTH: usize = 64;

/// Reasons a first name can be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FirstNameError {
    #[error("First name must be at least 2 characters")]
    TooShort,
    #[error("First name must be at most 50 characters")]
    TooLong,
}

exception_codes!(FirstNameError {
    TooShort => "FIRST_NAME_TOO_SHORT",
    TooLong => "FIRST_NAME_TOO_LONG",
});

/// Reasons a last name can be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LastNameError {
    #[error("Last name must be at least 2 characters")]
    TooShort,
    #[error("Last name must be at most 50 characters")]
    TooLong,
}

exception_codes!(LastNameError {
    TooShort => "LAST_NAME_TOO_SHORT",
    TooLong => "LAST_NAME_TOO_LONG",
});

/// Reasons an email address can be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EmailError {
    #[error("Email address must be at most 254 characters")]
    TooLong,
    #[error("Email address is not valid")]
    InvalidFormat,
}

exception_codes!(EmailError {
    TooLong => "EMAIL_TOO_LONG",
    InvalidFormat => "EMAIL_INVALID_FORMAT",
});

/// Reasons a password can be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error("Password must be at least 8 characters")]
    TooShort,
    #[error("Password must be at most 64 characters")]
    TooLong,
    #[error("Password must contain at least one digit")]
    MustHaveAtLeastOneDigit,
    #[error("Password must contain at least one upper-case letter")]
    MustHaveAtLeastOneUpperCaseLetter,
    #[error("Password must contain at least one lower-case letter")]
    MustHaveAtLeastOneLowerCaseLetter,
    #[error("Password must contain at least one special character")]
    MustHaveAtLeastOneSpecialCharacter,
}

exception_codes!(PasswordError {
    TooShort => "PASSWORD_TOO_SHORT",
    TooLong => "PASSWORD_TOO_LONG",
    MustHaveAtLeastOneDigit => "PASSWORD_MUST_HAVE_AT_LEAST_ONE_DIGIT",
    MustHaveAtLeastOneUpperCaseLetter => "PASSWORD_MUST_HAVE_AT_LEAST_ONE_UPPER_CASE_LETTER",
    MustHaveAtLeastOneLowerCaseLetter => "PASSWORD_MUST_HAVE_AT_LEAST_ONE_LOWER_CASE_LETTER",
    MustHaveAtLeastOneSpecialCharacter => "PASSWORD_MUST_HAVE_AT_LEAST_ONE_SPECIAL_CHARACTER",
});

/// Runs the shared name rules on trimmed input.
fn validate_name<E>(raw: &str, too_short: E, too_long: E) -> Result<String, E> {
    let value = raw.trim();
    combine([
        ensure_min_chars(value, NAME_MIN_LENGTH, too_short),
        ensure_max_chars(value, NAME_MAX_LENGTH, too_long),
    ])?;
    Ok(value.to_string())
}

/// A user's first name, 2 to 50 characters after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FirstName(String);

impl FirstName {
    pub fn create(raw: &str) -> Result<Self, FirstNameError> {
        validate_name(raw, FirstNameError::TooShort, FirstNameError::TooLong).map(Self)
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl ValueObject for FirstName {
    type Props = str;

    fn props(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FirstName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A user's last name, 2 to 50 characters after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LastName(String);

impl LastName {
    pub fn create(raw: &str) -> Result<Self, LastNameError> {
        validate_name(raw, LastNameError::TooShort, LastNameError::TooLong).map(Self)
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl ValueObject for LastName {
    type Props = str;

    fn props(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LastName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// An email address, trimmed and lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    pub fn create(raw: &str) -> Result<Self, EmailError> {
        let value = raw.trim().to_lowercase();
        combine([
            ensure_max_chars(&value, EMAIL_MAX_LENGTH, EmailError::TooLong),
            ensure(is_well_formed_email(&value), EmailError::InvalidFormat),
        ])?;
        Ok(Self(value))
    }

    pub fn value(&self) -> &str {
        &self.0
    }

    /// The part after the `@`.
    pub fn domain(&self) -> &str {
        self.0.split_once('@').map(|(_, domain)| domain).unwrap_or_default()
    }
}

impl ValueObject for Email {
    type Props = str;

    fn props(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::create(&value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

const LOCAL_PART_SPECIALS: &str = "!#$%&'*+/=?^_`{|}~.-";

/// `local@domain.tld` with a dot-atom local part and a host name domain.
fn is_well_formed_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    let local_ok = !local.is_empty()
        && !local.starts_with('.')
        && !local.ends_with('.')
        && !local.contains("..")
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || LOCAL_PART_SPECIALS.contains(c));

    let labels: Vec<&str> = domain.split('.').collect();
    let labels_ok = labels.len() >= 2
        && labels.iter().all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        });
    let tld_ok = labels
        .last()
        .is_some_and(|tld| tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()));

    local_ok && labels_ok && tld_ok
}

/// A password satisfying the strength policy.
///
/// The value is kept as given, without trimming. `Debug` never prints it.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Evaluates every rule and reports the first that fails, in order:
    /// length, then one digit, one upper-case letter, one lower-case letter
    /// and one special character.
    pub fn create(raw: &str) -> Result<Self, PasswordError> {
        combine([
            ensure_min_chars(raw, PASSWORD_MIN_LENGTH, PasswordError::TooShort),
            ensure_max_chars(raw, PASSWORD_MAX_LENGTH, PasswordError::TooLong),
            ensure(
                raw.chars().any(|c| c.is_ascii_digit()),
                PasswordError::MustHaveAtLeastOneDigit,
            ),
            ensure(
                raw.chars().any(char::is_uppercase),
                PasswordError::MustHaveAtLeastOneUpperCaseLetter,
            ),
            ensure(
                raw.chars().any(char::is_lowercase),
                PasswordError::MustHaveAtLeastOneLowerCaseLetter,
            ),
            ensure(
                raw.chars().any(|c| !c.is_alphanumeric() && !c.is_whitespace()),
                PasswordError::MustHaveAtLeastOneSpecialCharacter,
            ),
        ])?;

        Ok(Self(raw.to_string()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }

    /// Compares a candidate against the stored password.
    pub fn matches(&self, candidate: &str) -> bool {
        self.0 == candidate
    }
}

impl ValueObject for Password {
    type Props = str;

    fn props(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password([REDACTED])")
    }
}
