//! Input validators applied before a request is sent.
//!
//! Each validator is a pure predicate. The use cases turn a `false` into a
//! [`ValidationError`] carrying one of the fixed messages below.

use crate::errors::ValidationError;
use regex::Regex;
use std::sync::OnceLock;

pub const NAME_BLANK_MESSAGE: &str = "Name cannot be blank";
pub const EMAIL_INVALID_MESSAGE: &str = "Invalid email format";
pub const PHONE_INVALID_MESSAGE: &str = "Invalid phone number format";
pub const PASSWORD_WEAK_MESSAGE: &str = "Password must be at least 8 characters, contain a number, an uppercase letter, and a special character";
pub const PASSWORD_BLANK_MESSAGE: &str = "Password cannot be blank";

/// Characters that satisfy the special-character rule of [`is_password_strong`].
pub const PASSWORD_SPECIAL_CHARS: &str = "@#$%^&+=";

const MIN_PASSWORD_LENGTH: usize = 8;

static EMAIL_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
static PHONE_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();

fn matches(pattern: &OnceLock<Option<Regex>>, source: &str, value: &str) -> bool {
    pattern
        .get_or_init(|| Regex::new(source).ok())
        .as_ref()
        .is_some_and(|re| re.is_match(value))
}

/// `local@domain` where both parts use a restricted ASCII alphabet.
///
/// No TLD is required after the last dot, so `a@b` passes.
pub fn is_email_valid(email: &str) -> bool {
    matches(&EMAIL_PATTERN, r"^[A-Za-z0-9+_.-]+@[A-Za-z0-9.-]+$", email)
}

/// Optional leading `+` followed by 10 to 15 digits, no separators.
pub fn is_phone_valid(phone: &str) -> bool {
    // [0-9] rather than \d, which would also match non-ASCII digits
    matches(&PHONE_PATTERN, r"^\+?[0-9]{10,15}$", phone)
}

/// At least 8 characters with a digit, an uppercase ASCII letter and one of
/// `@#$%^&+=`, and no whitespace anywhere.
pub fn is_password_strong(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LENGTH
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| PASSWORD_SPECIAL_CHARS.contains(c))
        && !password.chars().any(char::is_whitespace)
}

/// True when the string has at least one non-whitespace character.
pub fn is_non_blank(value: &str) -> bool {
    !value.trim().is_empty()
}

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    check(is_non_blank(name), "name", NAME_BLANK_MESSAGE)
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    check(is_email_valid(email), "email", EMAIL_INVALID_MESSAGE)
}

pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    check(is_phone_valid(phone), "phone", PHONE_INVALID_MESSAGE)
}

pub fn validate_new_password(password: &str) -> Result<(), ValidationError> {
    check(is_password_strong(password), "password", PASSWORD_WEAK_MESSAGE)
}

/// Login only needs a password to be present, not a strong one.
pub fn validate_login_password(password: &str) -> Result<(), ValidationError> {
    check(is_non_blank(password), "password", PASSWORD_BLANK_MESSAGE)
}

fn check(valid: bool, field: &str, message: &str) -> Result<(), ValidationError> {
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new(field, message))
    }
}
