//! Registration field validation: email shape, phone length, password
//! strength policy.

use crate::errors::{AppError, AppResult};
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.-]+@([\w-]+\.)+[\w-]{2,4}$").unwrap());

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{10}$").unwrap());

const PASSWORD_SPECIALS: &str = "@$!%*?&";

pub fn validate_email(email: &str) -> AppResult<()> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(AppError::InvalidEmail)
    }
}

pub fn validate_phone(phone: &str) -> AppResult<()> {
    if PHONE_RE.is_match(phone) {
        Ok(())
    } else {
        Err(AppError::InvalidPhone)
    }
}

/// At least 8 characters, one uppercase, one lowercase, one digit and one
/// of `@$!%*?&`, drawn only from that alphabet. Written as character
/// predicates: the lookahead form of this policy is outside the regex
/// crate's grammar.
pub fn validate_password(password: &str) -> AppResult<()> {
    let strong = password.len() >= 8
        && password
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || PASSWORD_SPECIALS.contains(c))
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SPECIALS.contains(c));

    if strong {
        Ok(())
    } else {
        Err(AppError::WeakPassword)
    }
}
