use std::sync::LazyLock;

use regex::Regex;

use crate::identity::errors::ValidationError;

/// Local part, optional dot/hyphen-separated segments, `@`, domain segments,
/// and a 2-3 character top-level segment.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\w+([.-]?\w+)*@\w+([.-]?\w+)*(\.\w{2,3})+$")
        .expect("email pattern is a valid regex")
});

const PASSWORD_MIN_LENGTH: usize = 6;
const PASSWORD_MAX_LENGTH: usize = 20;
const NAME_MIN_LENGTH: usize = 3;

/// Validate raw signup input. Pure and deterministic; the first violated
/// rule wins and nothing else is evaluated.
pub fn validate_signup(
    full_name: &str,
    email: &str,
    password: &str,
) -> Result<(), ValidationError> {
    if full_name.is_empty() || email.is_empty() || password.is_empty() {
        return Err(ValidationError::MissingField);
    }

    if full_name.chars().count() < NAME_MIN_LENGTH {
        return Err(ValidationError::NameTooShort);
    }

    if !EMAIL_PATTERN.is_match(email) {
        return Err(ValidationError::InvalidEmail);
    }

    if !is_strong_password(password) {
        return Err(ValidationError::WeakPassword);
    }

    Ok(())
}

/// 6-20 characters with at least one ASCII digit, one lowercase, and one
/// uppercase letter. Checked by character class rather than regex; the
/// original lookahead pattern has no equivalent in the `regex` crate.
fn is_strong_password(password: &str) -> bool {
    let length = password.chars().count();
    if !(PASSWORD_MIN_LENGTH..=PASSWORD_MAX_LENGTH).contains(&length) {
        return false;
    }

    password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
}
