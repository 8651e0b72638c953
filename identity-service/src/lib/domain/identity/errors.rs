use thiserror::Error;

/// Error for IdentityId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Signup input policy violations, in the order they are checked.
///
/// Messages are the user-facing strings the transport layer returns as-is.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("All fields are required")]
    MissingField,

    #[error("Fullname must be at least 3 characters long")]
    NameTooShort,

    #[error("Email is invalid")]
    InvalidEmail,

    #[error("Password should be 6 to 20 characters long and contain at least one uppercase letter, one lowercase letter and one number")]
    WeakPassword,
}

/// Top-level error for registration and authentication flows.
#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    // Conflicts surfaced by the repository's uniqueness constraints
    #[error("Email already exists")]
    EmailAlreadyExists(String),

    #[error("Username already exists: {0}")]
    UsernameAlreadyExists(String),

    #[error("User not found")]
    NotFound(String),

    // Deliberately covers both a plain mismatch and a malformed stored
    // hash; the internal cause is only distinguishable in server logs.
    #[error("Password is incorrect")]
    IncorrectPassword,

    #[error("Operation timed out: {0}")]
    Timeout(&'static str),

    // Infrastructure errors; detail stays server-side
    #[error("Database error: {0}")]
    Database(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for IdentityError {
    fn from(err: anyhow::Error) -> Self {
        IdentityError::Unknown(err.to_string())
    }
}
