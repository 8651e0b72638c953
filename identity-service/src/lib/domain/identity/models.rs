use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::identity::errors::IdentityIdError;

/// Identity aggregate entity.
///
/// The persisted user record, keyed by unique email and unique username.
/// Created once by the registration flow; this core never updates or
/// deletes it afterwards.
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: IdentityId,
    pub full_name: String,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub profile_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Identity unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdentityId(pub Uuid);

impl IdentityId {
    /// Mint a fresh random id (UUID v4).
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identity id from its string form.
    ///
    /// # Errors
    /// * `InvalidFormat` - string is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, IdentityIdError> {
        Uuid::parse_str(s)
            .map(IdentityId)
            .map_err(|e| IdentityIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for IdentityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for IdentityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Untrusted signup input as received from the transport layer.
#[derive(Debug, Clone)]
pub struct RegisterCommand {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

/// Untrusted sign-in input as received from the transport layer.
#[derive(Debug, Clone)]
pub struct SigninCommand {
    pub email: String,
    pub password: String,
}

/// Public profile view returned on successful registration or sign-in.
///
/// Never exposes the id, email, or password hash; the id travels only
/// inside the signed access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedProfile {
    pub profile_image: Option<String>,
    pub full_name: String,
    pub username: String,
    pub access_token: String,
}

impl AuthenticatedProfile {
    pub fn new(identity: &Identity, access_token: String) -> Self {
        Self {
            profile_image: identity.profile_image.clone(),
            full_name: identity.full_name.clone(),
            username: identity.username.clone(),
            access_token,
        }
    }
}
