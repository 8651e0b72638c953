use async_trait::async_trait;

use crate::identity::errors::IdentityError;
use crate::identity::models::AuthenticatedProfile;
use crate::identity::models::Identity;
use crate::identity::models::RegisterCommand;
use crate::identity::models::SigninCommand;

/// Port for the registration and authentication flows.
#[async_trait]
pub trait IdentityServicePort: Send + Sync + 'static {
    /// Admit a new identity: validate, hash, allocate a username, persist,
    /// and issue an access token.
    ///
    /// # Errors
    /// * `Validation` - input violates the signup policy; nothing persisted
    /// * `EmailAlreadyExists` - email uniqueness conflict from the store
    /// * `UsernameAlreadyExists` - allocation retry budget exhausted
    /// * `Timeout` / `Database` / `Unknown` - infrastructure failure
    async fn register(
        &self,
        command: RegisterCommand,
    ) -> Result<AuthenticatedProfile, IdentityError>;

    /// Verify a presented email/password pair and issue a fresh token.
    ///
    /// # Errors
    /// * `NotFound` - no identity with this email
    /// * `IncorrectPassword` - mismatch, or a stored hash that cannot be
    ///   verified (merged on purpose)
    /// * `Timeout` / `Database` / `Unknown` - infrastructure failure
    async fn authenticate(
        &self,
        command: SigninCommand,
    ) -> Result<AuthenticatedProfile, IdentityError>;
}

/// Persistence operations for the identity aggregate.
///
/// The store is the authoritative backstop for uniqueness: `create` must be
/// an atomic conditional insert that reports which constraint was violated.
#[async_trait]
pub trait IdentityRepository: Send + Sync + 'static {
    /// Persist a new identity.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - email unique constraint violated
    /// * `UsernameAlreadyExists` - username unique constraint violated
    /// * `Database` - storage operation failed
    async fn create(&self, identity: Identity) -> Result<Identity, IdentityError>;

    /// Look up an identity by its email (the natural login key).
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, IdentityError>;

    /// Look up an identity by username, used as the allocation probe.
    async fn find_by_username(&self, username: &str) -> Result<Option<Identity>, IdentityError>;
}
