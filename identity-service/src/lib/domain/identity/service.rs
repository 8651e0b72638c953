use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use crate::identity::errors::IdentityError;
use crate::identity::models::AuthenticatedProfile;
use crate::identity::models::Identity;
use crate::identity::models::IdentityId;
use crate::identity::models::RegisterCommand;
use crate::identity::models::SigninCommand;
use crate::identity::ports::IdentityRepository;
use crate::identity::ports::IdentityServicePort;
use crate::identity::username;
use crate::identity::validate;

/// Upper bound on any single repository or hashing step.
const OPERATION_TIMEOUT: Duration = Duration::from_secs(10);

/// Failed inserts tolerated before a username conflict becomes fatal.
const MAX_CREATE_ATTEMPTS: u32 = 3;

/// Domain service implementing the registration and authentication flows.
///
/// Each invocation runs its steps strictly in order; Argon2 work is
/// offloaded to a blocking thread so concurrent invocations never stall
/// each other, and every repository or hashing step is bounded by
/// [`OPERATION_TIMEOUT`].
pub struct IdentityService<R>
where
    R: IdentityRepository,
{
    repository: Arc<R>,
    password_hasher: Arc<auth::PasswordHasher>,
    token_issuer: Arc<auth::JwtHandler>,
}

impl<R> IdentityService<R>
where
    R: IdentityRepository,
{
    /// Create a new identity service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - identity persistence implementation
    /// * `token_issuer` - token signer constructed with the process secret
    pub fn new(repository: Arc<R>, token_issuer: Arc<auth::JwtHandler>) -> Self {
        Self {
            repository,
            password_hasher: Arc::new(auth::PasswordHasher::new()),
            token_issuer,
        }
    }

    async fn bounded<T>(
        &self,
        step: &'static str,
        operation: impl Future<Output = T>,
    ) -> Result<T, IdentityError> {
        tokio::time::timeout(OPERATION_TIMEOUT, operation)
            .await
            .map_err(|_| IdentityError::Timeout(step))
    }

    async fn hash_password(&self, password: String) -> Result<String, IdentityError> {
        let hasher = Arc::clone(&self.password_hasher);

        self.bounded(
            "password hashing",
            tokio::task::spawn_blocking(move || hasher.hash(&password)),
        )
        .await?
        .map_err(|e| IdentityError::Unknown(format!("hashing task failed: {e}")))?
        .map_err(|e| {
            tracing::error!(error = %e, "password hashing failed");
            IdentityError::Unknown("password hashing failed".to_string())
        })
    }

    /// Compare a presented password against the stored hash.
    ///
    /// A stored hash that cannot be parsed is logged and reported as a
    /// plain mismatch; callers cannot tell the two cases apart.
    async fn verify_password(
        &self,
        password: String,
        password_hash: String,
    ) -> Result<bool, IdentityError> {
        let hasher = Arc::clone(&self.password_hasher);

        let outcome = self
            .bounded(
                "password verification",
                tokio::task::spawn_blocking(move || hasher.verify(&password, &password_hash)),
            )
            .await?
            .map_err(|e| IdentityError::Unknown(format!("verification task failed: {e}")))?;

        match outcome {
            Ok(matches) => Ok(matches),
            Err(e) => {
                tracing::warn!(error = %e, "stored password hash could not be verified");
                Ok(false)
            }
        }
    }

    fn issue_token(&self, identity: &Identity) -> Result<String, IdentityError> {
        self.token_issuer
            .encode(&auth::AccessClaims::new(identity.id))
            .map_err(|e| {
                tracing::error!(error = %e, identity_id = %identity.id, "token issuance failed");
                IdentityError::Unknown("token issuance failed".to_string())
            })
    }

    /// Derive the first username candidate: the email local-part if free,
    /// otherwise the local-part with a random suffix. The repository's
    /// unique constraint remains the authoritative check; `register`
    /// retries with a fresh suffix if this candidate loses the race.
    async fn allocate_username(&self, email: &str) -> Result<String, IdentityError> {
        let base = username::local_part(email);

        let taken = self
            .bounded("username probe", self.repository.find_by_username(base))
            .await??;

        Ok(match taken {
            None => base.to_string(),
            Some(_) => username::with_random_suffix(base),
        })
    }
}

#[async_trait]
impl<R> IdentityServicePort for IdentityService<R>
where
    R: IdentityRepository,
{
    async fn register(
        &self,
        command: RegisterCommand,
    ) -> Result<AuthenticatedProfile, IdentityError> {
        validate::validate_signup(&command.full_name, &command.email, &command.password)?;

        let password_hash = self.hash_password(command.password.clone()).await?;

        let base = username::local_part(&command.email).to_string();
        let mut candidate = self.allocate_username(&command.email).await?;

        let mut attempts = 0;
        let created = loop {
            let identity = Identity {
                id: IdentityId::new(),
                full_name: command.full_name.clone(),
                email: command.email.clone(),
                username: candidate.clone(),
                password_hash: password_hash.clone(),
                profile_image: None,
                created_at: Utc::now(),
            };

            match self
                .bounded("identity insert", self.repository.create(identity))
                .await?
            {
                Ok(created) => break created,
                Err(IdentityError::UsernameAlreadyExists(taken)) => {
                    attempts += 1;
                    if attempts >= MAX_CREATE_ATTEMPTS {
                        tracing::error!(
                            username = %taken,
                            attempts,
                            "username allocation budget exhausted"
                        );
                        return Err(IdentityError::UsernameAlreadyExists(taken));
                    }
                    tracing::warn!(
                        username = %taken,
                        attempt = attempts,
                        "username taken at insert, retrying with a new suffix"
                    );
                    candidate = username::with_random_suffix(&base);
                }
                Err(e) => return Err(e),
            }
        };

        let access_token = self.issue_token(&created)?;

        tracing::info!(
            identity_id = %created.id,
            username = %created.username,
            "identity registered"
        );

        Ok(AuthenticatedProfile::new(&created, access_token))
    }

    async fn authenticate(
        &self,
        command: SigninCommand,
    ) -> Result<AuthenticatedProfile, IdentityError> {
        let identity = self
            .bounded(
                "identity lookup",
                self.repository.find_by_email(&command.email),
            )
            .await??
            .ok_or_else(|| IdentityError::NotFound(command.email.clone()))?;

        let verified = self
            .verify_password(command.password, identity.password_hash.clone())
            .await?;

        if !verified {
            return Err(IdentityError::IncorrectPassword);
        }

        let access_token = self.issue_token(&identity)?;

        Ok(AuthenticatedProfile::new(&identity, access_token))
    }
}
