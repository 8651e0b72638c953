use std::sync::Mutex;

use async_trait::async_trait;

use crate::identity::errors::IdentityError;
use crate::identity::models::Identity;
use crate::identity::ports::IdentityRepository;

/// In-memory adapter for the identity repository port.
///
/// Enforces the same email/username uniqueness as the Postgres schema under
/// a single lock, so inserts are atomic conditional writes. Backs the
/// integration tests and local development without a database.
#[derive(Default)]
pub struct InMemoryIdentityRepository {
    identities: Mutex<Vec<Identity>>,
}

impl InMemoryIdentityRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of persisted identities.
    pub fn len(&self) -> usize {
        self.identities.lock().expect("repository lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl IdentityRepository for InMemoryIdentityRepository {
    async fn create(&self, identity: Identity) -> Result<Identity, IdentityError> {
        let mut identities = self.identities.lock().expect("repository lock poisoned");

        if identities.iter().any(|i| i.email == identity.email) {
            return Err(IdentityError::EmailAlreadyExists(identity.email));
        }
        if identities.iter().any(|i| i.username == identity.username) {
            return Err(IdentityError::UsernameAlreadyExists(identity.username));
        }

        identities.push(identity.clone());
        Ok(identity)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, IdentityError> {
        let identities = self.identities.lock().expect("repository lock poisoned");
        Ok(identities.iter().find(|i| i.email == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Identity>, IdentityError> {
        let identities = self.identities.lock().expect("repository lock poisoned");
        Ok(identities.iter().find(|i| i.username == username).cloned())
    }
}
