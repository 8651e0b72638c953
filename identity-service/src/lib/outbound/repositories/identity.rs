use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::identity::errors::IdentityError;
use crate::identity::models::Identity;
use crate::identity::models::IdentityId;
use crate::identity::ports::IdentityRepository;

/// Postgres adapter for the identity repository port.
///
/// The `identities` table carries named unique constraints on `email` and
/// `username`; the insert is the atomic conditional write the allocator's
/// retry loop relies on.
pub struct PostgresIdentityRepository {
    pool: PgPool,
}

impl PostgresIdentityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn identity_from_row(row: &PgRow) -> Result<Identity, IdentityError> {
    Ok(Identity {
        id: IdentityId(
            row.try_get("id")
                .map_err(|e| IdentityError::Database(e.to_string()))?,
        ),
        full_name: row
            .try_get("full_name")
            .map_err(|e| IdentityError::Database(e.to_string()))?,
        email: row
            .try_get("email")
            .map_err(|e| IdentityError::Database(e.to_string()))?,
        username: row
            .try_get("username")
            .map_err(|e| IdentityError::Database(e.to_string()))?,
        password_hash: row
            .try_get("password_hash")
            .map_err(|e| IdentityError::Database(e.to_string()))?,
        profile_image: row
            .try_get("profile_image")
            .map_err(|e| IdentityError::Database(e.to_string()))?,
        created_at: row
            .try_get("created_at")
            .map_err(|e| IdentityError::Database(e.to_string()))?,
    })
}

#[async_trait]
impl IdentityRepository for PostgresIdentityRepository {
    async fn create(&self, identity: Identity) -> Result<Identity, IdentityError> {
        sqlx::query(
            r#"
            INSERT INTO identities (id, full_name, email, username, password_hash, profile_image, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(identity.id.0)
        .bind(&identity.full_name)
        .bind(&identity.email)
        .bind(&identity.username)
        .bind(&identity.password_hash)
        .bind(&identity.profile_image)
        .bind(identity.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    if db_err.constraint() == Some("identities_email_key") {
                        return IdentityError::EmailAlreadyExists(identity.email.clone());
                    }
                    if db_err.constraint() == Some("identities_username_key") {
                        return IdentityError::UsernameAlreadyExists(identity.username.clone());
                    }
                }
            }
            IdentityError::Database(e.to_string())
        })?;

        Ok(identity)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, IdentityError> {
        let row = sqlx::query(
            r#"
            SELECT id, full_name, email, username, password_hash, profile_image, created_at
            FROM identities
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| IdentityError::Database(e.to_string()))?;

        row.as_ref().map(identity_from_row).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Identity>, IdentityError> {
        let row = sqlx::query(
            r#"
            SELECT id, full_name, email, username, password_hash, profile_image, created_at
            FROM identities
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| IdentityError::Database(e.to_string()))?;

        row.as_ref().map(identity_from_row).transpose()
    }
}
