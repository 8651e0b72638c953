//! Authentication infrastructure for the identity service.
//!
//! Two independent building blocks:
//! - Password hashing and verification (Argon2id, salted PHC strings)
//! - Access token signing and verification (HS256 JWT)
//!
//! The service crate owns the flows; this crate only knows how to hash,
//! verify, sign, and decode. The signing secret is injected at construction,
//! never read from ambient state.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("Sup3rSecret").unwrap();
//! assert!(hasher.verify("Sup3rSecret", &hash).unwrap());
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::{AccessClaims, JwtHandler};
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let token = handler.encode(&AccessClaims::new("user123")).unwrap();
//! let claims: AccessClaims = handler.decode(&token).unwrap();
//! assert_eq!(claims.id, "user123");
//! ```

pub mod jwt;
pub mod password;

pub use jwt::AccessClaims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
