use serde::Deserialize;
use serde::Serialize;

/// Payload of an access token: the identity id, nothing else.
///
/// Deliberately carries no expiry, timestamp, or nonce. Encoding the same id
/// with the same secret yields a byte-identical token; rotating the signing
/// secret is the only revocation lever.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    pub id: String,
}

impl AccessClaims {
    pub fn new(id: impl ToString) -> Self {
        Self { id: id.to_string() }
    }
}
