use sha2::{Digest, Sha256};

/// Hex SHA-256 of a bearer token. Revocation entries are keyed by this value so
/// raw session tokens never reach Redis.
pub fn hash_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}
