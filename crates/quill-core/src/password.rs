//! Password hashing helpers.
//!
//! Credentials are opaque to the core: a stored credential is the SHA-256 hex
//! digest of the password, compared on login. There is no tunable hashing
//! configuration surface.

use sha2::{Digest, Sha256};

/// Hash a password for storage.
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Verify a password against its stored hash.
pub fn verify_password(password: &str, hash: &str) -> bool {
    hash_password(password) == hash
}
