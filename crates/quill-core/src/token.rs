//! Opaque bearer token codec.
//!
//! A token carries exactly one thing: the user id. The wire form is
//! `<base64(user id)>.<hex(hmac-sha256(payload))>`, signed with a server-side
//! secret. There is no expiry, refresh, or rotation; a token is valid for as
//! long as the secret is.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

use crate::error::{Error, Result};

type HmacSha256 = Hmac<Sha256>;

/// Encodes a user id into a bearer token and back.
pub trait TokenCodec: Send + Sync {
    /// Issue a token for the given user id.
    fn encode(&self, user_id: Uuid) -> String;

    /// Decode a token back to a user id.
    ///
    /// Malformed or tampered tokens fail with [`Error::Unauthorized`].
    fn decode(&self, token: &str) -> Result<Uuid>;
}

/// HMAC-SHA256 signed token codec.
pub struct HmacTokenCodec {
    key: Vec<u8>,
}

impl HmacTokenCodec {
    pub fn new(secret: &str) -> Self {
        Self {
            key: secret.as_bytes().to_vec(),
        }
    }

    fn mac(&self) -> HmacSha256 {
        // HMAC accepts keys of any length.
        HmacSha256::new_from_slice(&self.key).expect("HMAC key of any length")
    }
}

impl TokenCodec for HmacTokenCodec {
    fn encode(&self, user_id: Uuid) -> String {
        let payload = URL_SAFE_NO_PAD.encode(user_id.as_bytes());
        let mut mac = self.mac();
        mac.update(payload.as_bytes());
        let signature = hex::encode(mac.finalize().into_bytes());
        format!("{}.{}", payload, signature)
    }

    fn decode(&self, token: &str) -> Result<Uuid> {
        let (payload, signature) = token
            .split_once('.')
            .ok_or_else(|| Error::Unauthorized("malformed token".to_string()))?;

        let signature_bytes = hex::decode(signature)
            .map_err(|_| Error::Unauthorized("malformed token signature".to_string()))?;

        let mut mac = self.mac();
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature_bytes)
            .map_err(|_| Error::Unauthorized("token signature mismatch".to_string()))?;

        let raw = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| Error::Unauthorized("malformed token payload".to_string()))?;
        Uuid::from_slice(&raw).map_err(|_| Error::Unauthorized("malformed token payload".to_string()))
    }
}
