use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use hmac::Hmac;
use hmac::Mac;
use sha2::Sha256;

use super::errors::HashError;

type HmacSha256 = Hmac<Sha256>;

/// Keyed one-way hasher for opaque tokens.
///
/// Remember tokens and password-reset tokens are only ever persisted through
/// this hasher. The output is HMAC-SHA256 encoded as URL-safe base64, so it is
/// stable for a given secret and can be used directly as a lookup key.
#[derive(Clone)]
pub struct Hasher {
    mac: HmacSha256,
}

impl Hasher {
    /// Create a hasher bound to a secret key.
    ///
    /// # Arguments
    /// * `secret` - Application-wide secret (from configuration)
    ///
    /// # Errors
    /// * `EmptySecret` - The secret is empty
    pub fn new(secret: &[u8]) -> Result<Self, HashError> {
        if secret.is_empty() {
            return Err(HashError::EmptySecret);
        }

        let mac = HmacSha256::new_from_slice(secret)
            .map_err(|e| HashError::InvalidSecret(e.to_string()))?;

        Ok(Self { mac })
    }

    /// Hash a token with the configured secret.
    ///
    /// # Arguments
    /// * `input` - Raw token
    ///
    /// # Returns
    /// URL-safe base64 digest
    pub fn hash(&self, input: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(input.as_bytes());
        URL_SAFE.encode(mac.finalize().into_bytes())
    }
}

impl std::fmt::Debug for Hasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hasher").finish_non_exhaustive()
    }
}
