use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;

use super::errors::TokenError;

/// Number of random bytes in a remember or password-reset token.
pub const REMEMBER_TOKEN_BYTES: usize = 32;

/// Generate a remember token.
///
/// # Returns
/// URL-safe base64 encoding of 32 bytes read from the OS random source
///
/// # Errors
/// * `RandomSourceUnavailable` - The OS random source failed
pub fn generate() -> Result<String, TokenError> {
    generate_with_len(REMEMBER_TOKEN_BYTES)
}

/// Generate a token of `n` random bytes.
///
/// The OS source is never replaced by a weaker generator on failure.
pub fn generate_with_len(n: usize) -> Result<String, TokenError> {
    let mut bytes = vec![0u8; n];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| TokenError::RandomSourceUnavailable(e.to_string()))?;

    Ok(URL_SAFE.encode(bytes))
}

/// Decoded byte length of a token.
///
/// Used to reject tokens that were shortened or corrupted in transit.
///
/// # Errors
/// * `MalformedToken` - Token is not URL-safe base64
pub fn byte_len(token: &str) -> Result<usize, TokenError> {
    URL_SAFE
        .decode(token)
        .map(|bytes| bytes.len())
        .map_err(|e| TokenError::MalformedToken(e.to_string()))
}
