use crate::hashing::HashError;
use crate::hashing::Hasher;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::token;
use crate::token::TokenError;

/// Credential coordinator combining password hashing, token generation and
/// keyed token hashing.
///
/// Services hold one `Authenticator` built from configuration at startup.
#[derive(Clone)]
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_hasher: Hasher,
}

/// Freshly issued token: the raw value goes to the client, the hash to storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub raw: String,
    pub hash: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),

    #[error("Hash error: {0}")]
    HashError(#[from] HashError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `hash_secret` - Secret key for hashing remember and reset tokens
    ///
    /// # Errors
    /// * `HashError` - Secret is empty
    pub fn new(hash_secret: &[u8]) -> Result<Self, AuthenticationError> {
        Ok(Self {
            password_hasher: PasswordHasher::new(),
            token_hasher: Hasher::new(hash_secret)?,
        })
    }

    /// Hash a password for storage.
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a password against its stored hash.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is unusable
    pub fn verify_password(
        &self,
        password: &str,
        stored_hash: &str,
    ) -> Result<(), AuthenticationError> {
        match self.password_hasher.verify(password, stored_hash) {
            Ok(()) => Ok(()),
            Err(PasswordError::Mismatch) => Err(AuthenticationError::InvalidCredentials),
            Err(e) => Err(e.into()),
        }
    }

    /// Generate a new random token together with its hash.
    pub fn issue_token(&self) -> Result<IssuedToken, TokenError> {
        let raw = token::generate()?;
        let hash = self.token_hasher.hash(&raw);
        Ok(IssuedToken { raw, hash })
    }

    /// Hash a raw token presented by a client.
    pub fn hash_token(&self, raw: &str) -> String {
        self.token_hasher.hash(raw)
    }
}
