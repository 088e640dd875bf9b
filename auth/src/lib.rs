//! Credential utilities library
//!
//! Provides the credential primitives used by the gallery service:
//! - Password hashing (Argon2id)
//! - Keyed token hashing (HMAC-SHA256, URL-safe base64)
//! - Secure random token generation
//! - An `Authenticator` coordinating the three
//!
//! Raw remember and reset tokens only ever leave this crate towards the
//! client; callers persist the hash.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).is_ok());
//! ```
//!
//! ## Remember Tokens
//! ```
//! use auth::Authenticator;
//!
//! let auth = Authenticator::new(b"hash-secret-key").unwrap();
//!
//! // Issue: raw value for the cookie, hash for the database
//! let issued = auth.issue_token().unwrap();
//!
//! // Resolve: hash whatever the client presents and look it up
//! assert_eq!(auth.hash_token(&issued.raw), issued.hash);
//! ```

pub mod authenticator;
pub mod hashing;
pub mod password;
pub mod token;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::IssuedToken;
pub use hashing::HashError;
pub use hashing::Hasher;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::TokenError;
