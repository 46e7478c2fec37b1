//! Password digests.
//!
//! Passwords are hashed with Argon2id using a fresh random salt and stored in
//! PHC string format, so the parameters travel with the digest.

use std::fmt;

use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use rand::rngs::OsRng;
use tracing::warn;

/// Failure to produce a digest.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("password hashing failed: {message}")]
pub struct PasswordHashError {
    message: String,
}

/// Salted one-way password digest in PHC format.
///
/// `Debug` output is redacted.
///
/// # Examples
/// ```
/// use storefront::domain::PasswordDigest;
///
/// let digest = PasswordDigest::hash("secret1").expect("hash");
/// assert!(digest.verify("secret1"));
/// assert!(!digest.verify("secret2"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Hash `plain` with a random salt.
    ///
    /// This is deliberately slow; callers on an async executor should move it
    /// onto a blocking thread.
    pub fn hash(plain: &str) -> Result<Self, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(plain.as_bytes(), &salt)
            .map(|hash| Self(hash.to_string()))
            .map_err(|err| PasswordHashError {
                message: err.to_string(),
            })
    }

    /// Wrap a digest loaded from storage.
    pub fn from_stored(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    /// Check `plain` against the digest.
    ///
    /// A malformed stored digest never verifies.
    pub fn verify(&self, plain: &str) -> bool {
        let parsed = match PasswordHash::new(&self.0) {
            Ok(parsed) => parsed,
            Err(error) => {
                warn!(%error, "stored password digest is malformed");
                return false;
            }
        };
        Argon2::default()
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok()
    }

    /// PHC string for persistence.
    pub fn as_phc(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(<redacted>)")
    }
}
