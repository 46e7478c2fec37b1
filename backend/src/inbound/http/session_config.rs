//! Session configuration parsing and validation.
//!
//! This module centralises the environment-driven cookie settings so they are
//! validated consistently and can be tested in isolation. The session cookie
//! and the remember-me cookie share one key derived from `SECRET_KEY`.

use actix_web::cookie::Key;
use mockable::Env;
use sha2::{Digest, Sha512};
use tracing::warn;
use zeroize::Zeroizing;

pub mod fingerprint;
mod parsing;

pub use fingerprint::key_fingerprint;
use parsing::parse_bool;

pub(crate) const SECRET_KEY_ENV: &str = "SECRET_KEY";
pub(crate) const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
/// Development-only fallback secret.
pub const DEFAULT_SECRET: &str = "dev_secret";
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";

/// Cookie settings derived from configuration.
#[derive(Clone)]
pub struct SessionSettings {
    /// Encryption and signing key for private cookies.
    pub key: Key,
    /// Whether cookies are marked `Secure`.
    pub cookie_secure: bool,
}

impl std::fmt::Debug for SessionSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionSettings")
            .field("key", &key_fingerprint(&self.key))
            .field("cookie_secure", &self.cookie_secure)
            .finish()
    }
}

/// Errors raised while validating session configuration.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// The derived key material was rejected by the cookie crate.
    #[error("failed to derive cookie key: {message}")]
    KeyDerivation { message: String },
}

/// Derive the 64-byte cookie key from an arbitrary secret string.
///
/// # Examples
///
/// ```rust
/// use storefront::inbound::http::session_config::{derive_key, key_fingerprint};
///
/// let a = derive_key("correct horse").expect("key");
/// let b = derive_key("correct horse").expect("key");
/// assert_eq!(key_fingerprint(&a), key_fingerprint(&b));
/// ```
pub fn derive_key(secret: &str) -> Result<Key, SessionConfigError> {
    let digest = Sha512::digest(secret.as_bytes());
    Key::try_from(digest.as_slice()).map_err(|error| SessionConfigError::KeyDerivation {
        message: error.to_string(),
    })
}

/// Build session settings from environment variables.
///
/// A missing `SECRET_KEY` falls back to [`DEFAULT_SECRET`] with a warning;
/// `SESSION_COOKIE_SECURE` defaults to off so plain-HTTP development works.
///
/// # Examples
///
/// ```rust
/// use mockable::MockEnv;
/// use storefront::inbound::http::session_config::session_settings_from_env;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "SECRET_KEY" => Some("s3cret".to_owned()),
///     "SESSION_COOKIE_SECURE" => Some("1".to_owned()),
///     _ => None,
/// });
///
/// let settings = session_settings_from_env(&env).expect("valid settings");
/// assert!(settings.cookie_secure);
/// ```
pub fn session_settings_from_env<E: Env>(env: &E) -> Result<SessionSettings, SessionConfigError> {
    let cookie_secure = cookie_secure_from_env(env)?;
    let secret = Zeroizing::new(match env.string(SECRET_KEY_ENV) {
        Some(value) if !value.trim().is_empty() => value,
        _ => {
            warn!("SECRET_KEY not set; using the development secret");
            DEFAULT_SECRET.to_owned()
        }
    });
    let key = derive_key(&secret)?;

    Ok(SessionSettings { key, cookie_secure })
}

fn cookie_secure_from_env<E: Env>(env: &E) -> Result<bool, SessionConfigError> {
    match env.string(COOKIE_SECURE_ENV) {
        Some(value) => parse_bool(&value).ok_or(SessionConfigError::InvalidEnv {
            name: COOKIE_SECURE_ENV,
            value,
            expected: BOOL_EXPECTED,
        }),
        None => Ok(false),
    }
}
