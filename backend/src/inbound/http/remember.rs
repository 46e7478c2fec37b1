//! Long-lived "remember me" cookie.
//!
//! The cookie is private: its value is encrypted and authenticated with the
//! session key, so a client can neither read nor forge the user id inside.

use actix_web::HttpRequest;
use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, CookieJar, Key, SameSite};
use tracing::debug;

use crate::domain::{Error, UserId};

pub const REMEMBER_COOKIE: &str = "remember_token";
pub const REMEMBER_DURATION: Duration = Duration::days(365);

/// Issues and reads the remember-me cookie.
#[derive(Clone)]
pub struct RememberMe {
    key: Key,
    secure: bool,
}

impl RememberMe {
    pub fn new(key: Key, secure: bool) -> Self {
        Self { key, secure }
    }

    /// Encrypted cookie binding the browser to `user_id` for a year.
    pub fn issue(&self, user_id: UserId) -> Result<Cookie<'static>, Error> {
        let cookie = Cookie::build(REMEMBER_COOKIE, user_id.to_string())
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .max_age(REMEMBER_DURATION)
            .finish();
        let mut jar = CookieJar::new();
        jar.private_mut(&self.key).add(cookie);
        jar.get(REMEMBER_COOKIE)
            .cloned()
            .ok_or_else(|| Error::internal("remember-me cookie was not stored"))
    }

    /// User id carried by a valid remember-me cookie on `req`.
    pub fn user_id(&self, req: &HttpRequest) -> Option<UserId> {
        let cookie = req.cookie(REMEMBER_COOKIE)?;
        let mut jar = CookieJar::new();
        jar.add_original(cookie);
        let Some(decrypted) = jar.private(&self.key).get(REMEMBER_COOKIE) else {
            debug!("ignoring remember-me cookie that failed authentication");
            return None;
        };
        match decrypted.value().parse::<UserId>() {
            Ok(id) => Some(id),
            Err(error) => {
                debug!(%error, "ignoring remember-me cookie with malformed user id");
                None
            }
        }
    }

    /// Cookie that clears the remember-me token from the browser.
    pub fn removal(&self) -> Cookie<'static> {
        let mut cookie = Cookie::build(REMEMBER_COOKIE, "")
            .path("/")
            .secure(self.secure)
            .finish();
        cookie.make_removal();
        cookie
    }
}
