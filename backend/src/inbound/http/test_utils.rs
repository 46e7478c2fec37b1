//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::web;

use crate::domain::ports::{CatalogueRepository, UserRepository};
use crate::domain::{NewUser, PasswordDigest, User, Username};
use crate::inbound::http::app::SESSION_COOKIE;
use crate::inbound::http::remember::RememberMe;
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryUserRepository;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Disables the `Secure` flag for local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build()
}

/// Handler state over the given ports with a throwaway cookie key.
pub fn test_state(
    users: Arc<dyn UserRepository>,
    catalogue: Arc<dyn CatalogueRepository>,
) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(
        users,
        catalogue,
        RememberMe::new(Key::generate(), false),
    ))
}

/// Store an account without hashing; tests sign it in via [`sign_in_cookie`].
pub async fn seed_user(users: &InMemoryUserRepository, username: &str, is_admin: bool) -> User {
    let username = Username::new(username).expect("valid username");
    let digest = PasswordDigest::from_stored("$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA");
    let new_user = if is_admin {
        NewUser::admin(username, digest)
    } else {
        NewUser::regular(username, digest)
    };
    users.create(&new_user).await.expect("seed user")
}

/// Remember-me cookie that signs `user` in on the next request.
pub fn sign_in_cookie(state: &HttpState, user: &User) -> Cookie<'static> {
    state.remember.issue(user.id()).expect("remember cookie")
}
