//! Per-request actor resolution and page guards.
//!
//! [`RequestContext`] is extracted once per handler call. It resolves the
//! session (or remember-me cookie) to a stored [`User`] and exposes the
//! guards that turn "not logged in" and "not an admin" into flash-and-redirect
//! responses.

use actix_web::http::Method;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::{debug, warn};

use crate::domain::{Error, User, UserId};
use crate::inbound::http::error::{PageError, PageResult};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

pub const LOGIN_REQUIRED: &str = "Please log in to access this page.";
pub const ACCESS_DENIED: &str = "Access denied.";

/// The current request's actor plus its session.
pub struct RequestContext {
    session: SessionContext,
    actor: Option<User>,
    /// Path and query to come back to after logging in; only set for `GET`.
    return_to: Option<String>,
}

impl RequestContext {
    pub fn actor(&self) -> Option<&User> {
        self.actor.as_ref()
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Queue a flash message for the next rendered page.
    pub fn flash(&self, message: &str) -> Result<(), Error> {
        self.session.flash(message)
    }

    pub fn take_flashes(&self) -> Vec<String> {
        self.session.take_flashes()
    }

    /// Pages such as login and register are only for anonymous visitors.
    pub fn require_anonymous(&self) -> PageResult<()> {
        match self.actor {
            Some(_) => Err(PageError::redirect("/")),
            None => Ok(()),
        }
    }

    /// Redirect anonymous visitors to the login page.
    pub fn require_user(&self) -> PageResult<&User> {
        match self.actor.as_ref() {
            Some(user) => Ok(user),
            None => {
                self.flash(LOGIN_REQUIRED)?;
                Err(PageError::redirect(login_url(self.return_to.as_deref())))
            }
        }
    }

    /// Require an administrator; other users are sent home.
    pub fn require_admin(&self) -> PageResult<&User> {
        let user = self.require_user()?;
        if user.is_admin() {
            Ok(user)
        } else {
            debug!(user_id = %user.id(), "non-admin refused");
            self.flash(ACCESS_DENIED)?;
            Err(PageError::redirect("/"))
        }
    }
}

/// Login page URL carrying an optional return path.
pub fn login_url(next: Option<&str>) -> String {
    match next {
        Some(next) => {
            let query = url::form_urlencoded::Serializer::new(String::new())
                .append_pair("next", next)
                .finish();
            format!("/login?{query}")
        }
        None => "/login".to_owned(),
    }
}

/// Return `next` only when it is a local absolute path.
///
/// Control characters and whitespace are refused outright: browsers strip
/// tabs and newlines from URLs, which would turn `/\t/host` into `//host`.
///
/// ```
/// use storefront::inbound::http::context::safe_next;
///
/// assert_eq!(safe_next(Some("/admin")), "/admin");
/// assert_eq!(safe_next(Some("//evil.example")), "/");
/// assert_eq!(safe_next(Some("https://evil.example")), "/");
/// assert_eq!(safe_next(Some("/\t/evil.example")), "/");
/// assert_eq!(safe_next(None), "/");
/// ```
pub fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(path) if is_local_path(path) => path,
        _ => "/",
    }
}

fn is_local_path(path: &str) -> bool {
    path.starts_with('/')
        && !path.starts_with("//")
        && !path
            .chars()
            .any(|c| c == '\\' || c.is_ascii_control() || c.is_whitespace())
}

async fn resolve_actor(
    state: &HttpState,
    session: &SessionContext,
    remembered: Option<UserId>,
) -> Result<Option<User>, Error> {
    if let Some(id) = session.user_id()? {
        if let Some(user) = state.accounts.resolve(id).await? {
            return Ok(Some(user));
        }
        warn!(user_id = %id, "session refers to a missing user");
        session.forget_user();
    }

    let Some(id) = remembered else {
        return Ok(None);
    };
    match state.accounts.resolve(id).await? {
        Some(user) => {
            debug!(user_id = %id, "session restored from remember-me cookie");
            session.persist_user(user.id())?;
            Ok(Some(user))
        }
        None => Ok(None),
    }
}

impl FromRequest for RequestContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let session = SessionContext::from_request(req, payload);
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        let remembered = state.as_ref().and_then(|state| state.remember.user_id(req));
        let return_to = (req.method() == Method::GET).then(|| {
            req.uri()
                .path_and_query()
                .map_or_else(|| req.path().to_owned(), |pq| pq.as_str().to_owned())
        });

        Box::pin(async move {
            let session = session.await?;
            let state = state.ok_or_else(|| Error::internal("HTTP state is not configured"))?;
            let actor = resolve_actor(&state, &session, remembered).await?;
            Ok(Self {
                session,
                actor,
                return_to,
            })
        })
    }
}
