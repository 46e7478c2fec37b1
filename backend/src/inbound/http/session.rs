//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Provides a thin wrapper around Actix sessions so handlers only deal with
//! domain-friendly operations: binding a user id and queuing one-shot flash
//! messages for the next rendered page.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const FLASHES_KEY: &str = "_flashes";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Bind the session to `user_id`, renewing the session key first.
    pub fn persist_user(&self, user_id: UserId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user_id.get())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current user id from the session, if present.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let id = self
            .0
            .get::<i32>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        match id {
            Some(raw) if raw > 0 => Ok(Some(UserId::new(raw))),
            Some(raw) => {
                warn!(raw, "invalid user id in session cookie");
                Ok(None)
            }
            None => Ok(None),
        }
    }

    /// Drop the identity binding; pending flashes survive.
    pub fn forget_user(&self) {
        self.0.remove(USER_ID_KEY);
        self.0.renew();
    }

    /// Queue a message for the next rendered page.
    pub fn flash(&self, message: impl Into<String>) -> Result<(), Error> {
        let mut flashes = self.pending_flashes();
        flashes.push(message.into());
        self.0
            .insert(FLASHES_KEY, flashes)
            .map_err(|error| Error::internal(format!("failed to store flash message: {error}")))
    }

    /// Remove and return all queued messages.
    pub fn take_flashes(&self) -> Vec<String> {
        match self.0.remove_as::<Vec<String>>(FLASHES_KEY) {
            Some(Ok(flashes)) => flashes,
            Some(Err(raw)) => {
                warn!(raw = %raw, "discarding malformed flash messages");
                Vec::new()
            }
            None => Vec::new(),
        }
    }

    fn pending_flashes(&self) -> Vec<String> {
        self.0
            .get::<Vec<String>>(FLASHES_KEY)
            .unwrap_or_else(|error| {
                warn!(%error, "discarding unreadable flash messages");
                None
            })
            .unwrap_or_default()
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    fn session_test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(crate::inbound::http::test_utils::test_session_middleware())
            .route(
                "/login",
                web::get().to(|session: SessionContext| async move {
                    session.persist_user(UserId::new(7))?;
                    Ok::<_, Error>(HttpResponse::Ok())
                }),
            )
            .route(
                "/whoami",
                web::get().to(|session: SessionContext| async move {
                    let body = session
                        .user_id()?
                        .map_or_else(|| "anonymous".to_owned(), |id| id.to_string());
                    Ok::<_, Error>(HttpResponse::Ok().body(body))
                }),
            )
            .route(
                "/logout",
                web::get().to(|session: SessionContext| async move {
                    session.forget_user();
                    HttpResponse::Ok()
                }),
            )
            .route(
                "/flash",
                web::get().to(|session: SessionContext| async move {
                    session.flash("first")?;
                    session.flash("second")?;
                    Ok::<_, Error>(HttpResponse::Ok())
                }),
            )
            .route(
                "/show",
                web::get().to(|session: SessionContext| async move {
                    HttpResponse::Ok().body(session.take_flashes().join("|"))
                }),
            )
            .route(
                "/tamper",
                web::get().to(|session: Session| async move {
                    session.insert(USER_ID_KEY, -4).expect("store bogus id");
                    HttpResponse::Ok()
                }),
            )
    }

    fn session_cookie(res: &actix_web::dev::ServiceResponse) -> Cookie<'static> {
        res.response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned()
    }

    async fn body_of(res: actix_web::dev::ServiceResponse) -> String {
        let bytes = test::read_body(res).await;
        String::from_utf8(bytes.to_vec()).expect("utf8 body")
    }

    #[actix_web::test]
    async fn round_trips_user_id() {
        let app = test::init_service(session_test_app()).await;

        let login = test::call_service(&app, test::TestRequest::get().uri("/login").to_request())
            .await;
        assert_eq!(login.status(), StatusCode::OK);
        let cookie = session_cookie(&login);

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/whoami")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(body_of(res).await, "7");
    }

    #[actix_web::test]
    async fn forget_user_drops_identity() {
        let app = test::init_service(session_test_app()).await;
        let login = test::call_service(&app, test::TestRequest::get().uri("/login").to_request())
            .await;
        let logout = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/logout")
                .cookie(session_cookie(&login))
                .to_request(),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/whoami")
                .cookie(session_cookie(&logout))
                .to_request(),
        )
        .await;
        assert_eq!(body_of(res).await, "anonymous");
    }

    #[actix_web::test]
    async fn flashes_are_consumed_once() {
        let app = test::init_service(session_test_app()).await;
        let flashed =
            test::call_service(&app, test::TestRequest::get().uri("/flash").to_request()).await;

        let shown = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/show")
                .cookie(session_cookie(&flashed))
                .to_request(),
        )
        .await;
        let after = session_cookie(&shown);
        assert_eq!(body_of(shown).await, "first|second");

        let again = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/show")
                .cookie(after)
                .to_request(),
        )
        .await;
        assert_eq!(body_of(again).await, "");
    }

    #[actix_web::test]
    async fn tampered_user_id_is_anonymous() {
        let app = test::init_service(session_test_app()).await;
        let tampered =
            test::call_service(&app, test::TestRequest::get().uri("/tamper").to_request()).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/whoami")
                .cookie(session_cookie(&tampered))
                .to_request(),
        )
        .await;
        assert_eq!(body_of(res).await, "anonymous");
    }
}
