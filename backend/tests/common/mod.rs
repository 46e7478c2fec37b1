//! Shared harness for the storefront HTTP tests.
//!
//! Builds the full page and API surface over in-memory repositories and
//! carries cookies between requests the way a browser would.

use std::collections::BTreeMap;
use std::sync::Arc;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::cookie::Key;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use rstest::fixture;
use storefront::domain::ensure_admin;
use storefront::inbound::http::remember::RememberMe;
use storefront::inbound::http::session_config::SessionSettings;
use storefront::inbound::http::state::HttpState;
use storefront::inbound::http::{configure, session_middleware};
use storefront::outbound::memory::{InMemoryCatalogueRepository, InMemoryUserRepository};

pub const ADMIN_PASSWORD: &str = "password";

/// Repositories plus the state handed to handlers.
pub struct Shop {
    pub users: Arc<InMemoryUserRepository>,
    pub catalogue: Arc<InMemoryCatalogueRepository>,
    pub state: web::Data<HttpState>,
    pub session: SessionSettings,
}

#[fixture]
pub fn shop() -> Shop {
    let users = Arc::new(InMemoryUserRepository::new());
    let catalogue = Arc::new(InMemoryCatalogueRepository::new());
    let session = SessionSettings {
        key: Key::generate(),
        cookie_secure: false,
    };
    let state = web::Data::new(HttpState::new(
        users.clone(),
        catalogue.clone(),
        RememberMe::new(session.key.clone(), false),
    ));
    Shop {
        users,
        catalogue,
        state,
        session,
    }
}

impl Shop {
    /// Provision the `admin` account as the binary does on start-up.
    pub async fn with_admin(self) -> Self {
        ensure_admin(self.users.as_ref(), ADMIN_PASSWORD)
            .await
            .expect("admin bootstrap");
        self
    }

    pub async fn app(
        &self,
    ) -> impl Service<
        Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    > {
        test::init_service(
            App::new()
                .app_data(self.state.clone())
                .wrap(session_middleware(&self.session))
                .configure(configure),
        )
        .await
    }
}

/// What a test cares about in a response.
#[derive(Debug)]
pub struct Page {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: String,
}

impl Page {
    pub fn redirects_to(&self, location: &str) -> bool {
        self.status == StatusCode::FOUND && self.location.as_deref() == Some(location)
    }
}

/// Cookie jar that replays `Set-Cookie` pairs on later requests.
#[derive(Debug, Default)]
pub struct Browser {
    cookies: BTreeMap<String, String>,
}

impl Browser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_cookie(&self, name: &str) -> bool {
        self.cookies.contains_key(name)
    }

    /// Drop a cookie, e.g. the session cookie when the browser closes.
    pub fn forget(&mut self, name: &str) {
        self.cookies.remove(name);
    }

    pub async fn send<S, B>(&mut self, app: &S, request: TestRequest) -> Page
    where
        S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
        B: MessageBody,
    {
        let request = if self.cookies.is_empty() {
            request
        } else {
            let header = self
                .cookies
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; ");
            request.insert_header((header::COOKIE, header))
        };
        let response = test::call_service(app, request.to_request()).await;
        self.store_cookies(&response);

        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = test::read_body(response).await;
        Page {
            status,
            location,
            body: String::from_utf8(body.to_vec()).expect("utf-8 body"),
        }
    }

    pub async fn get<S, B>(&mut self, app: &S, uri: &str) -> Page
    where
        S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
        B: MessageBody,
    {
        self.send(app, TestRequest::get().uri(uri)).await
    }

    pub async fn post<S, B>(&mut self, app: &S, uri: &str, form: &[(&str, &str)]) -> Page
    where
        S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
        B: MessageBody,
    {
        self.send(app, TestRequest::post().uri(uri).set_form(form))
            .await
    }

    pub async fn login<S, B>(&mut self, app: &S, username: &str, password: &str) -> Page
    where
        S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
        B: MessageBody,
    {
        self.post(
            app,
            "/login",
            &[("username", username), ("password", password)],
        )
        .await
    }

    pub async fn register<S, B>(&mut self, app: &S, username: &str, password: &str) -> Page
    where
        S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
        B: MessageBody,
    {
        self.post(
            app,
            "/register",
            &[
                ("username", username),
                ("password", password),
                ("password2", password),
            ],
        )
        .await
    }

    fn store_cookies<B>(&mut self, response: &ServiceResponse<B>) {
        for value in response.headers().get_all(header::SET_COOKIE) {
            let Ok(raw) = value.to_str() else { continue };
            let mut parts = raw.split(';').map(str::trim);
            let Some((name, value)) = parts.next().and_then(|pair| pair.split_once('=')) else {
                continue;
            };
            let expired = parts.any(|attr| attr.eq_ignore_ascii_case("Max-Age=0"));
            if expired || value.is_empty() {
                self.cookies.remove(name);
            } else {
                self.cookies.insert(name.to_owned(), value.to_owned());
            }
        }
    }
}
