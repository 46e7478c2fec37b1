//! Server construction and middleware wiring.

mod config;

pub use config::{AppConfig, ConfigError};

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use storefront::Trace;
use storefront::domain::ports::{CatalogueRepository, UserRepository};
use storefront::inbound::http::health::{HealthState, live, ready};
use storefront::inbound::http::remember::RememberMe;
use storefront::inbound::http::session_config::SessionSettings;
use storefront::inbound::http::state::HttpState;
use storefront::inbound::http::{configure, session_middleware};

/// Adapters and settings the HTTP server is built from.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) users: Arc<dyn UserRepository>,
    pub(crate) catalogue: Arc<dyn CatalogueRepository>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(
        session: SessionSettings,
        bind_addr: SocketAddr,
        users: Arc<dyn UserRepository>,
        catalogue: Arc<dyn CatalogueRepository>,
    ) -> Self {
        Self {
            session,
            bind_addr,
            users,
            catalogue,
        }
    }
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    session: SessionSettings,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        session,
    } = deps;

    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(session_middleware(&session))
        .wrap(Trace)
        .service(ready)
        .service(live)
        .configure(configure)
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// The returned [`Server`] must be awaited to drive the listener; readiness is
/// flagged once the socket is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        session,
        bind_addr,
        users,
        catalogue,
    } = config;
    let remember = RememberMe::new(session.key.clone(), session.cookie_secure);
    let http_state = web::Data::new(HttpState::new(users, catalogue, remember));
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            session: session.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
