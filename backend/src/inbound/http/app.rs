//! Route table and session middleware for the storefront pages.

use actix_session::config::{BrowserSession, CookieContentSecurity};
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::SameSite;
use actix_web::{HttpResponse, web};

use crate::inbound::http::context::RequestContext;
use crate::inbound::http::session_config::SessionSettings;
use crate::inbound::http::{admin, api, catalogue as pages, users};

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "session";

/// Register every page and JSON route.
///
/// Expects `web::Data<HttpState>` and the session middleware on the app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(pages::home)
        .service(pages::category)
        .service(users::register_form)
        .service(users::register)
        .service(users::login_form)
        .service(users::login)
        .service(users::logout)
        .service(admin::dashboard)
        .service(admin::add_product_form)
        .service(admin::add_product)
        .service(admin::edit_product_form)
        .service(admin::edit_product)
        .service(admin::delete_product)
        .service(api::me)
        .service(api::list_categories)
        .service(api::list_products)
        .service(api::get_product)
        .default_service(web::to(not_found));
}

async fn not_found(ctx: RequestContext) -> HttpResponse {
    pages::not_found_page(&ctx)
}

/// Private cookie session that ends with the browser session.
pub fn session_middleware(settings: &SessionSettings) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), settings.key.clone())
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_path("/".to_owned())
        .cookie_secure(settings.cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(SameSite::Lax)
        .session_lifecycle(BrowserSession::default())
        .build()
}
