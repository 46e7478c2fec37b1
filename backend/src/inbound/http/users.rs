//! Registration, login, and logout pages.
//!
//! ```text
//! GET  /register            POST /register  username, password, password2
//! GET  /login?next=/admin   POST /login     username, password, remember_me
//! GET  /logout
//! ```

use actix_web::http::StatusCode;
use actix_web::http::header::LOCATION;
use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use tracing::info;

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::context::{RequestContext, safe_next};
use crate::inbound::http::error::{PageResult, redirect};
use crate::inbound::http::forms::{
    FieldErrors, LoginForm, LoginRejection, RegistrationForm, USERNAME_TAKEN,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::{self, auth};

pub const REGISTERED: &str = "Registration successful.";
pub const INVALID_CREDENTIALS: &str = "Invalid credentials.";

/// Query string carried by the login page.
#[derive(Debug, Default, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

impl NextQuery {
    fn login_action(&self) -> String {
        crate::inbound::http::context::login_url(self.next.as_deref())
    }
}

fn register_page(ctx: &RequestContext, username: &str, errors: &FieldErrors) -> HttpResponse {
    views::page(
        ctx,
        StatusCode::OK,
        "Register",
        &auth::register_form(username, errors),
    )
}

fn login_page(
    ctx: &RequestContext,
    query: &NextQuery,
    form: &LoginForm,
    errors: &FieldErrors,
) -> HttpResponse {
    let body = auth::login_form(&query.login_action(), &form.username, form.remember(), errors);
    views::page(ctx, StatusCode::OK, "Sign In", &body)
}

fn rejected_login(
    ctx: &RequestContext,
    query: &NextQuery,
    form: &LoginForm,
) -> PageResult<HttpResponse> {
    ctx.flash(INVALID_CREDENTIALS)?;
    Ok(login_page(ctx, query, form, &FieldErrors::new()))
}

#[get("/register")]
pub async fn register_form(ctx: RequestContext) -> PageResult<HttpResponse> {
    ctx.require_anonymous()?;
    Ok(register_page(&ctx, "", &FieldErrors::new()))
}

/// Create an account and send the visitor to the login page.
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    ctx: RequestContext,
    form: web::Form<RegistrationForm>,
) -> PageResult<HttpResponse> {
    ctx.require_anonymous()?;
    let form = form.into_inner();
    let credentials = match form.validate() {
        Ok(credentials) => credentials,
        Err(errors) => return Ok(register_page(&ctx, &form.username, &errors)),
    };

    match state.accounts.register(&credentials).await {
        Ok(_) => {
            ctx.flash(REGISTERED)?;
            Ok(redirect("/login"))
        }
        Err(error) if error.code() == ErrorCode::Conflict => {
            let mut errors = FieldErrors::new();
            errors.add("username", USERNAME_TAKEN);
            Ok(register_page(&ctx, &form.username, &errors))
        }
        Err(error) => Err(error.into()),
    }
}

#[get("/login")]
pub async fn login_form(
    ctx: RequestContext,
    query: web::Query<NextQuery>,
) -> PageResult<HttpResponse> {
    ctx.require_anonymous()?;
    Ok(login_page(
        &ctx,
        &query,
        &LoginForm::default(),
        &FieldErrors::new(),
    ))
}

/// Check credentials, bind the session, and go back to where the visitor was.
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    ctx: RequestContext,
    query: web::Query<NextQuery>,
    form: web::Form<LoginForm>,
) -> PageResult<HttpResponse> {
    ctx.require_anonymous()?;
    let form = form.into_inner();
    let credentials = match form.validate() {
        Ok(credentials) => credentials,
        Err(LoginRejection::Fields(errors)) => {
            return Ok(login_page(&ctx, &query, &form, &errors));
        }
        Err(LoginRejection::InvalidCredentials) => {
            return rejected_login(&ctx, &query, &form);
        }
    };

    let user = match state.accounts.authenticate(&credentials).await {
        Ok(user) => user,
        Err(error) if error.code() == ErrorCode::Unauthorized => {
            return rejected_login(&ctx, &query, &form);
        }
        Err(error) => return Err(error.into()),
    };

    ctx.session().persist_user(user.id())?;
    info!(user_id = %user.id(), remember = form.remember(), "user logged in");

    let mut response = redirect(safe_next(query.next.as_deref()));
    if form.remember() {
        let cookie = state.remember.issue(user.id())?;
        response
            .add_cookie(&cookie)
            .map_err(|err| Error::internal(format!("remember-me cookie rejected: {err}")))?;
    }
    Ok(response)
}

#[get("/logout")]
pub async fn logout(state: web::Data<HttpState>, ctx: RequestContext) -> HttpResponse {
    if let Some(user) = ctx.actor() {
        info!(user_id = %user.id(), "user logged out");
    }
    ctx.session().forget_user();
    HttpResponse::Found()
        .insert_header((LOCATION, "/"))
        .cookie(state.remember.removal())
        .finish()
}
