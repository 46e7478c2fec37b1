//! Read-only JSON API.
//!
//! ```text
//! GET /api/me
//! GET /api/categories
//! GET /api/products
//! GET /api/products/{id}
//! ```

use actix_web::{HttpResponse, get, web};
use serde::Serialize;

use crate::domain::{Error, ProductId, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::catalogue::map_catalogue_error;
use crate::inbound::http::context::RequestContext;
use crate::inbound::http::state::HttpState;

/// Public view of an account; never includes the password digest.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: i32,
    pub username: String,
    pub is_admin: bool,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().get(),
            username: user.username().to_string(),
            is_admin: user.is_admin(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: Option<UserSummary>,
}

/// Current actor, or `{"user": null}` when anonymous.
#[get("/api/me")]
pub async fn me(ctx: RequestContext) -> HttpResponse {
    HttpResponse::Ok().json(MeResponse {
        user: ctx.actor().map(UserSummary::from),
    })
}

#[get("/api/categories")]
pub async fn list_categories(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let categories = state
        .catalogue
        .list_categories()
        .await
        .map_err(map_catalogue_error)?;
    Ok(HttpResponse::Ok().json(categories))
}

#[get("/api/products")]
pub async fn list_products(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let products = state
        .catalogue
        .list_products()
        .await
        .map_err(map_catalogue_error)?;
    Ok(HttpResponse::Ok().json(products))
}

#[get("/api/products/{id}")]
pub async fn get_product(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = ProductId::new(path.into_inner());
    let product = state
        .catalogue
        .find_product(id)
        .await
        .map_err(map_catalogue_error)?
        .ok_or_else(|| Error::not_found(format!("product {id} not found")))?;
    Ok(HttpResponse::Ok().json(product))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PasswordDigest, UserId, Username};
    use serde_json::json;

    #[test]
    fn user_summary_omits_the_digest() {
        let user = User::new(
            UserId::new(1),
            Username::new("admin").expect("username"),
            PasswordDigest::from_stored("$argon2id$stub"),
            true,
        );

        let value = serde_json::to_value(MeResponse {
            user: Some(UserSummary::from(&user)),
        })
        .expect("serialises");

        assert_eq!(
            value,
            json!({"user": {"id": 1, "username": "admin", "isAdmin": true}})
        );
    }

    #[test]
    fn anonymous_is_null() {
        let value = serde_json::to_value(MeResponse { user: None }).expect("serialises");
        assert_eq!(value, json!({"user": null}));
    }
}
