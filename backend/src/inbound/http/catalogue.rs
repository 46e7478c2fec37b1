//! Public catalogue pages.
//!
//! ```text
//! GET /                 categories
//! GET /category/{id}    products filed under one category
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, web};

use crate::domain::ports::CatalogueRepositoryError;
use crate::domain::{CategoryId, Error};
use crate::inbound::http::context::RequestContext;
use crate::inbound::http::error::PageResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::{self, catalogue};

/// Translate catalogue port failures into domain errors.
pub(crate) fn map_catalogue_error(error: CatalogueRepositoryError) -> Error {
    match error {
        CatalogueRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("catalogue unavailable: {message}"))
        }
        CatalogueRepositoryError::Query { message } => {
            Error::internal(format!("catalogue error: {message}"))
        }
        CatalogueRepositoryError::UnknownCategory { category_id } => {
            Error::invalid_request(format!("category {category_id} does not exist"))
        }
    }
}

/// HTML 404 used by page routes.
pub(crate) fn not_found_page(ctx: &RequestContext) -> HttpResponse {
    views::page(ctx, StatusCode::NOT_FOUND, "Not Found", &catalogue::not_found())
}

#[get("/")]
pub async fn home(state: web::Data<HttpState>, ctx: RequestContext) -> PageResult<HttpResponse> {
    let categories = state
        .catalogue
        .list_categories()
        .await
        .map_err(map_catalogue_error)?;
    Ok(views::page(
        &ctx,
        StatusCode::OK,
        "Categories",
        &catalogue::category_list(&categories),
    ))
}

#[get("/category/{id}")]
pub async fn category(
    state: web::Data<HttpState>,
    ctx: RequestContext,
    path: web::Path<i32>,
) -> PageResult<HttpResponse> {
    let id = CategoryId::new(path.into_inner());
    let Some(category) = state
        .catalogue
        .find_category(id)
        .await
        .map_err(map_catalogue_error)?
    else {
        return Ok(not_found_page(&ctx));
    };
    let products = state
        .catalogue
        .list_products_in_category(id)
        .await
        .map_err(map_catalogue_error)?;
    Ok(views::page(
        &ctx,
        StatusCode::OK,
        category.name(),
        &catalogue::product_list(&products),
    ))
}
