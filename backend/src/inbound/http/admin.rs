//! Admin-only product maintenance pages.
//!
//! ```text
//! GET  /admin
//! GET  /admin/product/add          POST /admin/product/add
//! GET  /admin/product/{id}/edit    POST /admin/product/{id}/edit
//! POST /admin/product/{id}/delete
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, post, web};
use tracing::info;

use crate::domain::ports::CatalogueRepositoryError;
use crate::domain::{Error, NewProduct, ProductId};
use crate::inbound::http::catalogue::map_catalogue_error;
use crate::inbound::http::context::RequestContext;
use crate::inbound::http::error::{PageResult, redirect};
use crate::inbound::http::forms::{FieldErrors, NOT_A_CHOICE, ProductForm, ProductInput};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::{self, admin};

pub const PRODUCT_ADDED: &str = "Product added.";
pub const PRODUCT_UPDATED: &str = "Product updated.";
pub const PRODUCT_DELETED: &str = "Product deleted.";
pub const PRODUCT_NOT_FOUND: &str = "Product not found.";

const ADD_ACTION: &str = "/admin/product/add";

fn edit_action(id: ProductId) -> String {
    format!("/admin/product/{id}/edit")
}

fn form_page(
    ctx: &RequestContext,
    title: &str,
    action: &str,
    form: &ProductForm,
    errors: &FieldErrors,
) -> HttpResponse {
    views::page(
        ctx,
        StatusCode::OK,
        title,
        &admin::product_form(action, form, errors),
    )
}

async fn product_form(state: &HttpState, input: ProductInput) -> Result<ProductForm, Error> {
    let choices = state
        .catalogue
        .list_categories()
        .await
        .map_err(map_catalogue_error)?;
    Ok(ProductForm::with_input(input, choices))
}

/// Category removed between rendering the form and submitting it.
fn stale_category(error: &CatalogueRepositoryError) -> Option<FieldErrors> {
    matches!(error, CatalogueRepositoryError::UnknownCategory { .. }).then(|| {
        let mut errors = FieldErrors::new();
        errors.add("category", NOT_A_CHOICE);
        errors
    })
}

fn product_not_found(ctx: &RequestContext) -> PageResult<HttpResponse> {
    ctx.flash(PRODUCT_NOT_FOUND)?;
    Ok(redirect("/admin"))
}

#[get("/admin")]
pub async fn dashboard(
    state: web::Data<HttpState>,
    ctx: RequestContext,
) -> PageResult<HttpResponse> {
    ctx.require_admin()?;
    let products = state
        .catalogue
        .list_products()
        .await
        .map_err(map_catalogue_error)?;
    let categories = state
        .catalogue
        .list_categories()
        .await
        .map_err(map_catalogue_error)?;
    Ok(views::page(
        &ctx,
        StatusCode::OK,
        "Admin Dashboard",
        &admin::dashboard(&products, &categories),
    ))
}

#[get("/admin/product/add")]
pub async fn add_product_form(
    state: web::Data<HttpState>,
    ctx: RequestContext,
) -> PageResult<HttpResponse> {
    ctx.require_admin()?;
    let form = product_form(&state, ProductInput::default()).await?;
    Ok(form_page(
        &ctx,
        "Add Product",
        ADD_ACTION,
        &form,
        &FieldErrors::new(),
    ))
}

#[post("/admin/product/add")]
pub async fn add_product(
    state: web::Data<HttpState>,
    ctx: RequestContext,
    input: web::Form<ProductInput>,
) -> PageResult<HttpResponse> {
    let admin = ctx.require_admin()?;
    let form = product_form(&state, input.into_inner()).await?;
    let product: NewProduct = match form.validate() {
        Ok(product) => product,
        Err(errors) => return Ok(form_page(&ctx, "Add Product", ADD_ACTION, &form, &errors)),
    };

    match state.catalogue.create_product(&product).await {
        Ok(created) => {
            info!(product_id = %created.id(), admin_id = %admin.id(), "product added");
            ctx.flash(PRODUCT_ADDED)?;
            Ok(redirect("/admin"))
        }
        Err(error) => match stale_category(&error) {
            Some(errors) => Ok(form_page(&ctx, "Add Product", ADD_ACTION, &form, &errors)),
            None => Err(map_catalogue_error(error).into()),
        },
    }
}

#[get("/admin/product/{id}/edit")]
pub async fn edit_product_form(
    state: web::Data<HttpState>,
    ctx: RequestContext,
    path: web::Path<i32>,
) -> PageResult<HttpResponse> {
    ctx.require_admin()?;
    let id = ProductId::new(path.into_inner());
    let Some(product) = state
        .catalogue
        .find_product(id)
        .await
        .map_err(map_catalogue_error)?
    else {
        return product_not_found(&ctx);
    };
    let form = product_form(&state, ProductInput::from(&product)).await?;
    Ok(form_page(
        &ctx,
        "Update Product",
        &edit_action(id),
        &form,
        &FieldErrors::new(),
    ))
}

#[post("/admin/product/{id}/edit")]
pub async fn edit_product(
    state: web::Data<HttpState>,
    ctx: RequestContext,
    path: web::Path<i32>,
    input: web::Form<ProductInput>,
) -> PageResult<HttpResponse> {
    let admin = ctx.require_admin()?;
    let id = ProductId::new(path.into_inner());
    let form = product_form(&state, input.into_inner()).await?;
    let action = edit_action(id);
    let product = match form.validate() {
        Ok(product) => product,
        Err(errors) => return Ok(form_page(&ctx, "Update Product", &action, &form, &errors)),
    };

    match state.catalogue.update_product(id, &product).await {
        Ok(Some(_)) => {
            info!(product_id = %id, admin_id = %admin.id(), "product updated");
            ctx.flash(PRODUCT_UPDATED)?;
            Ok(redirect("/admin"))
        }
        Ok(None) => product_not_found(&ctx),
        Err(error) => match stale_category(&error) {
            Some(errors) => Ok(form_page(&ctx, "Update Product", &action, &form, &errors)),
            None => Err(map_catalogue_error(error).into()),
        },
    }
}

#[post("/admin/product/{id}/delete")]
pub async fn delete_product(
    state: web::Data<HttpState>,
    ctx: RequestContext,
    path: web::Path<i32>,
) -> PageResult<HttpResponse> {
    let admin = ctx.require_admin()?;
    let id = ProductId::new(path.into_inner());
    if !state
        .catalogue
        .delete_product(id)
        .await
        .map_err(map_catalogue_error)?
    {
        return product_not_found(&ctx);
    }
    info!(product_id = %id, admin_id = %admin.id(), "product deleted");
    ctx.flash(PRODUCT_DELETED)?;
    Ok(redirect("/admin"))
}
