//! PostgreSQL-backed `CatalogueRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{CatalogueRepository, CatalogueRepositoryError};
use crate::domain::{Category, CategoryId, NewProduct, Product, ProductDraft, ProductId};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error};
use super::models::{CategoryRow, ProductRow, ProductValues};
use super::pool::{DbPool, PoolError};
use super::schema::{categories, products};

/// Diesel-backed implementation of the `CatalogueRepository` port.
#[derive(Clone)]
pub struct DieselCatalogueRepository {
    pool: DbPool,
}

impl DieselCatalogueRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CatalogueRepositoryError {
    CatalogueRepositoryError::connection(error.into_message())
}

fn map_read_error(error: diesel::result::Error) -> CatalogueRepositoryError {
    map_write_error(error, None)
}

/// Map write failures; `category_id` names the category a foreign-key
/// violation refers to.
fn map_write_error(
    error: diesel::result::Error,
    category_id: Option<CategoryId>,
) -> CatalogueRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => CatalogueRepositoryError::connection(message),
        DieselFailure::ForeignKeyViolation { constraint } => match category_id {
            Some(id) => CatalogueRepositoryError::unknown_category(id.get()),
            None => {
                warn!(?constraint, "unexpected foreign key violation");
                CatalogueRepositoryError::query("foreign key violation")
            }
        },
        DieselFailure::UniqueViolation { constraint } => {
            warn!(?constraint, "unexpected unique violation");
            CatalogueRepositoryError::query("unique violation")
        }
        DieselFailure::Query(message) => CatalogueRepositoryError::query(message),
    }
}

fn row_to_category(row: CategoryRow) -> Result<Category, CatalogueRepositoryError> {
    Category::new(CategoryId::new(row.id), row.name)
        .map_err(|err| CatalogueRepositoryError::query(format!("invalid stored category: {err}")))
}

fn row_to_product(row: ProductRow) -> Result<Product, CatalogueRepositoryError> {
    let draft = ProductDraft {
        name: row.name,
        description: row.description,
        price: row.price,
        stock: row.stock,
        category_id: CategoryId::new(row.category_id),
    };
    let fields = NewProduct::new(draft).map_err(|err| {
        warn!(product_id = row.id, %err, "stored product failed validation");
        CatalogueRepositoryError::query(format!("invalid stored product: {err}"))
    })?;
    Ok(Product::new(ProductId::new(row.id), fields))
}

fn collect<R, T>(
    rows: Vec<R>,
    convert: fn(R) -> Result<T, CatalogueRepositoryError>,
) -> Result<Vec<T>, CatalogueRepositoryError> {
    rows.into_iter().map(convert).collect()
}

fn product_values(product: &NewProduct) -> ProductValues<'_> {
    ProductValues {
        name: product.name(),
        description: product.description(),
        price: product.price(),
        stock: product.stock(),
        category_id: product.category_id().get(),
    }
}

#[async_trait]
impl CatalogueRepository for DieselCatalogueRepository {
    async fn list_categories(&self) -> Result<Vec<Category>, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CategoryRow> = categories::table
            .order((categories::name.asc(), categories::id.asc()))
            .select(CategoryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_read_error)?;

        collect(rows, row_to_category)
    }

    async fn find_category(
        &self,
        id: CategoryId,
    ) -> Result<Option<Category>, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CategoryRow> = categories::table
            .find(id.get())
            .select(CategoryRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_read_error)?;

        row.map(row_to_category).transpose()
    }

    async fn list_products(&self) -> Result<Vec<Product>, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ProductRow> = products::table
            .order(products::id.asc())
            .select(ProductRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_read_error)?;

        collect(rows, row_to_product)
    }

    async fn list_products_in_category(
        &self,
        category: CategoryId,
    ) -> Result<Vec<Product>, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ProductRow> = products::table
            .filter(products::category_id.eq(category.get()))
            .order((products::name.asc(), products::id.asc()))
            .select(ProductRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_read_error)?;

        collect(rows, row_to_product)
    }

    async fn find_product(
        &self,
        id: ProductId,
    ) -> Result<Option<Product>, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ProductRow> = products::table
            .find(id.get())
            .select(ProductRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_read_error)?;

        row.map(row_to_product).transpose()
    }

    async fn create_product(
        &self,
        product: &NewProduct,
    ) -> Result<Product, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: ProductRow = diesel::insert_into(products::table)
            .values(&product_values(product))
            .returning(ProductRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_write_error(err, Some(product.category_id())))?;

        row_to_product(row)
    }

    async fn update_product(
        &self,
        id: ProductId,
        product: &NewProduct,
    ) -> Result<Option<Product>, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ProductRow> = diesel::update(products::table.find(id.get()))
            .set(&product_values(product))
            .returning(ProductRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_write_error(err, Some(product.category_id())))?;

        row.map(row_to_product).transpose()
    }

    async fn delete_product(&self, id: ProductId) -> Result<bool, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(products::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_read_error)?;

        Ok(deleted > 0)
    }
}
