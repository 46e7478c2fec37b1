//! Port for reading and maintaining the product catalogue.
//!
//! Inbound adapters list categories and products through this port and admin
//! handlers mutate products through it, without depending on Diesel.

use async_trait::async_trait;

use crate::domain::{Category, CategoryId, NewProduct, Product, ProductId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by catalogue repository adapters.
    pub enum CatalogueRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "catalogue connection failed: {message}",
        /// Query failed during execution or row conversion.
        Query { message: String } =>
            "catalogue query failed: {message}",
        /// A product referenced a category that does not exist.
        UnknownCategory { category_id: i32 } =>
            "category {category_id} does not exist",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueRepository: Send + Sync {
    /// All categories ordered by name.
    async fn list_categories(&self) -> Result<Vec<Category>, CatalogueRepositoryError>;

    async fn find_category(
        &self,
        id: CategoryId,
    ) -> Result<Option<Category>, CatalogueRepositoryError>;

    /// All products ordered by id.
    async fn list_products(&self) -> Result<Vec<Product>, CatalogueRepositoryError>;

    /// Products filed under `category`, ordered by name.
    async fn list_products_in_category(
        &self,
        category: CategoryId,
    ) -> Result<Vec<Product>, CatalogueRepositoryError>;

    async fn find_product(&self, id: ProductId)
    -> Result<Option<Product>, CatalogueRepositoryError>;

    /// Insert a product and return it with its assigned id.
    async fn create_product(&self, product: &NewProduct)
    -> Result<Product, CatalogueRepositoryError>;

    /// Replace every field of an existing product.
    ///
    /// Returns `None` when no product has the given id.
    async fn update_product(
        &self,
        id: ProductId,
        product: &NewProduct,
    ) -> Result<Option<Product>, CatalogueRepositoryError>;

    /// Remove a product; `false` when it did not exist.
    async fn delete_product(&self, id: ProductId) -> Result<bool, CatalogueRepositoryError>;
}
