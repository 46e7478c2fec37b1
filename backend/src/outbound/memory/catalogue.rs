//! Process-local `CatalogueRepository`.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::ports::{CatalogueRepository, CatalogueRepositoryError};
use crate::domain::{Category, CategoryId, NewProduct, Product, ProductId};

#[derive(Debug, Default)]
struct State {
    categories: BTreeMap<CategoryId, Category>,
    products: BTreeMap<ProductId, Product>,
    next_category_id: i32,
    next_product_id: i32,
}

/// In-memory catalogue enforcing the same category reference rule as the
/// `products` foreign key.
#[derive(Debug, Default)]
pub struct InMemoryCatalogueRepository {
    state: Mutex<State>,
}

impl InMemoryCatalogueRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provision a category; categories have no route of their own.
    pub fn add_category(&self, name: &str) -> Result<Category, CatalogueRepositoryError> {
        let mut state = self.lock();
        state.next_category_id += 1;
        let category = Category::new(CategoryId::new(state.next_category_id), name)
            .map_err(|err| CatalogueRepositoryError::query(err.to_string()))?;
        state.categories.insert(category.id(), category.clone());
        Ok(category)
    }

    pub fn product_count(&self) -> usize {
        self.lock().products.len()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl State {
    fn ensure_category(&self, id: CategoryId) -> Result<(), CatalogueRepositoryError> {
        if self.categories.contains_key(&id) {
            Ok(())
        } else {
            Err(CatalogueRepositoryError::unknown_category(id.get()))
        }
    }
}

#[async_trait]
impl CatalogueRepository for InMemoryCatalogueRepository {
    async fn list_categories(&self) -> Result<Vec<Category>, CatalogueRepositoryError> {
        let mut categories: Vec<Category> = self.lock().categories.values().cloned().collect();
        categories.sort_by(|a, b| a.name().cmp(b.name()).then(a.id().cmp(&b.id())));
        Ok(categories)
    }

    async fn find_category(
        &self,
        id: CategoryId,
    ) -> Result<Option<Category>, CatalogueRepositoryError> {
        Ok(self.lock().categories.get(&id).cloned())
    }

    async fn list_products(&self) -> Result<Vec<Product>, CatalogueRepositoryError> {
        Ok(self.lock().products.values().cloned().collect())
    }

    async fn list_products_in_category(
        &self,
        category: CategoryId,
    ) -> Result<Vec<Product>, CatalogueRepositoryError> {
        let mut products: Vec<Product> = self
            .lock()
            .products
            .values()
            .filter(|product| product.category_id() == category)
            .cloned()
            .collect();
        products.sort_by(|a, b| a.name().cmp(b.name()).then(a.id().cmp(&b.id())));
        Ok(products)
    }

    async fn find_product(
        &self,
        id: ProductId,
    ) -> Result<Option<Product>, CatalogueRepositoryError> {
        Ok(self.lock().products.get(&id).cloned())
    }

    async fn create_product(
        &self,
        product: &NewProduct,
    ) -> Result<Product, CatalogueRepositoryError> {
        let mut state = self.lock();
        state.ensure_category(product.category_id())?;
        state.next_product_id += 1;
        let stored = Product::new(ProductId::new(state.next_product_id), product.clone());
        state.products.insert(stored.id(), stored.clone());
        Ok(stored)
    }

    async fn update_product(
        &self,
        id: ProductId,
        product: &NewProduct,
    ) -> Result<Option<Product>, CatalogueRepositoryError> {
        let mut state = self.lock();
        if !state.products.contains_key(&id) {
            return Ok(None);
        }
        state.ensure_category(product.category_id())?;
        let stored = Product::new(id, product.clone());
        state.products.insert(id, stored.clone());
        Ok(Some(stored))
    }

    async fn delete_product(&self, id: ProductId) -> Result<bool, CatalogueRepositoryError> {
        Ok(self.lock().products.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProductDraft;
    use rstest::{fixture, rstest};
    use rust_decimal::Decimal;

    fn product(name: &str, category_id: CategoryId) -> NewProduct {
        NewProduct::new(ProductDraft {
            name: name.to_owned(),
            description: None,
            price: Decimal::new(1999, 2),
            stock: 1,
            category_id,
        })
        .expect("valid product")
    }

    #[fixture]
    fn repo() -> InMemoryCatalogueRepository {
        let repo = InMemoryCatalogueRepository::new();
        repo.add_category("RAM").expect("category");
        repo.add_category("CPU").expect("category");
        repo
    }

    #[rstest]
    #[tokio::test]
    async fn categories_are_listed_by_name(repo: InMemoryCatalogueRepository) {
        let names: Vec<String> = repo
            .list_categories()
            .await
            .expect("list")
            .iter()
            .map(|c| c.name().to_owned())
            .collect();
        assert_eq!(names, ["CPU", "RAM"]);
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_category_is_rejected(repo: InMemoryCatalogueRepository) {
        let err = repo
            .create_product(&product("Orphan", CategoryId::new(99)))
            .await
            .expect_err("unknown category");
        assert_eq!(err, CatalogueRepositoryError::unknown_category(99));
        assert_eq!(repo.product_count(), 0);
    }

    #[rstest]
    #[tokio::test]
    async fn update_and_delete_round_trip(repo: InMemoryCatalogueRepository) {
        let ram = CategoryId::new(1);
        let created = repo
            .create_product(&product("DDR5 32GB", ram))
            .await
            .expect("create");

        let updated = repo
            .update_product(created.id(), &product("DDR5 64GB", ram))
            .await
            .expect("update")
            .expect("product exists");
        assert_eq!(updated.name(), "DDR5 64GB");
        assert_eq!(updated.id(), created.id());

        assert!(repo.delete_product(created.id()).await.expect("delete"));
        assert!(!repo.delete_product(created.id()).await.expect("delete again"));
        assert_eq!(
            repo.update_product(created.id(), &product("Gone", ram))
                .await
                .expect("update missing"),
            None
        );
    }

    #[rstest]
    #[tokio::test]
    async fn products_are_filtered_by_category(repo: InMemoryCatalogueRepository) {
        repo.create_product(&product("DDR5", CategoryId::new(1)))
            .await
            .expect("create");
        repo.create_product(&product("Ryzen", CategoryId::new(2)))
            .await
            .expect("create");

        let cpus = repo
            .list_products_in_category(CategoryId::new(2))
            .await
            .expect("list");
        assert_eq!(cpus.len(), 1);
        assert_eq!(cpus[0].name(), "Ryzen");
    }
}
