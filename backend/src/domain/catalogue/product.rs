//! Catalogue product.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use super::CategoryId;
use super::validation::{
    ensure_non_negative_stock, normalise_description, validate_name, validate_price,
};
use super::{CatalogueValidationError, PRODUCT_NAME_MAX};

/// Database-assigned product identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ProductId(i32);

impl ProductId {
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unvalidated input for [`NewProduct`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i32,
    pub category_id: CategoryId,
}

/// Validated product fields awaiting insertion or update.
///
/// ## Invariants
/// - `name` is trimmed, non-empty, and at most [`PRODUCT_NAME_MAX`] characters.
/// - `description` is `None` rather than blank.
/// - `price` is non-negative and rounded to cents.
/// - `stock` is non-negative.
///
/// The category reference is checked by the repository, which owns the set of
/// existing categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    name: String,
    description: Option<String>,
    price: Decimal,
    stock: i32,
    category_id: CategoryId,
}

impl NewProduct {
    pub fn new(draft: ProductDraft) -> Result<Self, CatalogueValidationError> {
        Self::try_from(draft)
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
    pub fn price(&self) -> Decimal {
        self.price
    }
    pub fn stock(&self) -> i32 {
        self.stock
    }
    pub fn category_id(&self) -> CategoryId {
        self.category_id
    }
}

impl TryFrom<ProductDraft> for NewProduct {
    type Error = CatalogueValidationError;

    fn try_from(draft: ProductDraft) -> Result<Self, Self::Error> {
        Ok(Self {
            name: validate_name(draft.name, "product.name", PRODUCT_NAME_MAX)?,
            description: normalise_description(draft.description),
            price: validate_price(draft.price)?,
            stock: ensure_non_negative_stock(draft.stock)?,
            category_id: draft.category_id,
        })
    }
}

/// Stored product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    id: ProductId,
    name: String,
    description: Option<String>,
    price: Decimal,
    stock: i32,
    category_id: CategoryId,
}

impl Product {
    /// Attach an identifier to validated fields.
    pub fn new(id: ProductId, fields: NewProduct) -> Self {
        let NewProduct {
            name,
            description,
            price,
            stock,
            category_id,
        } = fields;
        Self {
            id,
            name,
            description,
            price,
            stock,
            category_id,
        }
    }

    pub fn id(&self) -> ProductId {
        self.id
    }
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
    pub fn price(&self) -> Decimal {
        self.price
    }
    pub fn stock(&self) -> i32 {
        self.stock
    }
    pub fn category_id(&self) -> CategoryId {
        self.category_id
    }

    /// Fields as a draft, for pre-filling an edit form.
    pub fn to_draft(&self) -> ProductDraft {
        ProductDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price,
            stock: self.stock,
            category_id: self.category_id,
        }
    }
}
