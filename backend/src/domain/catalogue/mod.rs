//! Catalogue domain types: categories and the products filed under them.

use std::fmt;

use rust_decimal::Decimal;

mod category;
mod product;
mod validation;


pub use category::{Category, CategoryId};
pub use product::{NewProduct, Product, ProductDraft, ProductId};

/// Maximum length of a product name.
pub const PRODUCT_NAME_MAX: usize = 128;
/// Maximum length of a category name.
pub const CATEGORY_NAME_MAX: usize = 64;
/// Decimal places kept for prices.
pub const PRICE_SCALE: u32 = 2;

/// Validation errors returned by catalogue constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogueValidationError {
    EmptyField { field: &'static str },
    TooLong { field: &'static str, max: usize },
    NegativeStock { value: i32 },
    NegativePrice { value: Decimal },
    PriceOutOfRange { value: Decimal },
}

impl fmt::Display for CatalogueValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyField { field } => write!(f, "{field} must not be empty"),
            Self::TooLong { field, max } => {
                write!(f, "{field} must be at most {max} characters")
            }
            Self::NegativeStock { value } => {
                write!(f, "product.stock must not be negative (got {value})")
            }
            Self::NegativePrice { value } => {
                write!(f, "product.price must not be negative (got {value})")
            }
            Self::PriceOutOfRange { value } => {
                write!(f, "product.price exceeds the storable range (got {value})")
            }
        }
    }
}

impl std::error::Error for CatalogueValidationError {}
