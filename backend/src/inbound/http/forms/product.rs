//! Add / update product form.
//!
//! The category selector only offers the categories passed in at
//! construction; a submitted id outside that list is rejected.

use rust_decimal::Decimal;
use serde::Deserialize;

use super::{FieldCheck, FieldErrors};
use crate::domain::catalogue::PRODUCT_NAME_MAX;
use crate::domain::{
    CatalogueValidationError, Category, CategoryId, NewProduct, Product, ProductDraft,
};

/// Raw product fields as submitted.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub price: String,
    pub stock: String,
    pub category: String,
}

impl From<&Product> for ProductInput {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name().to_owned(),
            description: product.description().unwrap_or_default().to_owned(),
            price: product.price().to_string(),
            stock: product.stock().to_string(),
            category: product.category_id().to_string(),
        }
    }
}

/// Product form bound to the category choices available when it was built.
#[derive(Debug, Clone)]
pub struct ProductForm {
    input: ProductInput,
    choices: Vec<Category>,
}

impl ProductForm {
    /// Blank form.
    pub fn new(choices: Vec<Category>) -> Self {
        Self::with_input(ProductInput::default(), choices)
    }

    pub fn with_input(input: ProductInput, choices: Vec<Category>) -> Self {
        Self { input, choices }
    }

    /// Form pre-filled from a stored product.
    pub fn for_product(product: &Product, choices: Vec<Category>) -> Self {
        Self::with_input(ProductInput::from(product), choices)
    }

    pub fn input(&self) -> &ProductInput {
        &self.input
    }

    pub fn choices(&self) -> &[Category] {
        &self.choices
    }

    /// Validate every field against the bound choices.
    pub fn validate(&self) -> Result<NewProduct, FieldErrors> {
        let mut errors = FieldErrors::new();
        let ids: Vec<i32> = self.choices.iter().map(|c| c.id().get()).collect();

        let name = FieldCheck::new(&mut errors, "name", &self.input.name)
            .required()
            .max_length(PRODUCT_NAME_MAX)
            .text();
        let price = FieldCheck::new(&mut errors, "price", &self.input.price)
            .required()
            .decimal_at_least(Decimal::ZERO);
        let stock = FieldCheck::new(&mut errors, "stock", &self.input.stock)
            .required()
            .integer_at_least(0);
        let category = FieldCheck::new(&mut errors, "category", &self.input.category).choice(&ids);

        let (Some(name), Some(price), Some(stock), Some(category)) = (name, price, stock, category)
        else {
            return Err(errors);
        };

        NewProduct::new(ProductDraft {
            name: name.to_owned(),
            description: Some(self.input.description.clone()),
            price,
            stock,
            category_id: CategoryId::new(category),
        })
        .map_err(|error| {
            let (field, message) = field_error(&error);
            errors.add(field, message);
            errors
        })
    }
}

fn field_error(error: &CatalogueValidationError) -> (&'static str, String) {
    match error {
        CatalogueValidationError::EmptyField { .. } => ("name", super::REQUIRED.to_owned()),
        CatalogueValidationError::TooLong { max, .. } => (
            "name",
            format!("Field cannot be longer than {max} characters."),
        ),
        CatalogueValidationError::NegativePrice { .. } => {
            ("price", "Number must be at least 0.".to_owned())
        }
        CatalogueValidationError::PriceOutOfRange { .. } => {
            ("price", "Number must be at most 99999999.99.".to_owned())
        }
        CatalogueValidationError::NegativeStock { .. } => {
            ("stock", "Number must be at least 0.".to_owned())
        }
    }
}
