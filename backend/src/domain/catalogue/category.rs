//! Product category.

use std::fmt;

use serde::Serialize;

use super::validation::validate_name;
use super::{CATEGORY_NAME_MAX, CatalogueValidationError};

/// Database-assigned category identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CategoryId(i32);

impl CategoryId {
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Category used to group products for browsing.
///
/// Categories are provisioned out-of-band; no route creates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    id: CategoryId,
    name: String,
}

impl Category {
    /// Validate and construct a category.
    pub fn new(id: CategoryId, name: impl Into<String>) -> Result<Self, CatalogueValidationError> {
        let name = validate_name(name.into(), "category.name", CATEGORY_NAME_MAX)?;
        Ok(Self { id, name })
    }

    pub fn id(&self) -> CategoryId {
        self.id
    }
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}
