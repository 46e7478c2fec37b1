//! Validation helpers shared by catalogue entities.

use rust_decimal::{Decimal, RoundingStrategy};

use super::{CatalogueValidationError, PRICE_SCALE};

/// Largest value a `NUMERIC(10, 2)` column holds: 99 999 999.99.
const PRICE_MAX: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

pub(super) fn validate_name(
    value: String,
    field: &'static str,
    max: usize,
) -> Result<String, CatalogueValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CatalogueValidationError::EmptyField { field });
    }
    if trimmed.chars().count() > max {
        return Err(CatalogueValidationError::TooLong { field, max });
    }
    Ok(trimmed.to_owned())
}

pub(super) fn normalise_description(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

pub(super) fn ensure_non_negative_stock(value: i32) -> Result<i32, CatalogueValidationError> {
    if value < 0 {
        return Err(CatalogueValidationError::NegativeStock { value });
    }
    Ok(value)
}

/// Round to cents and check the storable range.
pub(super) fn validate_price(value: Decimal) -> Result<Decimal, CatalogueValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(CatalogueValidationError::NegativePrice { value });
    }
    let rounded = value.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero);
    if rounded > PRICE_MAX {
        return Err(CatalogueValidationError::PriceOutOfRange { value });
    }
    Ok(rounded)
}
