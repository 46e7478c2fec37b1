//! HTML form validation.
//!
//! Each form deserialises every field as raw text so a redisplayed page can
//! echo exactly what was submitted. Validation runs each field's rule chain
//! in order; a failing rule stops that field's chain but every field is
//! checked, so the caller always gets the complete error list.

use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;

mod login;
mod product;
mod registration;

pub use login::{LoginForm, LoginRejection};
pub use product::{ProductForm, ProductInput};
pub use registration::RegistrationForm;

pub const REQUIRED: &str = "This field is required.";
pub const NOT_A_DECIMAL: &str = "Not a valid decimal value.";
pub const NOT_AN_INTEGER: &str = "Not a valid integer value.";
pub const NOT_A_CHOICE: &str = "Not a valid choice.";
pub const USERNAME_TAKEN: &str = "Username already taken.";

/// Per-field error messages in submission order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    /// Messages for `field`; empty when the field is valid.
    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map_or(&[], Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }
}

/// Rule chain over one submitted field.
pub(crate) struct FieldCheck<'e, 'v> {
    field: &'static str,
    value: &'v str,
    errors: &'e mut FieldErrors,
    halted: bool,
}

impl<'e, 'v> FieldCheck<'e, 'v> {
    pub(crate) fn new(errors: &'e mut FieldErrors, field: &'static str, value: &'v str) -> Self {
        let halted = errors.has(field);
        Self {
            field,
            value,
            errors,
            halted,
        }
    }

    fn fail(&mut self, message: impl Into<String>) {
        self.errors.add(self.field, message);
        self.halted = true;
    }

    /// Non-blank text.
    pub(crate) fn required(mut self) -> Self {
        if !self.halted && self.value.trim().is_empty() {
            self.fail(REQUIRED);
        }
        self
    }

    /// Character count within `min..=max`.
    pub(crate) fn length(mut self, min: usize, max: usize) -> Self {
        let count = self.value.chars().count();
        if !self.halted && !(min..=max).contains(&count) {
            self.fail(format!(
                "Field must be between {min} and {max} characters long."
            ));
        }
        self
    }

    /// Character count at most `max`.
    pub(crate) fn max_length(mut self, max: usize) -> Self {
        if !self.halted && self.value.chars().count() > max {
            self.fail(format!("Field cannot be longer than {max} characters."));
        }
        self
    }

    /// Must match the field named `other`.
    pub(crate) fn equal_to(mut self, other: &str, other_value: &str) -> Self {
        if !self.halted && self.value != other_value {
            self.fail(format!("Field must be equal to {other}."));
        }
        self
    }

    /// The raw value, if no rule failed.
    pub(crate) fn text(self) -> Option<&'v str> {
        (!self.halted).then_some(self.value)
    }

    /// Parse as a decimal no smaller than `min`.
    pub(crate) fn decimal_at_least(self, min: Decimal) -> Option<Decimal> {
        self.number_at_least(min, NOT_A_DECIMAL)
    }

    /// Parse as an integer no smaller than `min`.
    pub(crate) fn integer_at_least(self, min: i32) -> Option<i32> {
        self.number_at_least(min, NOT_AN_INTEGER)
    }

    /// Parse as an id that must be one of `choices`.
    pub(crate) fn choice(mut self, choices: &[i32]) -> Option<i32> {
        if self.halted {
            return None;
        }
        match self.value.trim().parse::<i32>() {
            Ok(id) if choices.contains(&id) => Some(id),
            _ => {
                self.fail(NOT_A_CHOICE);
                None
            }
        }
    }

    fn number_at_least<T>(mut self, min: T, invalid: &'static str) -> Option<T>
    where
        T: FromStr + PartialOrd + std::fmt::Display,
    {
        if self.halted {
            return None;
        }
        let Ok(number) = self.value.trim().parse::<T>() else {
            self.fail(invalid);
            return None;
        };
        if number < min {
            self.fail(format!("Number must be at least {min}."));
            return None;
        }
        Some(number)
    }
}
