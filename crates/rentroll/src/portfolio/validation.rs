use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use super::domain::Money;

/// A single field-level complaint returned to API clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Accumulates every field problem in a payload instead of stopping at the first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.push(field, message);
        errors
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|error| error.field == field)
    }

    pub fn finish<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }

    pub(crate) fn required<T>(&mut self, field: &str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.push(field, "is required");
        }
        value
    }

    /// Trimmed, non-empty text.
    pub(crate) fn text(&mut self, field: &str, value: String) -> Option<String> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.push(field, "must not be blank");
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    pub(crate) fn required_text(&mut self, field: &str, value: Option<String>) -> Option<String> {
        self.required(field, value)
            .and_then(|value| self.text(field, value))
    }

    /// Blank optional text collapses to `None`.
    pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
        value
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    pub(crate) fn money(&mut self, field: &str, value: Decimal) -> Option<Money> {
        if value <= Decimal::ZERO {
            self.push(field, "must be greater than zero");
            return None;
        }
        if value > Money::ceiling().amount() {
            self.push(field, "is too large");
            return None;
        }
        if value.normalize().scale() > Money::SCALE {
            self.push(field, "must have at most two decimal places");
            return None;
        }
        Some(Money::new(value))
    }

    pub(crate) fn bedrooms(&mut self, field: &str, value: i64) -> Option<u32> {
        match u32::try_from(value) {
            Ok(count) => Some(count),
            Err(_) if value < 0 => {
                self.push(field, "must not be negative");
                None
            }
            Err(_) => {
                self.push(field, "is too large");
                None
            }
        }
    }

    pub(crate) fn bathrooms(&mut self, field: &str, value: Decimal) -> Option<Decimal> {
        if value < Decimal::ZERO {
            self.push(field, "must not be negative");
            return None;
        }
        if value > Decimal::new(999, 1) {
            self.push(field, "is too large");
            return None;
        }
        if !(value * Decimal::TWO).fract().is_zero() {
            self.push(field, "must be a multiple of 0.5");
            return None;
        }
        let mut value = value;
        value.rescale(1);
        Some(value)
    }

    pub(crate) fn email(&mut self, field: &str, value: String) -> Option<String> {
        let value = self.text(field, value)?;
        let well_formed = value
            .split_once('@')
            .map(|(local, domain)| {
                !local.is_empty()
                    && domain.contains('.')
                    && !domain.starts_with('.')
                    && !domain.ends_with('.')
            })
            .unwrap_or(false);
        if well_formed && !value.contains(char::is_whitespace) {
            Some(value)
        } else {
            self.push(field, "must be a valid email address");
            None
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid data")?;
        for (index, error) in self.errors.iter().enumerate() {
            let separator = if index == 0 { ": " } else { "; " };
            write!(f, "{separator}{} {}", error.field, error.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
