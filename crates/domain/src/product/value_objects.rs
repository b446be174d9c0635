//! Value objects for the Product aggregate.

use serde::Serialize;
use thiserror::Error;

use common::combine;

use crate::macros::exception_codes;
use crate::validation::{ensure_max_chars, ensure_min_chars};
use crate::value_object::ValueObject;

const TITLE_MIN_LENGTH: usize = 3;
const TITLE_MAX_LENGTH: usize = 100;

/// Reasons a product title can be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProductTitleError {
    #[error("Product title must be at least 3 characters")]
    TooShort,
    #[error("Product title must be at most 100 characters")]
    TooLong,
}

exception_codes!(ProductTitleError {
    TooShort => "PRODUCT_TITLE_TOO_SHORT",
    TooLong => "PRODUCT_TITLE_TOO_LONG",
});

/// A product's display title, 3 to 100 characters after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProductTitle(String);

impl ProductTitle {
    pub fn create(raw: &str) -> Result<Self, ProductTitleError> {
        let value = raw.trim();
        combine([
            ensure_min_chars(value, TITLE_MIN_LENGTH, ProductTitleError::TooShort),
            ensure_max_chars(value, TITLE_MAX_LENGTH, ProductTitleError::TooLong),
        ])?;
        Ok(Self(value.to_string()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl ValueObject for ProductTitle {
    type Props = str;

    fn props(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
