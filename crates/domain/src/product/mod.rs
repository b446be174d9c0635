//! Product aggregate, its variants and pricing.

mod aggregate;
mod price;
mod value_objects;
mod variant;

pub use aggregate::{Product, ProductInput, ProductProps};
pub use price::{Currency, Locale, Price, PriceError, PriceFormat, PriceFormatError};
pub use value_objects::{ProductTitle, ProductTitleError};
pub use variant::{ProductVariant, ProductVariantInput, ProductVariantProps};

use thiserror::Error;

use crate::macros::exception_codes;

/// Errors that can occur while building or changing a product variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProductVariantError {
    /// The name is empty after trimming.
    #[error("Variant name is required")]
    NameRequired,

    /// The name exceeds 100 characters.
    #[error("Variant name must be at most 100 characters")]
    NameTooLong,

    /// The description exceeds 1000 characters.
    #[error("Variant description must be at most 1000 characters")]
    DescriptionTooLong,

    /// The price was rejected.
    #[error(transparent)]
    Price(#[from] PriceError),
}

exception_codes!(ProductVariantError {
    NameRequired => "PRODUCT_VARIANT_NAME_REQUIRED",
    NameTooLong => "PRODUCT_VARIANT_NAME_TOO_LONG",
    DescriptionTooLong => "PRODUCT_VARIANT_DESCRIPTION_TOO_LONG",
} forwards [Price]);

/// Errors that can occur while building or changing a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProductError {
    /// The title was rejected.
    #[error(transparent)]
    Title(#[from] ProductTitleError),

    /// A variant was rejected.
    #[error(transparent)]
    Variant(#[from] ProductVariantError),

    /// Two variants share a name, ignoring case.
    #[error("Variant names must be unique within a product")]
    DuplicateVariantName,

    /// A variant with the same id is already attached.
    #[error("Variant already exists")]
    VariantAlreadyExists,

    /// No variant with the given id.
    #[error("Variant not found")]
    VariantNotFound,
}

exception_codes!(ProductError {
    DuplicateVariantName => "PRODUCT_DUPLICATE_VARIANT_NAME",
    VariantAlreadyExists => "PRODUCT_VARIANT_ALREADY_EXISTS",
    VariantNotFound => "PRODUCT_VARIANT_NOT_FOUND",
} forwards [Title, Variant]);

impl From<PriceError> for ProductError {
    fn from(error: PriceError) -> Self {
        ProductError::Variant(ProductVariantError::Price(error))
    }
}
