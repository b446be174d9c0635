//! Domain error types.

use common::UniqueEntityIdError;
use thiserror::Error;

use crate::cart::{CartError, CartItemError};
use crate::product::{ProductError, ProductVariantError};
use crate::user::UserError;

/// A domain failure with a stable, machine-readable code.
///
/// Codes are SCREAMING_SNAKE_CASE and never change once published; callers
/// branch on them instead of on the human-readable message.
pub trait Exception: std::error::Error {
    fn code(&self) -> &'static str;
}

impl Exception for UniqueEntityIdError {
    fn code(&self) -> &'static str {
        UniqueEntityIdError::code(self)
    }
}

/// Any failure raised while building or mutating an aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A user could not be created or changed.
    #[error("User error: {0}")]
    User(#[from] UserError),

    /// A product could not be created or changed.
    #[error("Product error: {0}")]
    Product(#[from] ProductError),

    /// A product variant could not be created or changed.
    #[error("Product variant error: {0}")]
    ProductVariant(#[from] ProductVariantError),

    /// A cart could not be created or changed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// A cart line could not be created or changed.
    #[error("Cart item error: {0}")]
    CartItem(#[from] CartItemError),
}

impl Exception for DomainError {
    fn code(&self) -> &'static str {
        match self {
            DomainError::User(e) => e.code(),
            DomainError::Product(e) => e.code(),
            DomainError::ProductVariant(e) => e.code(),
            DomainError::Cart(e) => e.code(),
            DomainError::CartItem(e) => e.code(),
        }
    }
}
