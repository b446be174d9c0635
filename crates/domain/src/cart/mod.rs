//! Cart aggregate, its lines and dates.

mod aggregate;
mod item;
mod value_objects;

pub use aggregate::{Cart, CartInput, CartProps};
pub use item::{CartItem, CartItemProps};
pub use value_objects::{
    CartCreationDate, CartCreationDateError, CartUpdateDate, CartUpdateDateError, DateInput,
};

use common::UniqueEntityIdError;
use thiserror::Error;

use crate::macros::exception_codes;

/// Errors that can occur while building or changing a cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CartItemError {
    /// Quantities start at one.
    #[error("Quantity must be greater than 0")]
    QuantityMustBePositive,

    /// The quantity would overflow.
    #[error("Quantity is too large")]
    QuantityTooLarge,
}

exception_codes!(CartItemError {
    QuantityMustBePositive => "CART_ITEM_QUANTITY_MUST_BE_POSITIVE",
    QuantityTooLarge => "CART_ITEM_QUANTITY_TOO_LARGE",
});

/// Errors that can occur while building or changing a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CartError {
    /// The owner id is not a UUID.
    #[error("Cart owner id is not valid: {0}")]
    OwnerId(#[from] UniqueEntityIdError),

    /// The creation date was rejected.
    #[error(transparent)]
    CreatedAt(#[from] CartCreationDateError),

    /// The update date was rejected.
    #[error(transparent)]
    UpdatedAt(#[from] CartUpdateDateError),

    /// The update date precedes the creation date.
    #[error("Cart cannot be updated before it was created")]
    UpdatedBeforeCreated,

    /// Two lines hold the same variant.
    #[error("Cart already holds a line for this variant")]
    DuplicateItem,

    /// A line was rejected.
    #[error(transparent)]
    Item(#[from] CartItemError),

    /// No line holds the given variant.
    #[error("Item not found in cart")]
    ItemNotFound,
}

exception_codes!(CartError {
    UpdatedBeforeCreated => "CART_UPDATED_BEFORE_CREATED",
    DuplicateItem => "CART_DUPLICATE_ITEM",
    ItemNotFound => "CART_ITEM_NOT_FOUND",
} forwards [OwnerId, CreatedAt, UpdatedAt, Item]);
