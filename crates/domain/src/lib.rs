//! Domain layer for the shop.
//!
//! This crate provides:
//! - [`Entity`], [`AggregateRoot`] and [`ValueObject`] abstractions
//! - [`Exception`] codes for every domain failure
//! - The User aggregate with its name, email and password value objects
//! - The Product aggregate with variants and locale-aware [`Price`] formatting
//! - The Cart aggregate with its lines and date value objects
//!
//! Every factory validates its input and returns a `Result`; a constructed
//! value always satisfies its rules.

pub mod cart;
pub mod entity;
pub mod error;
mod macros;
pub mod product;
pub mod user;
mod validation;
pub mod value_object;

pub use cart::{
    Cart, CartCreationDate, CartCreationDateError, CartError, CartInput, CartItem, CartItemError,
    CartUpdateDate, CartUpdateDateError, DateInput,
};
pub use entity::{AggregateRoot, Entity};
pub use error::{DomainError, Exception};
pub use product::{
    Currency, Locale, Price, PriceError, PriceFormat, PriceFormatError, Product, ProductError,
    ProductInput, ProductTitle, ProductTitleError, ProductVariant, ProductVariantError,
    ProductVariantInput,
};
pub use user::{
    Email, EmailError, FirstName, FirstNameError, LastName, LastNameError, Password,
    PasswordError, Role, User, UserError, UserInput,
};
pub use value_object::ValueObject;
