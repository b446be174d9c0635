//! Persistence for the shop aggregates.
//!
//! - [`UserRepository`], [`ProductRepository`] and [`CartRepository`] traits
//! - Serializable records that rebuild aggregates through their factories
//! - In-memory implementations with JSON export and import

pub mod error;
pub mod memory;
pub mod records;
pub mod repository;

pub use error::{Result, StoreError};
pub use memory::{InMemoryCartRepository, InMemoryProductRepository, InMemoryUserRepository};
pub use records::{
    CartItemRecord, CartRecord, ProductRecord, ProductVariantRecord, Record, UserRecord,
};
pub use repository::{CartRepository, ProductRepository, UserRepository};
