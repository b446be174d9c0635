//! Repository traits for the aggregates.
//!
//! Repositories store and load whole aggregates. All implementations must
//! be thread-safe (Send + Sync).

use async_trait::async_trait;

use common::UniqueEntityId;
use domain::{Cart, Email, Product, User};

use crate::Result;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts or replaces the user.
    ///
    /// Fails with `Conflict` when another user already has the email.
    async fn save(&self, user: &User) -> Result<()>;

    async fn find_by_id(&self, id: &UniqueEntityId) -> Result<Option<User>>;

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>>;

    async fn exists_by_email(&self, email: &Email) -> Result<bool>;

    /// Fails with `NotFound` when no user has the id.
    async fn delete(&self, id: &UniqueEntityId) -> Result<()>;

    /// All users, ordered by id.
    async fn list(&self) -> Result<Vec<User>>;
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Inserts or replaces the product.
    async fn save(&self, product: &Product) -> Result<()>;

    async fn find_by_id(&self, id: &UniqueEntityId) -> Result<Option<Product>>;

    /// The product offering the variant.
    async fn find_by_variant_id(&self, variant_id: &UniqueEntityId) -> Result<Option<Product>>;

    /// Fails with `NotFound` when no product has the id.
    async fn delete(&self, id: &UniqueEntityId) -> Result<()>;

    /// All products, ordered by id.
    async fn list(&self) -> Result<Vec<Product>>;
}

#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Inserts or replaces the cart.
    async fn save(&self, cart: &Cart) -> Result<()>;

    async fn find_by_id(&self, id: &UniqueEntityId) -> Result<Option<Cart>>;

    /// The cart owned by the user, if any.
    async fn find_by_owner(&self, owner_id: &UniqueEntityId) -> Result<Option<Cart>>;

    /// Fails with `NotFound` when no cart has the id.
    async fn delete(&self, id: &UniqueEntityId) -> Result<()>;
}
