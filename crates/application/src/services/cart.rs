//! Shopping cart use cases.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use common::UniqueEntityId;
use common::time::{Clock, SystemClock};
use domain::{Cart, CartInput};
use store::{CartRepository, ProductRepository, StoreError, UserRepository};

use super::parse_id;
use crate::error::{Result, ServiceError};

/// One lock per cart id. Holding it spans a whole load, change and save.
#[derive(Default)]
struct CartLocks {
    locks: Mutex<HashMap<UniqueEntityId, Arc<Mutex<()>>>>,
}

impl CartLocks {
    async fn acquire(&self, cart_id: &UniqueEntityId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            Arc::clone(locks.entry(cart_id.clone()).or_default())
        };
        lock.lock_owned().await
    }
}

/// Service for managing carts.
///
/// Reads users and products to validate owners and resolve variants; only
/// carts are written. Changes to one cart run one at a time.
pub struct CartService<C, U, P>
where
    C: CartRepository,
    U: UserRepository,
    P: ProductRepository,
{
    carts: C,
    users: U,
    products: P,
    clock: Arc<dyn Clock>,
    locks: CartLocks,
}

impl<C, U, P> CartService<C, U, P>
where
    C: CartRepository,
    U: UserRepository,
    P: ProductRepository,
{
    pub fn new(carts: C, users: U, products: P) -> Self {
        Self {
            carts,
            users,
            products,
            clock: Arc::new(SystemClock),
            locks: CartLocks::default(),
        }
    }

    /// Replaces the clock used to date carts and their changes.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Returns a reference to the cart repository.
    pub fn repository(&self) -> &C {
        &self.carts
    }

    /// Opens the single cart of an existing user.
    #[tracing::instrument(skip(self))]
    pub async fn create_cart(&self, owner_id: &str) -> Result<Cart> {
        let owner = parse_id(owner_id)?;
        if self.users.find_by_id(&owner).await?.is_none() {
            return Err(ServiceError::UserNotFound(owner_id.to_string()));
        }
        if self.carts.find_by_owner(&owner).await?.is_some() {
            return Err(ServiceError::CartAlreadyExists(owner_id.to_string()));
        }

        let cart = Cart::create_at(CartInput::for_owner(&owner), None, self.clock.as_ref())?;

        // The repository rechecks the owner under its lock; a racing
        // creation surfaces as a conflict.
        self.carts.save(&cart).await.map_err(|e| match e {
            StoreError::Conflict { .. } => ServiceError::CartAlreadyExists(owner_id.to_string()),
            other => other.into(),
        })?;
        tracing::info!(cart_id = %cart.id(), "cart created");
        Ok(cart)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_cart(&self, cart_id: &str) -> Result<Cart> {
        let id = parse_id(cart_id)?;
        self.load(&id).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_cart_for_owner(&self, owner_id: &str) -> Result<Cart> {
        let owner = parse_id(owner_id)?;
        self.carts
            .find_by_owner(&owner)
            .await?
            .ok_or_else(|| ServiceError::CartNotFound(owner_id.to_string()))
    }

    /// Adds `quantity` of a catalog variant, merging with an existing line.
    #[tracing::instrument(skip(self))]
    pub async fn add_to_cart(&self, cart_id: &str, variant_id: &str, quantity: u32) -> Result<Cart> {
        let cart_id = parse_id(cart_id)?;
        let variant_id = parse_id(variant_id)?;

        let variant = self
            .products
            .find_by_variant_id(&variant_id)
            .await?
            .and_then(|product| product.variant(&variant_id).cloned())
            .ok_or_else(|| ServiceError::VariantNotFound(variant_id.to_string()))?;

        let cart = self
            .modify(&cart_id, |cart, clock| {
                cart.add_product_variant_at(variant, quantity, clock)
            })
            .await?;

        metrics::counter!("cart_items_added_total").increment(u64::from(quantity));
        tracing::info!(cart_id = %cart.id(), %variant_id, quantity, "item added to cart");
        Ok(cart)
    }

    #[tracing::instrument(skip(self))]
    pub async fn remove_from_cart(&self, cart_id: &str, variant_id: &str) -> Result<Cart> {
        let cart_id = parse_id(cart_id)?;
        let variant_id = parse_id(variant_id)?;
        self.modify(&cart_id, |cart, clock| {
            cart.remove_product_variant_at(&variant_id, clock).map(|_| ())
        })
        .await
    }

    /// Sets a line's quantity; zero removes the line.
    #[tracing::instrument(skip(self))]
    pub async fn update_quantity(
        &self,
        cart_id: &str,
        variant_id: &str,
        quantity: u32,
    ) -> Result<Cart> {
        let cart_id = parse_id(cart_id)?;
        let variant_id = parse_id(variant_id)?;
        self.modify(&cart_id, |cart, clock| {
            cart.update_item_quantity_at(&variant_id, quantity, clock)
        })
        .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn clear_cart(&self, cart_id: &str) -> Result<Cart> {
        let cart_id = parse_id(cart_id)?;
        self.modify(&cart_id, |cart, clock| {
            cart.clear_at(clock);
            Ok::<(), ServiceError>(())
        })
        .await
    }

    async fn load(&self, cart_id: &UniqueEntityId) -> Result<Cart> {
        self.carts
            .find_by_id(cart_id)
            .await?
            .ok_or_else(|| ServiceError::CartNotFound(cart_id.to_string()))
    }

    /// Loads, changes and saves a cart while holding its lock.
    async fn modify<E>(
        &self,
        cart_id: &UniqueEntityId,
        change: impl FnOnce(&mut Cart, &dyn Clock) -> std::result::Result<(), E>,
    ) -> Result<Cart>
    where
        ServiceError: From<E>,
    {
        let _guard = self.locks.acquire(cart_id).await;
        let mut cart = self.load(cart_id).await?;
        change(&mut cart, self.clock.as_ref())?;
        self.carts.save(&cart).await?;
        Ok(cart)
    }
}
