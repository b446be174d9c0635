//! Cart aggregate implementation.

use std::collections::HashSet;

use common::time::{Clock, DateTime, FixedClock, SystemClock};
use common::{Combine, UniqueEntityId};

use super::item::CartItem;
use super::value_objects::{CartCreationDate, CartUpdateDate, DateInput};
use super::CartError;
use crate::entity::{AggregateRoot, Entity};
use crate::error::Exception;
use crate::product::{Price, ProductVariant};

/// Raw input for [`Cart::create`].
#[derive(Debug, Clone, Default)]
pub struct CartInput {
    pub owner_id: String,
    pub created_at: DateInput,
    pub updated_at: DateInput,
    pub items: Vec<CartItem>,
}

impl CartInput {
    /// An empty cart for `owner_id`, dated now.
    pub fn new(owner_id: impl Into<String>) -> Self {
        Self {
            owner_id: owner_id.into(),
            ..Default::default()
        }
    }

    pub fn for_owner(owner_id: &UniqueEntityId) -> Self {
        Self::new(owner_id.as_str())
    }
}

/// Validated state of a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartProps {
    pub owner_id: UniqueEntityId,
    pub created_at: CartCreationDate,
    pub updated_at: CartUpdateDate,
    pub items: Vec<CartItem>,
}

/// A user's shopping cart.
///
/// Holds at most one line per product variant. `updated_at` never precedes
/// `created_at` and moves forward on every successful change.
pub type Cart = Entity<CartProps>;

impl Entity<CartProps> {
    /// Builds a cart using the system clock for "now".
    pub fn create(input: CartInput, id: Option<UniqueEntityId>) -> Result<Cart, CartError> {
        Self::create_at(input, id, &SystemClock)
    }

    /// Validates owner id, creation date and update date in that order, then
    /// their ordering and the uniqueness of lines.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn create_at(
        input: CartInput,
        id: Option<UniqueEntityId>,
        clock: &dyn Clock,
    ) -> Result<Cart, CartError> {
        let now = FixedClock::new(clock.now());
        let validated: Result<_, CartError> = (
            UniqueEntityId::parse(&input.owner_id),
            CartCreationDate::create_at(input.created_at, &now),
            CartUpdateDate::create_at(input.updated_at, &now),
        )
            .combine();

        let (owner_id, created_at, updated_at) = validated.inspect_err(|error| {
            tracing::debug!(code = error.code(), "cart rejected");
        })?;

        if updated_at.value().is_before(&created_at.value()) {
            return Err(CartError::UpdatedBeforeCreated);
        }

        let mut variants = HashSet::new();
        if !input.items.iter().all(|item| variants.insert(item.variant_id())) {
            return Err(CartError::DuplicateItem);
        }

        Ok(Entity::new(
            CartProps {
                owner_id,
                created_at,
                updated_at,
                items: input.items,
            },
            id,
        ))
    }

    // Queries

    pub fn owner_id(&self) -> &UniqueEntityId {
        &self.props().owner_id
    }

    pub fn belongs_to(&self, user_id: &UniqueEntityId) -> bool {
        self.owner_id() == user_id
    }

    pub fn created_at(&self) -> DateTime {
        self.props().created_at.value()
    }

    pub fn updated_at(&self) -> DateTime {
        self.props().updated_at.value()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.props().items
    }

    /// The line holding `variant_id`.
    pub fn item(&self, variant_id: &UniqueEntityId) -> Option<&CartItem> {
        self.items().iter().find(|item| item.variant_id() == variant_id)
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    /// Units across all lines.
    pub fn total_quantity(&self) -> u64 {
        self.items().iter().map(|item| u64::from(item.quantity())).sum()
    }

    pub fn total(&self) -> Price {
        self.items().iter().map(|item| item.subtotal()).sum()
    }

    // Commands

    /// Adds `quantity` of `variant`, merging into an existing line.
    pub fn add_product_variant(
        &mut self,
        variant: ProductVariant,
        quantity: u32,
    ) -> Result<(), CartError> {
        self.add_product_variant_at(variant, quantity, &SystemClock)
    }

    pub fn add_product_variant_at(
        &mut self,
        variant: ProductVariant,
        quantity: u32,
        clock: &dyn Clock,
    ) -> Result<(), CartError> {
        match self.item_mut(variant.id()) {
            Some(item) => item.add_quantity(quantity)?,
            None => {
                let item = CartItem::create(variant, quantity, None)?;
                self.props_mut().items.push(item);
            }
        }
        self.touch(clock);
        Ok(())
    }

    /// Removes the whole line for `variant_id`.
    pub fn remove_product_variant(
        &mut self,
        variant_id: &UniqueEntityId,
    ) -> Result<CartItem, CartError> {
        self.remove_product_variant_at(variant_id, &SystemClock)
    }

    pub fn remove_product_variant_at(
        &mut self,
        variant_id: &UniqueEntityId,
        clock: &dyn Clock,
    ) -> Result<CartItem, CartError> {
        let position = self
            .items()
            .iter()
            .position(|item| item.variant_id() == variant_id)
            .ok_or(CartError::ItemNotFound)?;
        let removed = self.props_mut().items.remove(position);
        self.touch(clock);
        Ok(removed)
    }

    /// Sets the quantity of a line. Zero removes the line.
    pub fn update_item_quantity(
        &mut self,
        variant_id: &UniqueEntityId,
        quantity: u32,
    ) -> Result<(), CartError> {
        self.update_item_quantity_at(variant_id, quantity, &SystemClock)
    }

    pub fn update_item_quantity_at(
        &mut self,
        variant_id: &UniqueEntityId,
        quantity: u32,
        clock: &dyn Clock,
    ) -> Result<(), CartError> {
        if quantity == 0 {
            return self.remove_product_variant_at(variant_id, clock).map(|_| ());
        }
        self.item_mut(variant_id)
            .ok_or(CartError::ItemNotFound)?
            .set_quantity(quantity)?;
        self.touch(clock);
        Ok(())
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.clear_at(&SystemClock);
    }

    pub fn clear_at(&mut self, clock: &dyn Clock) {
        self.props_mut().items.clear();
        self.touch(clock);
    }

    fn item_mut(&mut self, variant_id: &UniqueEntityId) -> Option<&mut CartItem> {
        self.props_mut()
            .items
            .iter_mut()
            .find(|item| item.variant_id() == variant_id)
    }

    fn touch(&mut self, clock: &dyn Clock) {
        let floor = self.updated_at();
        self.props_mut().updated_at = CartUpdateDate::touched(clock, floor);
    }
}

impl AggregateRoot for Cart {
    fn aggregate_type() -> &'static str {
        "Cart"
    }

    fn root_id(&self) -> &UniqueEntityId {
        self.id()
    }
}

#[cfg(test)]
mod tests {
    use common::Either;
    use common::time::Duration;

    use super::*;
    use crate::cart::{CartCreationDateError, CartItemError};
    use crate::product::ProductVariantInput;

    const OWNER: &str = "3b241101-e2bb-4255-8caf-4136c566a962";

    fn clock_at(text: &str) -> FixedClock {
        FixedClock::new(DateTime::parse(text).unwrap())
    }

    fn variant(name: &str, cents: i64) -> ProductVariant {
        ProductVariant::create(ProductVariantInput::new(name, cents), None).unwrap()
    }

    fn empty_cart(clock: &dyn Clock) -> Cart {
        Cart::create_at(CartInput::new(OWNER), None, clock).unwrap()
    }

    mod creation {
        use super::*;

        #[test]
        fn defaults_dates_to_now() {
            let clock = clock_at("2024-06-15T12:00:00Z");
            let cart = empty_cart(&clock);

            assert_eq!(cart.created_at(), clock.now());
            assert_eq!(cart.updated_at(), clock.now());
            assert_eq!(cart.owner_id().as_str(), OWNER);
            assert!(cart.is_empty());
        }

        #[test]
        fn rejects_invalid_owner_first() {
            let input = CartInput {
                owner_id: "nope".into(),
                created_at: Some(Either::Right("2123-11-21T00:00:00.000Z".into())),
                ..Default::default()
            };
            let error = Cart::create(input, None).unwrap_err();
            assert_eq!(error.code(), "NOT_VALID_UUID");
        }

        #[test]
        fn rejects_future_creation_date() {
            let input = CartInput {
                created_at: Some(Either::Right("2123-11-21T00:00:00.000Z".into())),
                ..CartInput::new(OWNER)
            };
            assert_eq!(
                Cart::create(input, None),
                Err(CartError::CreatedAt(CartCreationDateError::CannotBeInTheFuture))
            );
        }

        #[test]
        fn rejects_update_before_creation() {
            let clock = clock_at("2024-06-15T12:00:00Z");
            let input = CartInput {
                created_at: Some(Either::Right("2024-06-10T00:00:00Z".into())),
                updated_at: Some(Either::Right("2024-06-01T00:00:00Z".into())),
                ..CartInput::new(OWNER)
            };
            let error = Cart::create_at(input, None, &clock).unwrap_err();
            assert_eq!(error, CartError::UpdatedBeforeCreated);
            assert_eq!(error.code(), "CART_UPDATED_BEFORE_CREATED");
        }

        #[test]
        fn rejects_two_lines_for_one_variant() {
            let v = variant("Blue", 100);
            let input = CartInput {
                items: vec![
                    CartItem::create(v.clone(), 1, None).unwrap(),
                    CartItem::create(v, 2, None).unwrap(),
                ],
                ..CartInput::new(OWNER)
            };
            assert_eq!(Cart::create(input, None), Err(CartError::DuplicateItem));
        }
    }

    mod lines {
        use super::*;

        #[test]
        fn adding_the_same_variant_merges_lines() {
            let clock = clock_at("2024-06-15T12:00:00Z");
            let mut cart = empty_cart(&clock);
            let blue = variant("Blue", 250);

            cart.add_product_variant_at(blue.clone(), 1, &clock).unwrap();
            cart.add_product_variant_at(blue.clone(), 2, &clock).unwrap();
            cart.add_product_variant_at(variant("Red", 100), 1, &clock).unwrap();

            assert_eq!(cart.items().len(), 2);
            assert_eq!(cart.item(blue.id()).map(|i| i.quantity()), Some(3));
            assert_eq!(cart.total_quantity(), 4);
            assert_eq!(cart.total().as_cents(), 850);
        }

        #[test]
        fn adding_zero_is_rejected_without_touching() {
            let clock = clock_at("2024-06-15T12:00:00Z");
            let mut cart = empty_cart(&clock);
            let later = FixedClock::new(clock.now() + Duration::hours(1));

            assert_eq!(
                cart.add_product_variant_at(variant("Blue", 1), 0, &later),
                Err(CartError::Item(CartItemError::QuantityMustBePositive))
            );
            assert!(cart.is_empty());
            assert_eq!(cart.updated_at(), clock.now());
        }

        #[test]
        fn remove_and_update() {
            let clock = clock_at("2024-06-15T12:00:00Z");
            let mut cart = empty_cart(&clock);
            let blue = variant("Blue", 100);
            let red = variant("Red", 100);
            cart.add_product_variant_at(blue.clone(), 2, &clock).unwrap();
            cart.add_product_variant_at(red.clone(), 2, &clock).unwrap();

            cart.update_item_quantity_at(blue.id(), 5, &clock).unwrap();
            assert_eq!(cart.item(blue.id()).map(|i| i.quantity()), Some(5));

            cart.update_item_quantity_at(blue.id(), 0, &clock).unwrap();
            assert!(cart.item(blue.id()).is_none());

            let removed = cart.remove_product_variant_at(red.id(), &clock).unwrap();
            assert_eq!(removed.quantity(), 2);
            assert!(cart.is_empty());

            assert_eq!(
                cart.remove_product_variant_at(red.id(), &clock),
                Err(CartError::ItemNotFound)
            );
            assert_eq!(
                cart.update_item_quantity_at(red.id(), 1, &clock),
                Err(CartError::ItemNotFound)
            );
        }

        #[test]
        fn clear_empties_cart() {
            let clock = clock_at("2024-06-15T12:00:00Z");
            let mut cart = empty_cart(&clock);
            cart.add_product_variant_at(variant("Blue", 100), 3, &clock).unwrap();
            cart.clear_at(&clock);
            assert!(cart.is_empty());
            assert_eq!(cart.total(), Price::zero());
        }
    }

    #[test]
    fn mutations_move_updated_at_forward() {
        let clock = clock_at("2024-06-15T12:00:00Z");
        let mut cart = empty_cart(&clock);

        let later = clock_at("2024-06-15T13:00:00Z");
        cart.add_product_variant_at(variant("Blue", 100), 1, &later).unwrap();
        assert_eq!(cart.updated_at(), later.now());
        assert_eq!(cart.created_at(), clock.now());

        let skewed = clock_at("2024-06-15T11:00:00Z");
        cart.clear_at(&skewed);
        assert_eq!(cart.updated_at(), later.now());
    }

    #[test]
    fn belongs_to_owner() {
        let cart = Cart::create(CartInput::new(OWNER), None).unwrap();
        assert!(cart.belongs_to(&UniqueEntityId::parse(OWNER).unwrap()));
        assert!(!cart.belongs_to(&UniqueEntityId::new()));
        assert_eq!(Cart::aggregate_type(), "Cart");
    }
}
