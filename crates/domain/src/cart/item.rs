//! CartItem entity.

use common::UniqueEntityId;

use super::CartItemError;
use crate::entity::Entity;
use crate::product::{Price, ProductVariant};

/// Validated state of a cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemProps {
    pub variant: ProductVariant,
    pub quantity: u32,
}

/// One line of a cart: a product variant and how many of it.
pub type CartItem = Entity<CartItemProps>;

impl Entity<CartItemProps> {
    pub fn create(
        variant: ProductVariant,
        quantity: u32,
        id: Option<UniqueEntityId>,
    ) -> Result<CartItem, CartItemError> {
        if quantity == 0 {
            return Err(CartItemError::QuantityMustBePositive);
        }
        Ok(Entity::new(CartItemProps { variant, quantity }, id))
    }

    pub fn variant(&self) -> &ProductVariant {
        &self.props().variant
    }

    pub fn variant_id(&self) -> &UniqueEntityId {
        self.variant().id()
    }

    pub fn quantity(&self) -> u32 {
        self.props().quantity
    }

    /// Unit price times quantity.
    pub fn subtotal(&self) -> Price {
        self.variant().price().times(self.quantity())
    }

    pub fn add_quantity(&mut self, amount: u32) -> Result<(), CartItemError> {
        if amount == 0 {
            return Err(CartItemError::QuantityMustBePositive);
        }
        let quantity = self
            .quantity()
            .checked_add(amount)
            .ok_or(CartItemError::QuantityTooLarge)?;
        self.props_mut().quantity = quantity;
        Ok(())
    }

    pub fn set_quantity(&mut self, quantity: u32) -> Result<(), CartItemError> {
        if quantity == 0 {
            return Err(CartItemError::QuantityMustBePositive);
        }
        self.props_mut().quantity = quantity;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::ProductVariantInput;

    fn variant(cents: i64) -> ProductVariant {
        ProductVariant::create(ProductVariantInput::new("Default", cents), None).unwrap()
    }

    #[test]
    fn quantity_must_be_positive() {
        assert_eq!(
            CartItem::create(variant(100), 0, None),
            Err(CartItemError::QuantityMustBePositive)
        );
    }

    #[test]
    fn subtotal_multiplies_unit_price() {
        let item = CartItem::create(variant(250), 4, None).unwrap();
        assert_eq!(item.subtotal().as_cents(), 1000);
    }

    #[test]
    fn add_quantity() {
        let mut item = CartItem::create(variant(100), 2, None).unwrap();
        item.add_quantity(3).unwrap();
        assert_eq!(item.quantity(), 5);

        assert_eq!(item.add_quantity(0), Err(CartItemError::QuantityMustBePositive));
        assert_eq!(item.add_quantity(u32::MAX), Err(CartItemError::QuantityTooLarge));
        assert_eq!(item.quantity(), 5);
    }

    #[test]
    fn set_quantity() {
        let mut item = CartItem::create(variant(100), 2, None).unwrap();
        item.set_quantity(7).unwrap();
        assert_eq!(item.quantity(), 7);
        assert_eq!(item.set_quantity(0), Err(CartItemError::QuantityMustBePositive));
    }

    #[test]
    fn keeps_variant_identity() {
        let v = variant(100);
        let item = CartItem::create(v.clone(), 1, None).unwrap();
        assert_eq!(item.variant_id(), v.id());
        assert_ne!(item.id(), v.id());
    }
}
