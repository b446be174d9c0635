//! Product aggregate implementation.

use std::collections::HashSet;

use common::UniqueEntityId;

use super::ProductError;
use super::price::Price;
use super::value_objects::{ProductTitle, ProductTitleError};
use super::variant::ProductVariant;
use crate::entity::{AggregateRoot, Entity};
use crate::error::Exception;

/// Input for [`Product::create`]: a raw title and already built variants.
#[derive(Debug, Clone, Default)]
pub struct ProductInput {
    pub title: String,
    pub variants: Vec<ProductVariant>,
}

impl ProductInput {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            variants: Vec::new(),
        }
    }

    pub fn with_variant(mut self, variant: ProductVariant) -> Self {
        self.variants.push(variant);
        self
    }
}

/// Validated state of a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductProps {
    pub title: ProductTitle,
    pub variants: Vec<ProductVariant>,
}

/// A catalog entry offering one or more variants.
///
/// Variants are reached and changed only through the product.
pub type Product = Entity<ProductProps>;

impl Entity<ProductProps> {
    /// Validates the title, then checks variant names and ids are unique.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn create(input: ProductInput, id: Option<UniqueEntityId>) -> Result<Product, ProductError> {
        let title = ProductTitle::create(&input.title).inspect_err(|error| {
            tracing::debug!(code = error.code(), "product rejected");
        })?;
        ensure_unique(&input.variants)?;

        Ok(Entity::new(
            ProductProps {
                title,
                variants: input.variants,
            },
            id,
        ))
    }

    // Queries

    pub fn title(&self) -> &ProductTitle {
        &self.props().title
    }

    pub fn variants(&self) -> &[ProductVariant] {
        &self.props().variants
    }

    pub fn variant(&self, variant_id: &UniqueEntityId) -> Option<&ProductVariant> {
        self.variants().iter().find(|v| v.id() == variant_id)
    }

    pub fn has_variant(&self, variant_id: &UniqueEntityId) -> bool {
        self.variant(variant_id).is_some()
    }

    /// The lowest variant price, `None` without variants.
    pub fn cheapest_price(&self) -> Option<Price> {
        self.variants().iter().map(|v| v.price()).min()
    }

    // Commands

    pub fn add_variant(&mut self, variant: ProductVariant) -> Result<(), ProductError> {
        if self.has_variant(variant.id()) {
            return Err(ProductError::VariantAlreadyExists);
        }
        if self.variants().iter().any(|v| v.has_name(variant.name())) {
            return Err(ProductError::DuplicateVariantName);
        }
        self.props_mut().variants.push(variant);
        Ok(())
    }

    pub fn remove_variant(&mut self, variant_id: &UniqueEntityId) -> Result<ProductVariant, ProductError> {
        let position = self
            .variants()
            .iter()
            .position(|v| v.id() == variant_id)
            .ok_or(ProductError::VariantNotFound)?;
        Ok(self.props_mut().variants.remove(position))
    }

    pub fn rename(&mut self, raw: &str) -> Result<(), ProductTitleError> {
        self.props_mut().title = ProductTitle::create(raw)?;
        Ok(())
    }

    pub fn change_variant_price(
        &mut self,
        variant_id: &UniqueEntityId,
        cents: i64,
    ) -> Result<(), ProductError> {
        let variant = self
            .props_mut()
            .variants
            .iter_mut()
            .find(|v| v.id() == variant_id)
            .ok_or(ProductError::VariantNotFound)?;
        variant.change_price(cents)?;
        Ok(())
    }
}

fn ensure_unique(variants: &[ProductVariant]) -> Result<(), ProductError> {
    let mut ids = HashSet::new();
    let mut names = HashSet::new();
    for variant in variants {
        if !ids.insert(variant.id()) {
            return Err(ProductError::VariantAlreadyExists);
        }
        if !names.insert(variant.name().to_lowercase()) {
            return Err(ProductError::DuplicateVariantName);
        }
    }
    Ok(())
}

impl AggregateRoot for Product {
    fn aggregate_type() -> &'static str {
        "Product"
    }

    fn root_id(&self) -> &UniqueEntityId {
        self.id()
    }
}
