//! ProductVariant entity.

use serde::{Deserialize, Serialize};

use common::{Combine, UniqueEntityId, combine};

use super::ProductVariantError;
use super::price::{Price, PriceError};
use crate::entity::Entity;
use crate::validation::{char_count, ensure, ensure_max_chars};

const NAME_MAX_LENGTH: usize = 100;
const DESCRIPTION_MAX_LENGTH: usize = 1000;

/// Raw, unvalidated input for [`ProductVariant::create`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVariantInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price_cents: i64,
}

impl ProductVariantInput {
    pub fn new(name: impl Into<String>, price_cents: i64) -> Self {
        Self {
            name: name.into(),
            description: None,
            price_cents,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Validated state of a variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductVariantProps {
    pub name: String,
    pub description: Option<String>,
    pub price: Price,
}

/// One purchasable form of a product, e.g. a size or color.
pub type ProductVariant = Entity<ProductVariantProps>;

fn validate_name(raw: &str) -> Result<String, ProductVariantError> {
    let name = raw.trim();
    combine([
        ensure(!name.is_empty(), ProductVariantError::NameRequired),
        ensure_max_chars(name, NAME_MAX_LENGTH, ProductVariantError::NameTooLong),
    ])?;
    Ok(name.to_string())
}

/// Blank descriptions become `None`.
fn validate_description(raw: Option<&str>) -> Result<Option<String>, ProductVariantError> {
    let description = raw.map(str::trim).filter(|d| !d.is_empty());
    match description {
        Some(d) if char_count(d) > DESCRIPTION_MAX_LENGTH => {
            Err(ProductVariantError::DescriptionTooLong)
        }
        other => Ok(other.map(str::to_string)),
    }
}

impl Entity<ProductVariantProps> {
    /// Validates name, description and price, in that order.
    pub fn create(
        input: ProductVariantInput,
        id: Option<UniqueEntityId>,
    ) -> Result<ProductVariant, ProductVariantError> {
        let validated: Result<_, ProductVariantError> = (
            validate_name(&input.name),
            validate_description(input.description.as_deref()),
            Price::create(input.price_cents),
        )
            .combine();
        let (name, description, price) = validated?;

        Ok(Entity::new(
            ProductVariantProps {
                name,
                description,
                price,
            },
            id,
        ))
    }

    pub fn name(&self) -> &str {
        &self.props().name
    }

    pub fn description(&self) -> Option<&str> {
        self.props().description.as_deref()
    }

    pub fn price(&self) -> Price {
        self.props().price
    }

    pub(crate) fn has_name(&self, name: &str) -> bool {
        self.name().to_lowercase() == name.trim().to_lowercase()
    }

    pub fn change_price(&mut self, cents: i64) -> Result<(), PriceError> {
        self.props_mut().price = Price::create(cents)?;
        Ok(())
    }

    pub fn rename(&mut self, raw: &str) -> Result<(), ProductVariantError> {
        self.props_mut().name = validate_name(raw)?;
        Ok(())
    }

    pub fn change_description(&mut self, raw: Option<&str>) -> Result<(), ProductVariantError> {
        self.props_mut().description = validate_description(raw)?;
        Ok(())
    }
}
