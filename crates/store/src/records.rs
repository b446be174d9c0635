//! Serializable snapshots of the aggregates.
//!
//! Records hold primitives only. Loading a record goes back through the
//! domain factories, so a record that no longer validates is reported as
//! [`StoreError::Corrupted`] instead of producing an invalid aggregate.

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use common::time::DateTime;
use common::{Either, UniqueEntityId, combine};
use domain::{
    AggregateRoot, Cart, CartInput, CartItem, Exception, Product, ProductInput, ProductVariant,
    ProductVariantInput, Role, User, UserInput,
};

use crate::{Result, StoreError};

/// A stored form of an aggregate root.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    type Aggregate: AggregateRoot + Clone + Send + Sync + 'static;

    fn from_aggregate(aggregate: &Self::Aggregate) -> Self;

    /// Rebuilds the aggregate through its validating factory.
    fn into_aggregate(self) -> Result<Self::Aggregate>;

    fn id(&self) -> &UniqueEntityId;

    /// A field no two stored records may share, as `(field, value)`.
    fn unique_key(&self) -> Option<(&'static str, String)> {
        None
    }
}

fn corrupted(aggregate_type: &'static str, id: &UniqueEntityId, error: &impl Exception) -> StoreError {
    tracing::warn!(aggregate_type, %id, code = error.code(), "stored record failed validation");
    StoreError::Corrupted {
        aggregate_type,
        id: id.to_string(),
        code: error.code(),
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UniqueEntityId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl std::fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRecord")
            .field("id", &self.id)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("role", &self.role)
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Record for UserRecord {
    type Aggregate = User;

    fn from_aggregate(user: &User) -> Self {
        Self {
            id: user.id().clone(),
            first_name: user.first_name().value().to_string(),
            last_name: user.last_name().value().to_string(),
            email: user.email().value().to_string(),
            password: user.password().value().to_string(),
            role: user.role(),
            refresh_token: user.refresh_token().map(str::to_string),
        }
    }

    fn into_aggregate(self) -> Result<User> {
        let input = UserInput {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            password: self.password,
            role: self.role,
            refresh_token: self.refresh_token,
        };
        User::create(input, Some(self.id.clone()))
            .map_err(|error| corrupted(User::aggregate_type(), &self.id, &error))
    }

    fn id(&self) -> &UniqueEntityId {
        &self.id
    }

    fn unique_key(&self) -> Option<(&'static str, String)> {
        Some(("email", self.email.clone()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVariantRecord {
    pub id: UniqueEntityId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price_cents: i64,
}

impl ProductVariantRecord {
    pub fn from_variant(variant: &ProductVariant) -> Self {
        Self {
            id: variant.id().clone(),
            name: variant.name().to_string(),
            description: variant.description().map(str::to_string),
            price_cents: variant.price().as_cents(),
        }
    }

    pub fn into_variant(self) -> Result<ProductVariant> {
        let input = ProductVariantInput {
            name: self.name,
            description: self.description,
            price_cents: self.price_cents,
        };
        ProductVariant::create(input, Some(self.id.clone()))
            .map_err(|error| corrupted("ProductVariant", &self.id, &error))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: UniqueEntityId,
    pub title: String,
    #[serde(default)]
    pub variants: Vec<ProductVariantRecord>,
}

impl Record for ProductRecord {
    type Aggregate = Product;

    fn from_aggregate(product: &Product) -> Self {
        Self {
            id: product.id().clone(),
            title: product.title().value().to_string(),
            variants: product
                .variants()
                .iter()
                .map(ProductVariantRecord::from_variant)
                .collect(),
        }
    }

    fn into_aggregate(self) -> Result<Product> {
        let variants = combine(self.variants.into_iter().map(ProductVariantRecord::into_variant))?;
        let input = ProductInput {
            title: self.title,
            variants,
        };
        Product::create(input, Some(self.id.clone()))
            .map_err(|error| corrupted(Product::aggregate_type(), &self.id, &error))
    }

    fn id(&self) -> &UniqueEntityId {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItemRecord {
    pub id: UniqueEntityId,
    /// The variant as it was when added, price included.
    pub variant: ProductVariantRecord,
    pub quantity: u32,
}

impl CartItemRecord {
    pub fn from_item(item: &CartItem) -> Self {
        Self {
            id: item.id().clone(),
            variant: ProductVariantRecord::from_variant(item.variant()),
            quantity: item.quantity(),
        }
    }

    pub fn into_item(self) -> Result<CartItem> {
        let variant = self.variant.into_variant()?;
        CartItem::create(variant, self.quantity, Some(self.id.clone()))
            .map_err(|error| corrupted("CartItem", &self.id, &error))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartRecord {
    pub id: UniqueEntityId,
    pub owner_id: UniqueEntityId,
    pub created_at: DateTime,
    pub updated_at: DateTime,
    #[serde(default)]
    pub items: Vec<CartItemRecord>,
}

impl Record for CartRecord {
    type Aggregate = Cart;

    fn from_aggregate(cart: &Cart) -> Self {
        Self {
            id: cart.id().clone(),
            owner_id: cart.owner_id().clone(),
            created_at: cart.created_at(),
            updated_at: cart.updated_at(),
            items: cart.items().iter().map(CartItemRecord::from_item).collect(),
        }
    }

    fn into_aggregate(self) -> Result<Cart> {
        let items = combine(self.items.into_iter().map(CartItemRecord::into_item))?;
        let input = CartInput {
            owner_id: self.owner_id.to_string(),
            created_at: Some(Either::Left(self.created_at)),
            updated_at: Some(Either::Left(self.updated_at)),
            items,
        };
        Cart::create(input, Some(self.id.clone()))
            .map_err(|error| corrupted(Cart::aggregate_type(), &self.id, &error))
    }

    fn id(&self) -> &UniqueEntityId {
        &self.id
    }

    fn unique_key(&self) -> Option<(&'static str, String)> {
        Some(("owner_id", self.owner_id.to_string()))
    }
}
