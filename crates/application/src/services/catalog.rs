//! Catalog management.

use serde::{Deserialize, Serialize};

use common::combine;
use domain::{Product, ProductError, ProductInput, ProductVariant, ProductVariantInput};
use store::ProductRepository;

use super::parse_id;
use crate::error::{Result, ServiceError};

/// Request to create a product with its variants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProduct {
    pub title: String,
    #[serde(default)]
    pub variants: Vec<ProductVariantInput>,
}

impl CreateProduct {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            variants: Vec::new(),
        }
    }

    pub fn with_variant(mut self, variant: ProductVariantInput) -> Self {
        self.variants.push(variant);
        self
    }
}

/// Service for managing the product catalog.
pub struct CatalogService<R: ProductRepository> {
    products: R,
}

impl<R: ProductRepository> CatalogService<R> {
    pub fn new(products: R) -> Self {
        Self { products }
    }

    /// Returns a reference to the underlying repository.
    pub fn repository(&self) -> &R {
        &self.products
    }

    /// Validates every variant, then the product as a whole.
    #[tracing::instrument(skip(self, request), fields(title = %request.title))]
    pub async fn create_product(&self, request: CreateProduct) -> Result<Product> {
        let variants = combine(
            request
                .variants
                .into_iter()
                .map(|input| ProductVariant::create(input, None)),
        )
        .map_err(ProductError::from)?;

        let product = Product::create(
            ProductInput {
                title: request.title,
                variants,
            },
            None,
        )?;
        self.products.save(&product).await?;

        metrics::counter!("products_created_total").increment(1);
        tracing::info!(product_id = %product.id(), "product created");
        Ok(product)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_product(&self, product_id: &str) -> Result<Product> {
        let id = parse_id(product_id)?;
        self.products
            .find_by_id(&id)
            .await?
            .ok_or_else(|| ServiceError::ProductNotFound(product_id.to_string()))
    }

    #[tracing::instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>> {
        Ok(self.products.list().await?)
    }

    /// Adds a new variant and returns the updated product.
    #[tracing::instrument(skip(self, input))]
    pub async fn add_variant(
        &self,
        product_id: &str,
        input: ProductVariantInput,
    ) -> Result<Product> {
        let mut product = self.get_product(product_id).await?;
        let variant = ProductVariant::create(input, None)?;
        product.add_variant(variant)?;
        self.products.save(&product).await?;
        Ok(product)
    }

    /// Removes a variant and returns it.
    #[tracing::instrument(skip(self))]
    pub async fn remove_variant(&self, product_id: &str, variant_id: &str) -> Result<ProductVariant> {
        let mut product = self.get_product(product_id).await?;
        let variant_id = parse_id(variant_id)?;
        let removed = product.remove_variant(&variant_id)?;
        self.products.save(&product).await?;
        Ok(removed)
    }

    #[tracing::instrument(skip(self))]
    pub async fn change_variant_price(
        &self,
        product_id: &str,
        variant_id: &str,
        cents: i64,
    ) -> Result<Product> {
        let mut product = self.get_product(product_id).await?;
        let variant_id = parse_id(variant_id)?;
        product.change_variant_price(&variant_id, cents)?;
        self.products.save(&product).await?;
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use domain::Price;
    use store::InMemoryProductRepository;

    use super::*;

    fn service() -> CatalogService<InMemoryProductRepository> {
        CatalogService::new(InMemoryProductRepository::new())
    }

    fn tee() -> CreateProduct {
        CreateProduct::new("Plain T-Shirt")
            .with_variant(ProductVariantInput::new("Small", 999))
            .with_variant(ProductVariantInput::new("Large", 1299).with_description("Roomy"))
    }

    #[tokio::test]
    async fn test_create_and_get_product() {
        let service = service();
        let product = service.create_product(tee()).await.unwrap();
        assert_eq!(product.variants().len(), 2);

        let loaded = service.get_product(product.id().as_str()).await.unwrap();
        assert_eq!(loaded.title().value(), "Plain T-Shirt");
        assert_eq!(loaded.cheapest_price(), Some(Price::create(999).unwrap()));
    }

    #[tokio::test]
    async fn test_create_reports_first_invalid_variant() {
        let service = service();
        let request = CreateProduct::new("Mug")
            .with_variant(ProductVariantInput::new("Blue", -1))
            .with_variant(ProductVariantInput::new("", 100));

        let error = service.create_product(request).await.unwrap_err();
        assert_eq!(error.exception(), "PRICE_CANNOT_BE_NEGATIVE");
        assert!(service.list_products().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_variant_names() {
        let service = service();
        let request = CreateProduct::new("Mug")
            .with_variant(ProductVariantInput::new("Blue", 500))
            .with_variant(ProductVariantInput::new("BLUE", 600));

        let error = service.create_product(request).await.unwrap_err();
        assert_eq!(error.exception(), "PRODUCT_DUPLICATE_VARIANT_NAME");
    }

    #[tokio::test]
    async fn test_get_missing_product() {
        let service = service();
        let id = common::UniqueEntityId::new();
        let error = service.get_product(id.as_str()).await.unwrap_err();
        assert!(matches!(error, ServiceError::ProductNotFound(_)));
        assert_eq!(error.status_hint(), 404);
    }

    #[tokio::test]
    async fn test_variant_lifecycle() {
        let service = service();
        let product = service.create_product(tee()).await.unwrap();
        let product_id = product.id().as_str();

        let updated = service
            .add_variant(product_id, ProductVariantInput::new("Medium", 1099))
            .await
            .unwrap();
        assert_eq!(updated.variants().len(), 3);

        let medium = updated.variants()[2].id().clone();
        let changed = service
            .change_variant_price(product_id, medium.as_str(), 1149)
            .await
            .unwrap();
        assert_eq!(changed.variant(&medium).unwrap().price().as_cents(), 1149);

        let removed = service.remove_variant(product_id, medium.as_str()).await.unwrap();
        assert_eq!(removed.name(), "Medium");

        let error = service
            .remove_variant(product_id, medium.as_str())
            .await
            .unwrap_err();
        assert_eq!(error.exception(), "PRODUCT_VARIANT_NOT_FOUND");
        assert_eq!(service.get_product(product_id).await.unwrap().variants().len(), 2);
    }

    #[tokio::test]
    async fn test_add_variant_rejects_duplicate_name() {
        let service = service();
        let product = service.create_product(tee()).await.unwrap();

        let error = service
            .add_variant(product.id().as_str(), ProductVariantInput::new("small", 100))
            .await
            .unwrap_err();
        assert_eq!(error.exception(), "PRODUCT_DUPLICATE_VARIANT_NAME");
    }
}
