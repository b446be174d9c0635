//! Use case error types with HTTP status hints.

use common::UniqueEntityIdError;
use domain::{
    CartError, CartItemError, DomainError, Exception, ProductError, ProductVariantError, UserError,
};
use store::StoreError;
use thiserror::Error;

/// Errors returned by the services.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// An id in the request is not a UUID.
    #[error("Invalid id: {0}")]
    InvalidId(#[from] UniqueEntityIdError),

    /// Domain validation rejected the request.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A user with the same email is already registered.
    #[error("User already exists")]
    UserAlreadyExists,

    /// The supplied password does not match.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// User not found.
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// No product offers the variant.
    #[error("Product variant not found: {0}")]
    VariantNotFound(String),

    /// Cart not found.
    #[error("Cart not found: {0}")]
    CartNotFound(String),

    /// The user already owns a cart.
    #[error("Cart already exists for user {0}")]
    CartAlreadyExists(String),

    /// The repository failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

macro_rules! from_domain_error {
    ($($error:ty),+) => {
        $(impl From<$error> for ServiceError {
            fn from(error: $error) -> Self {
                ServiceError::Domain(DomainError::from(error))
            }
        })+
    };
}

from_domain_error!(UserError, ProductError, ProductVariantError, CartError, CartItemError);

impl ServiceError {
    /// Machine-readable code for the failure.
    pub fn exception(&self) -> &'static str {
        match self {
            ServiceError::InvalidId(e) => e.code(),
            ServiceError::Domain(e) => e.code(),
            ServiceError::UserAlreadyExists => "USER_ALREADY_EXISTS",
            ServiceError::InvalidCredentials => "INVALID_CREDENTIALS",
            ServiceError::UserNotFound(_) => "USER_NOT_FOUND",
            ServiceError::ProductNotFound(_) => "PRODUCT_NOT_FOUND",
            ServiceError::VariantNotFound(_) => "PRODUCT_VARIANT_NOT_FOUND",
            ServiceError::CartNotFound(_) => "CART_NOT_FOUND",
            ServiceError::CartAlreadyExists(_) => "CART_ALREADY_EXISTS",
            ServiceError::Store(e) => e.code(),
        }
    }

    /// The HTTP status a route layer should answer with.
    pub fn status_hint(&self) -> u16 {
        match self {
            ServiceError::InvalidId(_) => 400,
            ServiceError::Domain(DomainError::Product(ProductError::VariantNotFound))
            | ServiceError::Domain(DomainError::Cart(CartError::ItemNotFound)) => 404,
            ServiceError::Domain(_) => 400,
            ServiceError::InvalidCredentials => 401,
            ServiceError::UserNotFound(_)
            | ServiceError::ProductNotFound(_)
            | ServiceError::VariantNotFound(_)
            | ServiceError::CartNotFound(_) => 404,
            ServiceError::UserAlreadyExists | ServiceError::CartAlreadyExists(_) => 409,
            ServiceError::Store(StoreError::NotFound { .. }) => 404,
            ServiceError::Store(StoreError::Conflict { .. }) => 409,
            ServiceError::Store(_) => 500,
        }
    }

    /// JSON body for an error response.
    pub fn to_body(&self) -> serde_json::Value {
        if self.status_hint() >= 500 {
            tracing::error!(error = %self, "internal error");
        }
        serde_json::json!({
            "error": self.to_string(),
            "code": self.exception(),
        })
    }
}

/// Result type for service operations.
pub type Result<T> = std::result::Result<T, ServiceError>;
