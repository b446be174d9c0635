//! End-to-end shopping flows through the services.

use std::sync::Arc;

use application::{AppState, CreateProduct, ServiceError, create_state_with_clock};
use common::time::{DateTime, FixedClock};
use domain::{Currency, Locale, PriceFormat, ProductVariantInput, UserInput};

fn create_state() -> Arc<AppState> {
    let now = DateTime::from_ymd_hms(2024, 6, 1, 9, 30, 0).unwrap();
    create_state_with_clock(Arc::new(FixedClock::new(now)))
}

fn customer(email: &str) -> UserInput {
    UserInput::new("John", "Doe", email, "myComplexPassword123!")
}

mod checkout_flow {
    use super::*;

    #[tokio::test]
    async fn test_register_browse_and_fill_cart() {
        let state = create_state();
        let user = state.users.register(customer("john@example.com")).await.unwrap();

        let hoodie = state
            .catalog
            .create_product(
                CreateProduct::new("Zip Hoodie")
                    .with_variant(ProductVariantInput::new("Grey / M", 3999))
                    .with_variant(ProductVariantInput::new("Black / L", 4499)),
            )
            .await
            .unwrap();
        let socks = state
            .catalog
            .create_product(
                CreateProduct::new("Wool Socks").with_variant(ProductVariantInput::new("One size", 999)),
            )
            .await
            .unwrap();

        let cart = state.carts.create_cart(user.id().as_str()).await.unwrap();
        let cart_id = cart.id().as_str();

        let grey = hoodie.variants()[0].id().to_string();
        let pair = socks.variants()[0].id().to_string();
        state.carts.add_to_cart(cart_id, &grey, 1).await.unwrap();
        state.carts.add_to_cart(cart_id, &pair, 3).await.unwrap();

        let cart = state.carts.get_cart_for_owner(user.id().as_str()).await.unwrap();
        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.total_quantity(), 4);
        assert_eq!(cart.total().as_cents(), 3999 + 3 * 999);
        assert_eq!(
            cart.total().format(PriceFormat::Long, Locale::EnUs, Currency::Usd),
            "$69.96"
        );
        assert_eq!(
            cart.total().format(PriceFormat::Long, Locale::FrFr, Currency::Eur),
            "69,96\u{a0}€"
        );
    }

    #[tokio::test]
    async fn test_cart_keeps_variant_price_at_add_time() {
        let state = create_state();
        let user = state.users.register(customer("jane@example.com")).await.unwrap();
        let lamp = state
            .catalog
            .create_product(CreateProduct::new("Desk Lamp").with_variant(ProductVariantInput::new("Brass", 4999)))
            .await
            .unwrap();
        let brass = lamp.variants()[0].id().to_string();

        let cart = state.carts.create_cart(user.id().as_str()).await.unwrap();
        state.carts.add_to_cart(cart.id().as_str(), &brass, 1).await.unwrap();

        state
            .catalog
            .change_variant_price(lamp.id().as_str(), &brass, 5999)
            .await
            .unwrap();

        let cart = state.carts.get_cart(cart.id().as_str()).await.unwrap();
        assert_eq!(cart.total().as_cents(), 4999);
    }

    #[tokio::test]
    async fn test_removed_variant_cannot_be_added() {
        let state = create_state();
        let user = state.users.register(customer("max@example.com")).await.unwrap();
        let mug = state
            .catalog
            .create_product(
                CreateProduct::new("Mug")
                    .with_variant(ProductVariantInput::new("Blue", 1200))
                    .with_variant(ProductVariantInput::new("Red", 1200)),
            )
            .await
            .unwrap();
        let red = mug.variants()[1].id().to_string();
        state.catalog.remove_variant(mug.id().as_str(), &red).await.unwrap();

        let cart = state.carts.create_cart(user.id().as_str()).await.unwrap();
        let error = state
            .carts
            .add_to_cart(cart.id().as_str(), &red, 1)
            .await
            .unwrap_err();
        assert!(matches!(error, ServiceError::VariantNotFound(_)));
        assert_eq!(error.to_body()["code"], "PRODUCT_VARIANT_NOT_FOUND");
    }
}

mod errors {
    use super::*;

    #[tokio::test]
    async fn test_statuses_for_common_failures() {
        let state = create_state();

        let error = state.users.get_user("not-a-uuid").await.unwrap_err();
        assert_eq!(error.status_hint(), 400);

        let error = state.carts.get_cart(&common::UniqueEntityId::new().to_string()).await.unwrap_err();
        assert_eq!(error.status_hint(), 404);
        assert_eq!(error.exception(), "CART_NOT_FOUND");

        state.users.register(customer("dup@example.com")).await.unwrap();
        let error = state.users.register(customer("dup@example.com")).await.unwrap_err();
        assert_eq!(error.status_hint(), 409);
        assert_eq!(error.exception(), "USER_ALREADY_EXISTS");
    }

    #[tokio::test]
    async fn test_concurrent_registrations_with_one_email() {
        let state = create_state();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let state = Arc::clone(&state);
                tokio::spawn(async move { state.users.register(customer("race@example.com")).await })
            })
            .collect();

        let mut registered = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => registered += 1,
                Err(error) => assert!(matches!(error, ServiceError::UserAlreadyExists)),
            }
        }
        assert_eq!(registered, 1);
        assert_eq!(state.users.repository().count().await, 1);
    }
}
