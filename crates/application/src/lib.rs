//! Use cases for the shop.
//!
//! Wires the domain aggregates to the repositories: user registration,
//! catalog management and shopping carts, plus environment configuration
//! and snapshot seeding for the `shop` binary.

pub mod config;
pub mod error;
pub mod seed;
pub mod services;

use std::sync::Arc;

use common::time::Clock;
use store::{InMemoryCartRepository, InMemoryProductRepository, InMemoryUserRepository};

pub use config::Config;
pub use error::{Result, ServiceError};
pub use seed::{SeedData, SeedError, SeedSummary};
pub use services::{CartService, CatalogService, CreateProduct, UserService};

/// Services backed by the in-memory repositories.
pub struct AppState {
    pub users: UserService<InMemoryUserRepository>,
    pub catalog: CatalogService<InMemoryProductRepository>,
    pub carts: CartService<InMemoryCartRepository, InMemoryUserRepository, InMemoryProductRepository>,
}

/// Creates empty in-memory repositories shared by every service.
pub fn create_default_state() -> Arc<AppState> {
    Arc::new(build_state(None))
}

/// Same as [`create_default_state`], with carts dated by `clock`.
pub fn create_state_with_clock(clock: Arc<dyn Clock>) -> Arc<AppState> {
    Arc::new(build_state(Some(clock)))
}

fn build_state(clock: Option<Arc<dyn Clock>>) -> AppState {
    let users = InMemoryUserRepository::new();
    let products = InMemoryProductRepository::new();
    let carts = InMemoryCartRepository::new();

    let cart_service = CartService::new(carts, users.clone(), products.clone());
    let cart_service = match clock {
        Some(clock) => cart_service.with_clock(clock),
        None => cart_service,
    };

    AppState {
        users: UserService::new(users),
        catalog: CatalogService::new(products),
        carts: cart_service,
    }
}
