//! Use cases over the repositories.
//!
//! Each service owns the repositories it needs and accepts ids as raw text,
//! so callers at the edge never build domain types themselves.

pub mod cart;
pub mod catalog;
pub mod user;

pub use cart::CartService;
pub use catalog::{CatalogService, CreateProduct};
pub use user::UserService;

use common::UniqueEntityId;

use crate::error::Result;

fn parse_id(raw: &str) -> Result<UniqueEntityId> {
    Ok(UniqueEntityId::parse(raw)?)
}
