//! Loading JSON snapshots into the in-memory repositories.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use store::{CartRecord, ProductRecord, StoreError, UserRecord};

use crate::AppState;

/// Errors raised while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid seed file: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A snapshot of every aggregate, as stored records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub users: Vec<UserRecord>,
    #[serde(default)]
    pub products: Vec<ProductRecord>,
    #[serde(default)]
    pub carts: Vec<CartRecord>,
}

/// How many aggregates were loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub products: usize,
    pub carts: usize,
}

impl SeedData {
    pub fn from_json(json: &str) -> Result<Self, SeedError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Imports users, then products, then carts.
    ///
    /// Each kind is validated as a whole before it is stored, so a broken
    /// record leaves that kind untouched.
    #[tracing::instrument(skip_all)]
    pub async fn apply(self, state: &AppState) -> Result<SeedSummary, SeedError> {
        let users = state.users.repository().import_records(self.users).await?;
        let products = state.catalog.repository().import_records(self.products).await?;
        let carts = state.carts.repository().import_records(self.carts).await?;

        let summary = SeedSummary {
            users,
            products,
            carts,
        };
        tracing::info!(users, products, carts, "seed data loaded");
        Ok(summary)
    }
}

/// Reads a snapshot file and loads it into `state`.
#[tracing::instrument(skip(state))]
pub async fn load_file(path: &Path, state: &AppState) -> Result<SeedSummary, SeedError> {
    let json = tokio::fs::read_to_string(path).await?;
    SeedData::from_json(&json)?.apply(state).await
}
