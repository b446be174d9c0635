//! In-memory repositories.
//!
//! Each repository keeps records behind an `Arc<RwLock<..>>` and is cheap to
//! clone; clones share the same data. A repository call holds the lock for
//! its whole duration, so calls on one repository never interleave.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use common::{UniqueEntityId, combine};
use domain::{AggregateRoot, Cart, Email, Product, User};

use crate::{
    CartRecord, ProductRecord, Record, Result, StoreError, UserRecord,
    repository::{CartRepository, ProductRepository, UserRepository},
};

/// Records of one aggregate type keyed by id.
struct Table<R> {
    rows: Arc<RwLock<BTreeMap<UniqueEntityId, R>>>,
}

impl<R> Clone for Table<R> {
    fn clone(&self) -> Self {
        Self {
            rows: Arc::clone(&self.rows),
        }
    }
}

impl<R> Default for Table<R> {
    fn default() -> Self {
        Self {
            rows: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }
}

impl<R: Record> Table<R> {
    fn aggregate_type() -> &'static str {
        <R::Aggregate as AggregateRoot>::aggregate_type()
    }

    fn conflict(field: &'static str, value: String) -> StoreError {
        StoreError::Conflict {
            aggregate_type: Self::aggregate_type(),
            field,
            value,
        }
    }

    /// Fails when another stored record already holds `record`'s unique key.
    fn ensure_unique(rows: &BTreeMap<UniqueEntityId, R>, record: &R) -> Result<()> {
        let Some((field, value)) = record.unique_key() else {
            return Ok(());
        };
        let taken = rows.values().any(|other| {
            other.id() != record.id()
                && other.unique_key().is_some_and(|(_, other_value)| other_value == value)
        });
        if taken {
            return Err(Self::conflict(field, value));
        }
        Ok(())
    }

    /// Inserts or replaces, checking the unique key under the write lock.
    async fn put(&self, aggregate: &R::Aggregate) -> Result<()> {
        let record = R::from_aggregate(aggregate);
        let mut rows = self.rows.write().await;
        Self::ensure_unique(&rows, &record)?;
        rows.insert(record.id().clone(), record);
        metrics::counter!("store_saves_total", "aggregate" => Self::aggregate_type()).increment(1);
        Ok(())
    }

    async fn get(&self, id: &UniqueEntityId) -> Result<Option<R::Aggregate>> {
        let rows = self.rows.read().await;
        rows.get(id).cloned().map(Record::into_aggregate).transpose()
    }

    async fn find(&self, predicate: impl Fn(&R) -> bool + Send) -> Result<Option<R::Aggregate>> {
        let rows = self.rows.read().await;
        rows.values()
            .find(|record| predicate(record))
            .cloned()
            .map(Record::into_aggregate)
            .transpose()
    }

    async fn any(&self, predicate: impl Fn(&R) -> bool + Send) -> bool {
        self.rows.read().await.values().any(predicate)
    }

    async fn all(&self) -> Result<Vec<R::Aggregate>> {
        let rows = self.rows.read().await;
        combine(rows.values().cloned().map(Record::into_aggregate))
    }

    async fn remove(&self, id: &UniqueEntityId) -> Result<()> {
        let removed = self.rows.write().await.remove(id);
        match removed {
            Some(_) => {
                metrics::counter!("store_deletes_total", "aggregate" => Self::aggregate_type())
                    .increment(1);
                Ok(())
            }
            None => Err(StoreError::NotFound {
                aggregate_type: Self::aggregate_type(),
                id: id.to_string(),
            }),
        }
    }

    async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    async fn export_json(&self) -> Result<String> {
        let rows = self.rows.read().await;
        let records: Vec<&R> = rows.values().collect();
        Ok(serde_json::to_string_pretty(&records)?)
    }

    /// Stores a batch all or nothing.
    ///
    /// Every record is rebuilt through its factory and stored normalized.
    /// Unique keys must not repeat within the batch nor clash with stored
    /// records outside it.
    async fn import(&self, records: Vec<R>) -> Result<usize> {
        let records = combine(
            records
                .into_iter()
                .map(|record| record.into_aggregate().map(|aggregate| R::from_aggregate(&aggregate))),
        )?;

        let mut rows = self.rows.write().await;
        {
            let incoming: HashSet<&UniqueEntityId> = records.iter().map(Record::id).collect();
            let mut claimed: HashMap<String, &UniqueEntityId> = rows
                .values()
                .filter(|row| !incoming.contains(row.id()))
                .filter_map(|row| row.unique_key().map(|(_, value)| (value, row.id())))
                .collect();

            for record in &records {
                let Some((field, value)) = record.unique_key() else {
                    continue;
                };
                match claimed.get(&value) {
                    Some(holder) if *holder != record.id() => {
                        return Err(Self::conflict(field, value));
                    }
                    _ => {
                        claimed.insert(value, record.id());
                    }
                }
            }
        }

        let count = records.len();
        rows.extend(records.into_iter().map(|record| (record.id().clone(), record)));
        tracing::info!(aggregate_type = Self::aggregate_type(), count, "imported records");
        Ok(count)
    }
}

/// In-memory [`UserRepository`]. Emails are unique across users.
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    table: Table<UserRecord>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored users.
    pub async fn count(&self) -> usize {
        self.table.len().await
    }

    /// Serializes every user as a JSON array of records.
    pub async fn export_json(&self) -> Result<String> {
        self.table.export_json().await
    }

    /// Loads users from a JSON array of records. Nothing is stored if any
    /// record is invalid.
    pub async fn import_json(&self, json: &str) -> Result<usize> {
        let records: Vec<UserRecord> = serde_json::from_str(json)?;
        self.import_records(records).await
    }

    pub async fn import_records(&self, records: Vec<UserRecord>) -> Result<usize> {
        self.table.import(records).await
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    #[tracing::instrument(skip(self, user), fields(id = %user.id()))]
    async fn save(&self, user: &User) -> Result<()> {
        self.table.put(user).await
    }

    async fn find_by_id(&self, id: &UniqueEntityId) -> Result<Option<User>> {
        self.table.get(id).await
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>> {
        self.table.find(|record| record.email == email.value()).await
    }

    async fn exists_by_email(&self, email: &Email) -> Result<bool> {
        Ok(self.table.any(|record| record.email == email.value()).await)
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: &UniqueEntityId) -> Result<()> {
        self.table.remove(id).await
    }

    async fn list(&self) -> Result<Vec<User>> {
        self.table.all().await
    }
}

/// In-memory [`ProductRepository`].
#[derive(Clone, Default)]
pub struct InMemoryProductRepository {
    table: Table<ProductRecord>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored products.
    pub async fn count(&self) -> usize {
        self.table.len().await
    }

    pub async fn export_json(&self) -> Result<String> {
        self.table.export_json().await
    }

    pub async fn import_json(&self, json: &str) -> Result<usize> {
        let records: Vec<ProductRecord> = serde_json::from_str(json)?;
        self.import_records(records).await
    }

    pub async fn import_records(&self, records: Vec<ProductRecord>) -> Result<usize> {
        self.table.import(records).await
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    #[tracing::instrument(skip(self, product), fields(id = %product.id()))]
    async fn save(&self, product: &Product) -> Result<()> {
        self.table.put(product).await
    }

    async fn find_by_id(&self, id: &UniqueEntityId) -> Result<Option<Product>> {
        self.table.get(id).await
    }

    async fn find_by_variant_id(&self, variant_id: &UniqueEntityId) -> Result<Option<Product>> {
        self.table
            .find(|record| record.variants.iter().any(|v| &v.id == variant_id))
            .await
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: &UniqueEntityId) -> Result<()> {
        self.table.remove(id).await
    }

    async fn list(&self) -> Result<Vec<Product>> {
        self.table.all().await
    }
}

/// In-memory [`CartRepository`].
#[derive(Clone, Default)]
pub struct InMemoryCartRepository {
    table: Table<CartRecord>,
}

impl InMemoryCartRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored carts.
    pub async fn count(&self) -> usize {
        self.table.len().await
    }

    pub async fn export_json(&self) -> Result<String> {
        self.table.export_json().await
    }

    pub async fn import_json(&self, json: &str) -> Result<usize> {
        let records: Vec<CartRecord> = serde_json::from_str(json)?;
        self.import_records(records).await
    }

    pub async fn import_records(&self, records: Vec<CartRecord>) -> Result<usize> {
        self.table.import(records).await
    }
}

#[async_trait]
impl CartRepository for InMemoryCartRepository {
    #[tracing::instrument(skip(self, cart), fields(id = %cart.id()))]
    /// Fails with `Conflict` when the owner already has another cart.
    async fn save(&self, cart: &Cart) -> Result<()> {
        self.table.put(cart).await
    }

    async fn find_by_id(&self, id: &UniqueEntityId) -> Result<Option<Cart>> {
        self.table.get(id).await
    }

    async fn find_by_owner(&self, owner_id: &UniqueEntityId) -> Result<Option<Cart>> {
        self.table.find(|record| &record.owner_id == owner_id).await
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: &UniqueEntityId) -> Result<()> {
        self.table.remove(id).await
    }
}

#[cfg(test)]
mod tests {
    use domain::{
        CartInput, ProductInput, ProductVariant, ProductVariantInput, UserInput,
    };

    use super::*;

    fn user(email: &str) -> User {
        User::create(UserInput::new("Ada", "Lovelace", email, "Analytical1!"), None).unwrap()
    }

    fn product() -> Product {
        let variant = ProductVariant::create(ProductVariantInput::new("Default", 500), None).unwrap();
        Product::create(ProductInput::new("Notebook").with_variant(variant), None).unwrap()
    }

    mod users {
        use super::*;

        #[tokio::test]
        async fn save_and_find() {
            let repo = InMemoryUserRepository::new();
            let ada = user("ada@example.com");
            repo.save(&ada).await.unwrap();

            let found = repo.find_by_id(ada.id()).await.unwrap().unwrap();
            assert_eq!(found.props(), ada.props());

            let by_email = repo.find_by_email(ada.email()).await.unwrap();
            assert_eq!(by_email.map(|u| u.id().clone()), Some(ada.id().clone()));
            assert!(repo.exists_by_email(ada.email()).await.unwrap());
        }

        #[tokio::test]
        async fn missing_user_is_none() {
            let repo = InMemoryUserRepository::new();
            assert!(repo.find_by_id(&UniqueEntityId::new()).await.unwrap().is_none());
            let email = Email::create("nobody@example.com").unwrap();
            assert!(!repo.exists_by_email(&email).await.unwrap());
        }

        #[tokio::test]
        async fn email_must_be_unique() {
            let repo = InMemoryUserRepository::new();
            repo.save(&user("ada@example.com")).await.unwrap();

            let result = repo.save(&user("ada@example.com")).await;
            assert!(matches!(result, Err(StoreError::Conflict { field: "email", .. })));
            assert_eq!(repo.count().await, 1);
        }

        #[tokio::test]
        async fn saving_again_replaces() {
            let repo = InMemoryUserRepository::new();
            let mut ada = user("ada@example.com");
            repo.save(&ada).await.unwrap();

            ada.set_refresh_token("token");
            repo.save(&ada).await.unwrap();

            let found = repo.find_by_id(ada.id()).await.unwrap().unwrap();
            assert_eq!(found.refresh_token(), Some("token"));
            assert_eq!(repo.count().await, 1);
        }

        #[tokio::test]
        async fn delete_reports_missing() {
            let repo = InMemoryUserRepository::new();
            let ada = user("ada@example.com");
            repo.save(&ada).await.unwrap();

            repo.delete(ada.id()).await.unwrap();
            assert!(matches!(
                repo.delete(ada.id()).await,
                Err(StoreError::NotFound { aggregate_type: "User", .. })
            ));
        }

        #[tokio::test]
        async fn clones_share_data() {
            let repo = InMemoryUserRepository::new();
            let clone = repo.clone();
            repo.save(&user("ada@example.com")).await.unwrap();
            assert_eq!(clone.list().await.unwrap().len(), 1);
        }
    }

    mod products {
        use super::*;

        #[tokio::test]
        async fn find_by_variant_id() {
            let repo = InMemoryProductRepository::new();
            let notebook = product();
            repo.save(&notebook).await.unwrap();

            let variant_id = notebook.variants()[0].id();
            let found = repo.find_by_variant_id(variant_id).await.unwrap().unwrap();
            assert_eq!(found.id(), notebook.id());
            assert!(repo.find_by_variant_id(&UniqueEntityId::new()).await.unwrap().is_none());
        }

        #[tokio::test]
        async fn list_and_delete() {
            let repo = InMemoryProductRepository::new();
            let a = product();
            let b = product();
            repo.save(&a).await.unwrap();
            repo.save(&b).await.unwrap();
            assert_eq!(repo.list().await.unwrap().len(), 2);

            repo.delete(a.id()).await.unwrap();
            assert_eq!(repo.list().await.unwrap(), vec![b]);
        }
    }

    mod carts {
        use super::*;

        #[tokio::test]
        async fn find_by_owner() {
            let repo = InMemoryCartRepository::new();
            let owner = UniqueEntityId::new();
            let mut cart = Cart::create(CartInput::for_owner(&owner), None).unwrap();
            cart.add_product_variant(product().variants()[0].clone(), 2).unwrap();
            repo.save(&cart).await.unwrap();

            let found = repo.find_by_owner(&owner).await.unwrap().unwrap();
            assert_eq!(found.props(), cart.props());
            assert!(repo.find_by_owner(&UniqueEntityId::new()).await.unwrap().is_none());
        }

        #[tokio::test]
        async fn one_cart_per_owner() {
            let repo = InMemoryCartRepository::new();
            let owner = UniqueEntityId::new();
            let mut first = Cart::create(CartInput::for_owner(&owner), None).unwrap();
            repo.save(&first).await.unwrap();

            let second = Cart::create(CartInput::for_owner(&owner), None).unwrap();
            let result = repo.save(&second).await;
            assert!(matches!(result, Err(StoreError::Conflict { field: "owner_id", .. })));

            first.add_product_variant(product().variants()[0].clone(), 1).unwrap();
            repo.save(&first).await.unwrap();
            assert_eq!(repo.count().await, 1);
        }
    }

    mod snapshots {
        use super::*;

        #[tokio::test]
        async fn export_then_import_restores_aggregates() {
            let source = InMemoryProductRepository::new();
            let notebook = product();
            source.save(&notebook).await.unwrap();
            let json = source.export_json().await.unwrap();

            let target = InMemoryProductRepository::new();
            assert_eq!(target.import_json(&json).await.unwrap(), 1);
            let restored = target.find_by_id(notebook.id()).await.unwrap().unwrap();
            assert_eq!(restored.props(), notebook.props());
        }

        #[tokio::test]
        async fn cart_dates_survive_json() {
            let source = InMemoryCartRepository::new();
            let cart = Cart::create(CartInput::for_owner(&UniqueEntityId::new()), None).unwrap();
            source.save(&cart).await.unwrap();

            let target = InMemoryCartRepository::new();
            target.import_json(&source.export_json().await.unwrap()).await.unwrap();
            let restored = target.find_by_id(cart.id()).await.unwrap().unwrap();
            assert_eq!(restored.created_at(), cart.created_at());
        }

        #[tokio::test]
        async fn invalid_record_aborts_the_whole_import() {
            let repo = InMemoryUserRepository::new();
            let good = UserRecord::from_aggregate(&user("ada@example.com"));
            let mut bad = UserRecord::from_aggregate(&user("bob@example.com"));
            bad.first_name = "B".into();

            let result = repo.import_records(vec![good, bad]).await;
            assert!(matches!(
                result,
                Err(StoreError::Corrupted { code: "FIRST_NAME_TOO_SHORT", .. })
            ));
            assert_eq!(repo.count().await, 0);
        }

        #[tokio::test]
        async fn import_rejects_repeated_email_in_batch() {
            let repo = InMemoryUserRepository::new();
            let ada = UserRecord::from_aggregate(&user("same@example.com"));
            let mut bob = UserRecord::from_aggregate(&user("bob@example.com"));
            bob.email = "Same@Example.com".into();

            let result = repo.import_records(vec![ada, bob]).await;
            assert!(matches!(result, Err(StoreError::Conflict { field: "email", .. })));
            assert_eq!(repo.count().await, 0);
        }

        #[tokio::test]
        async fn import_rejects_email_held_by_stored_user() {
            let repo = InMemoryUserRepository::new();
            let ada = user("ada@example.com");
            repo.save(&ada).await.unwrap();

            let other = UserRecord::from_aggregate(&user("ada@example.com"));
            let result = repo.import_records(vec![other]).await;
            assert!(matches!(result, Err(StoreError::Conflict { field: "email", .. })));

            // The stored user can still be saved and re-imported.
            repo.save(&ada).await.unwrap();
            let same = UserRecord::from_aggregate(&ada);
            assert_eq!(repo.import_records(vec![same]).await.unwrap(), 1);
            assert_eq!(repo.count().await, 1);
        }

        #[tokio::test]
        async fn import_stores_normalized_records() {
            let repo = InMemoryUserRepository::new();
            let mut record = UserRecord::from_aggregate(&user("ada@example.com"));
            record.email = "  ADA@Example.com ".into();
            repo.import_records(vec![record]).await.unwrap();

            let email = Email::create("ada@example.com").unwrap();
            assert!(repo.exists_by_email(&email).await.unwrap());
        }

        #[tokio::test]
        async fn import_rejects_second_cart_for_owner() {
            let repo = InMemoryCartRepository::new();
            let owner = UniqueEntityId::new();
            let first = Cart::create(CartInput::for_owner(&owner), None).unwrap();
            let second = Cart::create(CartInput::for_owner(&owner), None).unwrap();

            let result = repo
                .import_records(vec![
                    CartRecord::from_aggregate(&first),
                    CartRecord::from_aggregate(&second),
                ])
                .await;
            assert!(matches!(result, Err(StoreError::Conflict { field: "owner_id", .. })));
            assert_eq!(repo.count().await, 0);
        }

        #[tokio::test]
        async fn malformed_json_is_a_serialization_error() {
            let repo = InMemoryCartRepository::new();
            let result = repo.import_json("{not json").await;
            assert!(matches!(result, Err(StoreError::Serialization(_))));
        }
    }
}
