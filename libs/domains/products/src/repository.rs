use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductDraft};

/// Persistence gateway for products.
///
/// `insert` and `save` are separate so that a stored product always has an
/// id: `insert` takes an id-less draft, `save` overwrites an existing row.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products in store order
    async fn find_all(&self) -> ProductResult<Vec<Product>>;

    async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>>;

    /// Persist a new product; the store assigns the id
    async fn insert(&self, draft: ProductDraft) -> ProductResult<Product>;

    /// Overwrite an existing product.
    ///
    /// Fails with [`ProductError::NotFound`] if the row is gone.
    async fn save(&self, product: Product) -> ProductResult<Product>;

    /// Returns whether a row was removed
    async fn delete_by_id(&self, id: i64) -> ProductResult<bool>;
}

/// In-memory implementation of ProductRepository (for development/testing)
///
/// Ids are handed out sequentially, so iteration order is insertion order.
#[derive(Debug, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<BTreeMap<i64, Product>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::with_products(Vec::new())
    }

    /// Seed the store. The next assigned id follows the largest seeded id.
    pub fn with_products(products: Vec<Product>) -> Self {
        let next_id = products.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let products = products.into_iter().map(|p| (p.id, p)).collect();

        Self {
            products: Arc::new(RwLock::new(products)),
            next_id: Arc::new(AtomicI64::new(next_id)),
        }
    }

    /// Make the next insert receive `id`.
    pub fn with_next_id(self, id: i64) -> Self {
        self.next_id.store(id, Ordering::SeqCst);
        self
    }
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_all(&self) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;
        Ok(products.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn insert(&self, draft: ProductDraft) -> ProductResult<Product> {
        let mut products = self.products.write().await;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);

        let now = Utc::now();
        let product = Product {
            id,
            name: draft.name,
            description: draft.description,
            price: draft.price,
            quantity: draft.quantity,
            created_at: now,
            updated_at: now,
        };
        products.insert(id, product.clone());

        tracing::debug!(product_id = id, "Inserted product");
        Ok(product)
    }

    async fn save(&self, product: Product) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        let existing = products
            .get_mut(&product.id)
            .ok_or(ProductError::NotFound(product.id))?;

        // The stored creation time wins over whatever the caller carried.
        let saved = Product {
            created_at: existing.created_at,
            ..product
        };
        *existing = saved.clone();

        Ok(saved)
    }

    async fn delete_by_id(&self, id: i64) -> ProductResult<bool> {
        let mut products = self.products.write().await;
        Ok(products.remove(&id).is_some())
    }
}
