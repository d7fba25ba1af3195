//! In-memory collaborators for demos, tests and embedded use.

use super::{CartStorage, CatalogService, Notifier, ServiceError, StockService};
use crate::model::{Product, ProductId, StockRecord};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// A product catalog plus a stock table, answering both stock and catalog queries.
#[derive(Debug, Default)]
pub struct InMemoryInventory {
    products: RwLock<Vec<Product>>,
    stock: RwLock<HashMap<ProductId, u32>>,
}

impl InMemoryInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: register a product together with its available stock.
    pub fn with_product(mut self, product: Product, stock: u32) -> Self {
        self.stock.get_mut().insert(product.id, stock);
        self.products.get_mut().push(product);
        self
    }

    /// Change the available stock of a product at runtime.
    pub async fn set_stock(&self, product_id: ProductId, amount: u32) {
        self.stock.write().await.insert(product_id, amount);
    }

    /// Add or replace a catalog entry at runtime.
    pub async fn upsert_product(&self, product: Product) {
        let mut products = self.products.write().await;
        match products.iter_mut().find(|p| p.id == product.id) {
            Some(existing) => *existing = product,
            None => products.push(product),
        }
    }
}

#[async_trait]
impl StockService for InMemoryInventory {
    async fn stock(&self, product_id: ProductId) -> Result<StockRecord, ServiceError> {
        let stock = self.stock.read().await;
        stock
            .get(&product_id)
            .map(|amount| StockRecord::new(product_id, *amount))
            .ok_or_else(|| ServiceError::NotFound(product_id.to_string()))
    }
}

#[async_trait]
impl CatalogService for InMemoryInventory {
    async fn list_products(&self) -> Result<Vec<Product>, ServiceError> {
        Ok(self.products.read().await.clone())
    }
}

/// Volatile key/value storage. Values survive as long as the instance does.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: pre-populate a key, e.g. with a snapshot from a previous session.
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.entries.get_mut().insert(key.into(), value.into());
        self
    }
}

#[async_trait]
impl CartStorage for InMemoryStorage {
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>, ServiceError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn write(&self, key: &str, value: Vec<u8>) -> Result<(), ServiceError> {
        debug!(key, bytes = value.len(), "Storage write");
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }
}

/// Surfaces user messages as `warn` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn report_error(&self, message: &str) {
        warn!(user_message = message, "User notified");
    }
}
