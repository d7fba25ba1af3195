//! # External Collaborators
//!
//! The cart never talks to the outside world directly. Everything it needs is
//! expressed as a small async trait so the composition root can plug in a
//! real backend and tests can plug in [`mock`](crate::mock) doubles.
//!
//! | Trait | Used by | Purpose |
//! |-------|---------|---------|
//! | [`StockService`] | `add_product`, `update_product_amount` | maximum purchasable quantity |
//! | [`CatalogService`] | `load_products` | full product list |
//! | [`CartStorage`] | startup load, persistence writer | durable key/value bytes |
//! | [`Notifier`] | every reported failure | fire-and-forget user message |
//!
//! In-memory implementations live in [`memory`], a file-backed store in [`file`].

pub mod error;
pub mod file;
pub mod memory;

pub use error::*;
pub use file::FileStorage;
pub use memory::{InMemoryInventory, InMemoryStorage, TracingNotifier};

use crate::model::{Product, ProductId, StockRecord};
use async_trait::async_trait;
use std::sync::Arc;

/// Source of stock availability.
#[async_trait]
pub trait StockService: Send + Sync {
    /// Fetch the maximum purchasable quantity for a product.
    async fn stock(&self, product_id: ProductId) -> Result<StockRecord, ServiceError>;
}

/// Source of the product catalog.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Fetch every product currently on sale.
    async fn list_products(&self) -> Result<Vec<Product>, ServiceError>;
}

/// Durable byte-string key/value store.
#[async_trait]
pub trait CartStorage: Send + Sync {
    /// Read the value stored under `key`, `None` when absent.
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>, ServiceError>;

    /// Replace the value stored under `key`.
    async fn write(&self, key: &str, value: Vec<u8>) -> Result<(), ServiceError>;
}

/// Fire-and-forget channel to the shopper.
pub trait Notifier: Send + Sync {
    fn report_error(&self, message: &str);
}

/// Bundle of collaborators injected into the cart actor at `run()` time.
#[derive(Clone)]
pub struct CartServices {
    pub stock: Arc<dyn StockService>,
    pub catalog: Arc<dyn CatalogService>,
    pub storage: Arc<dyn CartStorage>,
    pub notifier: Arc<dyn Notifier>,
}

impl CartServices {
    pub fn new(
        stock: Arc<dyn StockService>,
        catalog: Arc<dyn CatalogService>,
        storage: Arc<dyn CartStorage>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            stock,
            catalog,
            storage,
            notifier,
        }
    }

    /// Uses a single inventory backend for both stock and catalog queries.
    pub fn with_inventory<I>(
        inventory: Arc<I>,
        storage: Arc<dyn CartStorage>,
        notifier: Arc<dyn Notifier>,
    ) -> Self
    where
        I: StockService + CatalogService + 'static,
    {
        Self {
            stock: inventory.clone(),
            catalog: inventory,
            storage,
            notifier,
        }
    }
}
