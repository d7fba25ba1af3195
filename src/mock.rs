//! # Mocks & Testing Guide
//!
//! Test doubles for every collaborator of the cart actor, plus helpers for
//! testing code that only holds a [`CartClient`].
//!
//! ## When to use what
//!
//! | Double | Replaces | Use case |
//! |--------|----------|----------|
//! | [`MockInventory`] | stock + catalog service | scripted answers, error injection, call verification |
//! | [`RecordingNotifier`] | notification sink | assert which messages the shopper saw |
//! | [`FailingStorage`] | durable storage | storage outages on load and save |
//! | [`CountingStorage`] | durable storage | assert how many snapshots were written |
//! | [`create_mock_client`] | the cart actor | unit-testing consumers of `CartClient` |
//!
//! ## Testing Strategies
//!
//! <details>
//! <summary><b>Pattern 1: Actor with Mocked Dependencies</b></summary>
//!
//! ```rust
//! use cart_store::config::CartConfig;
//! use cart_store::lifecycle::CartSystem;
//! use cart_store::mock::{MockInventory, RecordingNotifier};
//! use cart_store::model::{Product, ProductId};
//! use cart_store::services::{CartServices, InMemoryStorage};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     // 1. Script the collaborator
//!     let inventory = Arc::new(MockInventory::new());
//!     inventory
//!         .expect_list_products()
//!         .return_ok(vec![Product::new(1, "Sneaker", 179.9, "sneaker.jpg")]);
//!     inventory.expect_stock(ProductId(1)).return_ok(1);
//!
//!     // 2. Start the real cart actor around it
//!     let notifier = RecordingNotifier::new();
//!     let services = CartServices::with_inventory(
//!         inventory.clone(),
//!         Arc::new(InMemoryStorage::new()),
//!         Arc::new(notifier.clone()),
//!     );
//!     let system = CartSystem::start(CartConfig::default(), services).await;
//!
//!     // 3. Exercise it
//!     system.cart_client.load_products().await.unwrap();
//!     system.cart_client.add_product(ProductId(1)).await.unwrap();
//!     assert!(system.cart_client.add_product(ProductId(1)).await.is_err());
//!
//!     // 4. Verify
//!     assert_eq!(notifier.messages(), vec!["Requested quantity is out of stock"]);
//!     inventory.verify();
//!     system.shutdown().await.unwrap();
//! }
//! ```
//! </details>
//!
//! <details>
//! <summary><b>Pattern 2: Full System Integration Test</b></summary>
//!
//! Use [`InMemoryInventory`](crate::services::InMemoryInventory) instead of a mock when the
//! test cares about state rather than about the exact sequence of queries.
//! See `tests/integration_test.rs`.
//! </details>

use crate::cart_actor::CartRequest;
use crate::clients::CartClient;
use crate::model::{Cart, Product, ProductId, StockRecord};
use crate::services::{
    CartStorage, CatalogService, InMemoryStorage, Notifier, ServiceError, StockService,
};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{mpsc, watch};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected query and the scripted answer.
enum Expectation {
    Stock {
        id: ProductId,
        delay: Option<Duration>,
        response: Result<StockRecord, ServiceError>,
    },
    ListProducts {
        delay: Option<Duration>,
        response: Result<Vec<Product>, ServiceError>,
    },
}

/// Scripted stock and catalog service.
///
/// Queries must arrive in the order the expectations were registered;
/// anything else panics, which the cart actor surfaces as `ActorDropped`.
///
/// # Example
/// ```ignore
/// let inventory = MockInventory::new();
/// inventory.expect_stock(ProductId(1)).return_ok(5);
/// inventory.expect_stock(ProductId(1)).return_err(ServiceError::Unavailable("down".into()));
/// // ... run the cart ...
/// inventory.verify(); // Ensures all expectations were met
/// ```
#[derive(Default)]
pub struct MockInventory {
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
}

impl MockInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a stock query for `id`.
    pub fn expect_stock(&self, id: ProductId) -> StockExpectationBuilder {
        StockExpectationBuilder {
            id,
            delay: None,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a catalog query.
    pub fn expect_list_products(&self) -> ListExpectationBuilder {
        ListExpectationBuilder {
            delay: None,
            expectations: self.expectations.clone(),
        }
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }

    fn next(&self) -> Option<Expectation> {
        self.expectations.lock().unwrap().pop_front()
    }
}

#[async_trait]
impl StockService for MockInventory {
    async fn stock(&self, product_id: ProductId) -> Result<StockRecord, ServiceError> {
        match self.next() {
            Some(Expectation::Stock {
                id,
                delay,
                response,
            }) => {
                assert_eq!(id, product_id, "Stock queried for the wrong product");
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
                response
            }
            _ => panic!("Unexpected stock query for {product_id}"),
        }
    }
}

#[async_trait]
impl CatalogService for MockInventory {
    async fn list_products(&self) -> Result<Vec<Product>, ServiceError> {
        match self.next() {
            Some(Expectation::ListProducts { delay, response }) => {
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
                response
            }
            _ => panic!("Unexpected catalog query"),
        }
    }
}

/// Builder for stock expectations.
pub struct StockExpectationBuilder {
    id: ProductId,
    delay: Option<Duration>,
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
}

impl StockExpectationBuilder {
    /// Answer only after `delay` (for timeout tests).
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Sets the expectation to report `amount` units available.
    pub fn return_ok(self, amount: u32) {
        let response = Ok(StockRecord::new(self.id, amount));
        self.push(response);
    }

    /// Sets the expectation to fail.
    pub fn return_err(self, error: ServiceError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<StockRecord, ServiceError>) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Stock {
            id: self.id,
            delay: self.delay,
            response,
        });
    }
}

/// Builder for catalog expectations.
pub struct ListExpectationBuilder {
    delay: Option<Duration>,
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
}

impl ListExpectationBuilder {
    /// Answer only after `delay` (for timeout tests).
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Sets the expectation to return `products`.
    pub fn return_ok(self, products: Vec<Product>) {
        self.push(Ok(products));
    }

    /// Sets the expectation to fail.
    pub fn return_err(self, error: ServiceError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Vec<Product>, ServiceError>) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::ListProducts {
            delay: self.delay,
            response,
        });
    }
}

// =============================================================================
// NOTIFIER & STORAGE DOUBLES
// =============================================================================

/// Collects every reported message. Clones share the same log.
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn report_error(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

/// Storage whose every read and write fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingStorage;

#[async_trait]
impl CartStorage for FailingStorage {
    async fn read(&self, _key: &str) -> Result<Option<Vec<u8>>, ServiceError> {
        Err(ServiceError::Unavailable("storage offline".to_string()))
    }

    async fn write(&self, _key: &str, _value: Vec<u8>) -> Result<(), ServiceError> {
        Err(ServiceError::Unavailable("storage offline".to_string()))
    }
}

/// In-memory storage that counts writes. Clones share entries and counter.
#[derive(Debug, Default, Clone)]
pub struct CountingStorage {
    inner: Arc<InMemoryStorage>,
    writes: Arc<AtomicUsize>,
}

impl CountingStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps pre-populated storage; its existing entries are not counted.
    pub fn wrap(inner: InMemoryStorage) -> Self {
        Self {
            inner: Arc::new(inner),
            writes: Arc::default(),
        }
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CartStorage for CountingStorage {
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>, ServiceError> {
        self.inner.read(key).await
    }

    async fn write(&self, key: &str, value: Vec<u8>) -> Result<(), ServiceError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.write(key, value).await
    }
}

// =============================================================================
// CLIENT HELPERS
// =============================================================================

/// Creates a cart client and the receiver its requests arrive on.
///
/// Lets a test play the actor: inspect each [`CartRequest`] and answer through
/// its `respond_to` channel. The client's `cart()` reads an empty cart.
pub fn create_mock_client(buffer_size: usize) -> (CartClient, mpsc::Receiver<CartRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let (_cart_tx, cart_rx) = watch::channel(Cart::new());
    let (_products_tx, products_rx) = watch::channel(Vec::new());
    (CartClient::new(sender, cart_rx, products_rx), receiver)
}

/// Helper to take the next request sent by a mock client.
pub async fn expect_request(receiver: &mut mpsc::Receiver<CartRequest>) -> Option<CartRequest> {
    receiver.recv().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_inventory_answers_in_order() {
        let inventory = MockInventory::new();
        inventory.expect_stock(ProductId(1)).return_ok(4);
        inventory
            .expect_list_products()
            .return_err(ServiceError::Unavailable("down".to_string()));

        assert_eq!(inventory.stock(ProductId(1)).await.unwrap().amount, 4);
        assert!(inventory.list_products().await.is_err());
        inventory.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "Not all expectations were met")]
    async fn test_verify_panics_on_unmet_expectation() {
        let inventory = MockInventory::new();
        inventory.expect_stock(ProductId(1)).return_ok(4);

        inventory.verify();
    }

    #[test]
    fn test_recording_notifier_shares_log_between_clones() {
        let notifier = RecordingNotifier::new();
        let clone = notifier.clone();

        clone.report_error("Failed to add product");

        assert_eq!(notifier.messages(), vec!["Failed to add product".to_string()]);
    }

    #[tokio::test]
    async fn test_counting_storage_counts_only_writes() {
        let storage = CountingStorage::wrap(InMemoryStorage::new().with_entry("k", "[]"));
        let clone = storage.clone();

        assert_eq!(storage.read("k").await.unwrap().unwrap(), b"[]");
        clone.write("k", b"[1]".to_vec()).await.unwrap();

        assert_eq!(storage.writes(), 1);
        assert_eq!(storage.read("k").await.unwrap().unwrap(), b"[1]");
    }
}
