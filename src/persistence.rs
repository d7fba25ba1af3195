//! # Cart Persistence
//!
//! The cart is stored as a JSON array of line items under a single key,
//! the same shape a browser client keeps in local storage:
//!
//! ```text
//! [{"id":1,"name":"Sneaker","price":179.9,"imageUrl":"...","amount":2}]
//! ```
//!
//! Loading is fail-soft: an absent, unreadable or corrupt snapshot yields an
//! empty cart. Saving is fire-and-forget: the cart actor hands each snapshot
//! to a [`PersistenceWriter`] task through an ordered channel and moves on,
//! so the last snapshot handed over is always the last one written.
//! [`PersistHandle::flush`] waits for everything queued so far.

use crate::model::Cart;
use crate::services::{CartStorage, ServiceError};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to encode cart: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Failed to decode cart: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] ServiceError),

    #[error("Persistence writer closed")]
    WriterClosed,
}

pub fn encode(cart: &Cart) -> Result<Vec<u8>, PersistenceError> {
    serde_json::to_vec(cart).map_err(PersistenceError::Encode)
}

/// Decodes a snapshot; duplicate ids and zero quantities fail like malformed JSON.
pub fn decode(bytes: &[u8]) -> Result<Cart, PersistenceError> {
    serde_json::from_slice(bytes).map_err(PersistenceError::Decode)
}

/// Read the snapshot stored under `key`, returning `None` when there is none.
pub async fn try_load_cart(
    storage: &dyn CartStorage,
    key: &str,
) -> Result<Option<Cart>, PersistenceError> {
    match storage.read(key).await? {
        Some(bytes) => decode(&bytes).map(Some),
        None => Ok(None),
    }
}

/// Restore the cart from storage, falling back to an empty cart on any failure.
pub async fn load_cart(storage: &dyn CartStorage, key: &str) -> Cart {
    match try_load_cart(storage, key).await {
        Ok(Some(cart)) => {
            info!(key, size = cart.len(), "Restored cart");
            cart
        }
        Ok(None) => {
            debug!(key, "No stored cart");
            Cart::new()
        }
        Err(e) => {
            warn!(key, error = %e, "Discarding stored cart");
            Cart::new()
        }
    }
}

enum PersistCommand {
    Write(Vec<u8>),
    Flush(oneshot::Sender<()>),
}

/// Sending half of the persistence writer. Cheap to clone.
#[derive(Clone)]
pub struct PersistHandle {
    sender: mpsc::UnboundedSender<PersistCommand>,
}

impl PersistHandle {
    /// Queue a snapshot of `cart` for writing. Never waits for the storage.
    pub fn save(&self, cart: &Cart) {
        let bytes = match encode(cart) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(error = %e, "Cart not persisted");
                return;
            }
        };
        if self.sender.send(PersistCommand::Write(bytes)).is_err() {
            warn!("Persistence writer gone, cart not persisted");
        }
    }

    /// Resolve once every snapshot queued before this call has been written.
    pub async fn flush(&self) -> Result<(), PersistenceError> {
        let (respond_to, done) = oneshot::channel();
        self.sender
            .send(PersistCommand::Flush(respond_to))
            .map_err(|_| PersistenceError::WriterClosed)?;
        done.await.map_err(|_| PersistenceError::WriterClosed)
    }
}

/// Background task writing cart snapshots in the order they were queued.
pub struct PersistenceWriter {
    receiver: mpsc::UnboundedReceiver<PersistCommand>,
    storage: Arc<dyn CartStorage>,
    key: String,
}

impl PersistenceWriter {
    pub fn new(storage: Arc<dyn CartStorage>, key: impl Into<String>) -> (Self, PersistHandle) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let writer = Self {
            receiver,
            storage,
            key: key.into(),
        };
        (writer, PersistHandle { sender })
    }

    /// Runs until every [`PersistHandle`] has been dropped and the queue is drained.
    pub async fn run(mut self) {
        info!(key = %self.key, "Persistence writer started");
        let mut writes = 0usize;
        let mut failures = 0usize;

        while let Some(command) = self.receiver.recv().await {
            match command {
                PersistCommand::Write(bytes) => {
                    let len = bytes.len();
                    match self.storage.write(&self.key, bytes).await {
                        Ok(()) => {
                            writes += 1;
                            debug!(key = %self.key, bytes = len, "Cart persisted");
                        }
                        Err(e) => {
                            failures += 1;
                            warn!(key = %self.key, error = %e, "Cart write failed");
                        }
                    }
                }
                PersistCommand::Flush(respond_to) => {
                    let _ = respond_to.send(());
                }
            }
        }

        info!(key = %self.key, writes, failures, "Persistence writer shutdown");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::FailingStorage;
    use crate::model::Product;
    use crate::services::InMemoryStorage;

    const KEY: &str = "@RocketShoes:cart";

    fn sample_cart() -> Cart {
        Cart::from_items(vec![
            Product::new(1, "Sneaker", 179.9, "https://img/1.jpg").with_amount(2),
            Product::new(2, "Boot", 239.9, "https://img/2.jpg").with_amount(1),
        ])
        .unwrap()
    }

    #[test]
    fn test_snapshot_is_a_plain_json_array() {
        let bytes = encode(&sample_cart()).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert!(json.is_array());
        assert_eq!(json[0]["imageUrl"], "https://img/1.jpg");
        assert_eq!(json[1]["amount"], 1);
        assert_eq!(decode(&bytes).unwrap(), sample_cart());
    }

    #[test]
    fn test_decode_rejects_broken_snapshots() {
        assert!(matches!(decode(b"not json"), Err(PersistenceError::Decode(_))));
        assert!(matches!(
            decode(br#"[{"id":1,"name":"a","price":1,"imageUrl":"","amount":-1}]"#),
            Err(PersistenceError::Decode(_))
        ));
        assert!(matches!(
            decode(br#"[{"id":1,"name":"a","price":1,"imageUrl":"","amount":0}]"#),
            Err(PersistenceError::Decode(_))
        ));
        assert!(matches!(
            decode(br#"[{"id":1,"name":"a","price":1,"imageUrl":"","amount":1},{"id":1,"name":"a","price":1,"imageUrl":"","amount":1}]"#),
            Err(PersistenceError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_load_cart_falls_back_to_empty() {
        let missing = InMemoryStorage::new();
        assert!(load_cart(&missing, KEY).await.is_empty());

        let garbage = InMemoryStorage::new().with_entry(KEY, "{oops");
        assert!(load_cart(&garbage, KEY).await.is_empty());

        let unreadable = FailingStorage;
        assert!(load_cart(&unreadable, KEY).await.is_empty());
    }

    #[tokio::test]
    async fn test_load_cart_restores_snapshot() {
        let storage = InMemoryStorage::new().with_entry(KEY, encode(&sample_cart()).unwrap());

        assert_eq!(load_cart(&storage, KEY).await, sample_cart());
    }

    #[tokio::test]
    async fn test_writer_keeps_last_snapshot_after_flush() {
        let storage = Arc::new(InMemoryStorage::new());
        let (writer, handle) = PersistenceWriter::new(storage.clone(), KEY);
        let task = tokio::spawn(writer.run());

        handle.save(&Cart::new());
        handle.save(&sample_cart());
        handle.flush().await.unwrap();

        let stored = storage.read(KEY).await.unwrap().unwrap();
        assert_eq!(decode(&stored).unwrap(), sample_cart());

        drop(handle);
        task.await.unwrap();
    }

    #[tokio::test]
    async fn test_write_failures_do_not_stop_the_writer() {
        let (writer, handle) = PersistenceWriter::new(Arc::new(FailingStorage), KEY);
        let task = tokio::spawn(writer.run());

        handle.save(&sample_cart());
        handle.save(&sample_cart());

        assert!(handle.flush().await.is_ok());
        drop(handle);
        task.await.unwrap();
    }
}
