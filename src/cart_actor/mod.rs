//! # Cart Actor
//!
//! This module implements the cart store as a single actor task.
//!
//! ## Structure
//!
//! - [`actor`] - [`CartActor`], the event loop that owns the cart and the catalog cache
//! - [`message`] - [`CartRequest`], the messages a [`CartClient`] sends
//! - [`error`] - [`CartError`] type for type-safe error handling
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use cart_store::cart_actor::{self, CartContext};
//! use cart_store::config::CartConfig;
//! use cart_store::model::{Cart, Product, ProductId};
//! use cart_store::persistence::PersistenceWriter;
//! use cart_store::services::{CartServices, InMemoryInventory, InMemoryStorage, TracingNotifier};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let inventory = Arc::new(
//!         InMemoryInventory::new().with_product(Product::new(1, "Sneaker", 179.9, "sneaker.jpg"), 3),
//!     );
//!     let storage = Arc::new(InMemoryStorage::new());
//!     let services = CartServices::with_inventory(inventory, storage.clone(), Arc::new(TracingNotifier));
//!
//!     // Create actor, client and persistence writer
//!     let config = CartConfig::default();
//!     let (writer, persist) = PersistenceWriter::new(storage, config.storage_key.clone());
//!     let (actor, client) = cart_actor::new(config, Cart::new());
//!
//!     // Start both tasks with their dependencies
//!     tokio::spawn(writer.run());
//!     tokio::spawn(actor.run(CartContext::new(services, persist)));
//!
//!     client.load_products().await?;
//!     let cart = client.add_product(ProductId(1)).await?;
//!     assert_eq!(cart.amount_of(ProductId(1)), 1);
//!     Ok(())
//! }
//! ```

pub mod actor;
pub mod error;
pub mod message;

pub use actor::*;
pub use error::*;
pub use message::*;

use crate::clients::CartClient;
use crate::config::CartConfig;
use crate::model::Cart;

/// Creates a new Cart actor and its client, seeded with `initial`.
pub fn new(config: CartConfig, initial: Cart) -> (CartActor, CartClient) {
    CartActor::new(config, initial)
}
