//! # Cart Store
//!
//! > **A shopping cart that a single actor owns.**
//!
//! This crate keeps a shopper's cart in memory, checks every quantity increase
//! against a stock service, persists the cart after every change and reports
//! failures to the shopper through a notification sink.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Why an Actor?
//!
//! Adding a product is a read-modify-write that waits on a remote stock query
//! in the middle. If two of those interleave, one increment is lost. Giving
//! the cart to one Tokio task that processes requests sequentially removes the
//! race without a lock held across the query.
//!
//! ### Pure Transitions
//!
//! The actor never edits the cart in place. Every operation is a function from
//! the old [`Cart`](model::Cart) to a new one or to a [`CartError`](cart_actor::CartError);
//! only `Ok` values are committed, persisted and published.
//!
//! ## 👩‍💻 Architecture Notes
//!
//! ### 1. Type-Safe Error Handling
//! Rejections are values, not panics: `NotFound`, `NotInCatalog`, `InsufficientStock`,
//! `InvalidAmount` and `Collaborator` all leave the cart unchanged. Insufficient stock gets
//! its own shopper message, every other failure the operation's generic one.
//!
//! ### 2. Async Context Injection
//! Collaborators are injected at `run()` time, not construction time, exactly like the
//! persistence handle. See [`lifecycle`].
//!
//! ### 3. Concurrency Model
//! Mutations queue on the actor. Reads do not: [`CartClient::cart`](clients::CartClient::cart)
//! returns the last committed value from a `watch` channel.
//!
//! ### 4. Observability
//! `tracing` everywhere with structured fields. See [`lifecycle::tracing`].
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Data ([`model`])
//! [`Product`](model::Product), [`StockRecord`](model::StockRecord), [`Cart`](model::Cart)
//! and the pure transitions.
//!
//! ### 2. The Engine ([`cart_actor`])
//! The event loop that owns the cart and the catalog cache.
//!
//! ### 3. The Interface ([`clients`])
//! [`CartClient`](clients::CartClient): `cart`, `products`, `add_product`, `remove_product`,
//! `update_product_amount`, `load_products`.
//!
//! ### 4. The Outside World ([`services`], [`persistence`])
//! Collaborator traits with in-memory and file-backed implementations, and the
//! snapshot codec with its fire-and-forget writer.
//!
//! ### 5. The Orchestrator ([`lifecycle`], [`config`])
//! [`CartSystem`](lifecycle::CartSystem) restores, wires, starts and stops everything.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Run the demo with info logs
//! RUST_LOG=info cargo run
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod cart_actor;
pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod mock;
pub mod model;
pub mod persistence;
pub mod services;
