//! # Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging with the `tracing` crate.
//!
//! ## Configuration
//!
//! The compact format hides the module prefix (`with_target(false)`); the
//! structured fields (`product_id`, `op`, `size`) carry the context instead.
//! Verbosity is controlled by `RUST_LOG`.
//!
//! ## What Gets Traced
//!
//! - **Lifecycle**: actor and persistence writer startup and shutdown (`info`)
//! - **Requests**: every request the actor receives, with its arguments (`debug`)
//! - **Commits**: every cart change, with the new size (`info`)
//! - **Rejections**: every operation that left the cart unchanged, with the reason (`warn`)
//! - **Shopper messages**: what [`TracingNotifier`](crate::services::TracingNotifier) reports (`warn`)
//!
//! ## Usage Examples
//!
//! ```bash
//! # Commits and rejections
//! RUST_LOG=info cargo run
//!
//! # Requests, stock answers and storage writes as well
//! RUST_LOG=debug cargo run
//!
//! # Only the cart actor
//! RUST_LOG=cart_store::cart_actor=debug cargo run
//! ```
//!
//! ## Workflow Trace Example
//!
//! **With `RUST_LOG=debug`**, adding a product twice with one unit in stock:
//!
//! ```text
//! DEBUG add_product{product_id=ProductId(1)}: Sending request
//! DEBUG AddProduct product_id=product_1
//!  INFO Cart updated op=add_product size=1
//! DEBUG add_product{product_id=ProductId(1)}: Sending request
//! DEBUG AddProduct product_id=product_1
//! DEBUG Stock product_id=product_1 available=1
//!  WARN Cart unchanged op=add_product error=Insufficient stock for product_1: requested 2, available 1
//!  WARN User notified user_message="Requested quantity is out of stock"
//! DEBUG Cart persisted key=@RocketShoes:cart bytes=84
//! ```
//!
//! Persistence lines may appear later than the commit they belong to: writes
//! happen on their own task.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
