//! Type-safe wrapper around the cart actor's request channel.

pub mod cart_client;

pub use cart_client::*;
