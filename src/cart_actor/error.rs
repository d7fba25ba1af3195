//! Error types for the Cart actor.

use crate::model::ProductId;
use crate::persistence::PersistenceError;
use crate::services::ServiceError;
use thiserror::Error;

/// Errors that can occur during cart operations.
///
/// Every variant except the channel failures leaves the cart exactly as it was.
#[derive(Debug, Error)]
pub enum CartError {
    /// No line item for the product exists in the cart.
    #[error("Product not in cart: {0}")]
    NotFound(ProductId),

    /// The product is neither in the cart nor in the last loaded catalog.
    #[error("Product not in catalog: {0}")]
    NotInCatalog(ProductId),

    /// The requested quantity exceeds the available stock.
    #[error("Insufficient stock for {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    /// A new line item was requested for a product that already has one.
    #[error("Product already in cart: {0}")]
    AlreadyInCart(ProductId),

    /// The target quantity can never be stored in the cart.
    #[error("Invalid quantity: {0}")]
    InvalidAmount(u32),

    /// The stock or catalog service failed.
    #[error("Collaborator error: {0}")]
    Collaborator(#[from] ServiceError),

    /// The persistence writer could not confirm a flush.
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// The cart actor is no longer running.
    #[error("Cart actor closed")]
    ActorClosed,

    /// The cart actor dropped the response channel.
    #[error("Cart actor dropped response channel")]
    ActorDropped,
}

impl CartError {
    /// Whether the failure should be shown to the shopper.
    ///
    /// Channel failures mean the store itself is gone, so there is nobody
    /// left to report through.
    pub fn is_reportable(&self) -> bool {
        !matches!(self, CartError::ActorClosed | CartError::ActorDropped)
    }
}
