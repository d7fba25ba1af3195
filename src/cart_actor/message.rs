//! Messages exchanged between [`CartClient`](crate::clients::CartClient) and the cart actor.

use super::CartError;
use crate::model::{Cart, Product, ProductId, UpdateProductAmount};
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the cart actor.
pub type Response<T> = oneshot::Sender<Result<T, CartError>>;

/// Requests understood by the cart actor.
///
/// Mutations answer with the cart as committed; a rejected mutation answers
/// with the reason and the cart stays as it was.
#[derive(Debug)]
pub enum CartRequest {
    AddProduct {
        product_id: ProductId,
        respond_to: Response<Cart>,
    },
    RemoveProduct {
        product_id: ProductId,
        respond_to: Response<Cart>,
    },
    UpdateProductAmount {
        update: UpdateProductAmount,
        respond_to: Response<Cart>,
    },
    LoadProducts {
        respond_to: Response<Vec<Product>>,
    },
    /// Resolves once every snapshot committed so far has reached storage.
    Flush { respond_to: Response<()> },
}
