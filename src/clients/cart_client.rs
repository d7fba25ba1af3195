//! # Cart Client
//!
//! The public surface of the cart store. Hides the request channel behind
//! typed async methods and exposes the latest committed state synchronously.
use crate::cart_actor::{CartError, CartRequest, Response};
use crate::model::{Cart, Product, ProductId, UpdateProductAmount};
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, instrument};

/// Client for interacting with the Cart actor. Cheap to clone.
///
/// Mutating methods return the cart as committed, or the reason it was left
/// unchanged. Shopper-facing messages have already been reported by the time
/// an error is returned, except for [`load_products`](Self::load_products),
/// whose failures are the caller's to handle.
#[derive(Clone)]
pub struct CartClient {
    sender: mpsc::Sender<CartRequest>,
    cart: watch::Receiver<Cart>,
    products: watch::Receiver<Vec<Product>>,
}

impl CartClient {
    pub fn new(
        sender: mpsc::Sender<CartRequest>,
        cart: watch::Receiver<Cart>,
        products: watch::Receiver<Vec<Product>>,
    ) -> Self {
        Self {
            sender,
            cart,
            products,
        }
    }

    /// Latest committed cart.
    pub fn cart(&self) -> Cart {
        self.cart.borrow().clone()
    }

    /// Catalog as of the last successful [`load_products`](Self::load_products).
    pub fn products(&self) -> Vec<Product> {
        self.products.borrow().clone()
    }

    /// Receiver notified on every committed cart change.
    pub fn subscribe_cart(&self) -> watch::Receiver<Cart> {
        self.cart.clone()
    }

    /// Receiver notified on every catalog reload.
    pub fn subscribe_products(&self) -> watch::Receiver<Vec<Product>> {
        self.products.clone()
    }

    /// Add one unit of a product.
    ///
    /// A product already in the cart is incremented if stock allows; a new one
    /// must be present in the last loaded catalog.
    #[instrument(skip(self))]
    pub async fn add_product(&self, product_id: ProductId) -> Result<Cart, CartError> {
        debug!("Sending request");
        self.request(|respond_to| CartRequest::AddProduct {
            product_id,
            respond_to,
        })
        .await
    }

    /// Remove a product's line item entirely.
    #[instrument(skip(self))]
    pub async fn remove_product(&self, product_id: ProductId) -> Result<Cart, CartError> {
        debug!("Sending request");
        self.request(|respond_to| CartRequest::RemoveProduct {
            product_id,
            respond_to,
        })
        .await
    }

    /// Set the absolute quantity of a product already in the cart.
    #[instrument(skip(self))]
    pub async fn update_product_amount(
        &self,
        update: UpdateProductAmount,
    ) -> Result<Cart, CartError> {
        debug!("Sending request");
        self.request(|respond_to| CartRequest::UpdateProductAmount { update, respond_to })
            .await
    }

    /// Replace the catalog cache with the catalog service's current list.
    #[instrument(skip(self))]
    pub async fn load_products(&self) -> Result<Vec<Product>, CartError> {
        debug!("Sending request");
        self.request(|respond_to| CartRequest::LoadProducts { respond_to })
            .await
    }

    /// Wait until every cart committed so far has been written to storage.
    #[instrument(skip(self))]
    pub async fn flush(&self) -> Result<(), CartError> {
        self.request(|respond_to| CartRequest::Flush { respond_to })
            .await
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(Response<T>) -> CartRequest,
    ) -> Result<T, CartError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(make(respond_to))
            .await
            .map_err(|_| CartError::ActorClosed)?;
        response.await.map_err(|_| CartError::ActorDropped)?
    }
}
