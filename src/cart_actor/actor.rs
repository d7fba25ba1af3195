//! The cart actor: sole owner of the cart and the catalog cache.

use super::{CartError, CartRequest};
use crate::clients::CartClient;
use crate::config::CartConfig;
use crate::model::{Cart, Product, ProductId, StockRecord, UpdateProductAmount};
use crate::persistence::PersistHandle;
use crate::services::{CartServices, ServiceError};
use std::fmt;
use std::future::Future;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

/// Dependencies injected into [`CartActor::run`].
#[derive(Clone)]
pub struct CartContext {
    pub services: CartServices,
    pub persist: PersistHandle,
}

impl CartContext {
    pub fn new(services: CartServices, persist: PersistHandle) -> Self {
        Self { services, persist }
    }
}

/// Cart mutations, used to pick the message shown on failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Add,
    Remove,
    Update,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Add => "add_product",
            Operation::Remove => "remove_product",
            Operation::Update => "update_product_amount",
        })
    }
}

/// The actor that owns the cart.
///
/// **Concurrency Model**:
/// Requests are processed one at a time, including the stock query a mutation
/// waits on. Two concurrent `add_product` calls for the same product therefore
/// never read the same starting quantity; the second sees the first's result.
/// Readers never queue here: every committed cart is published on a `watch`
/// channel that [`CartClient::cart`] reads directly.
pub struct CartActor {
    receiver: mpsc::Receiver<CartRequest>,
    cart: Cart,
    catalog: Vec<Product>,
    cart_tx: watch::Sender<Cart>,
    catalog_tx: watch::Sender<Vec<Product>>,
    config: CartConfig,
}

impl CartActor {
    pub fn new(config: CartConfig, initial: Cart) -> (Self, CartClient) {
        let (sender, receiver) = mpsc::channel(config.buffer_size.max(1));
        let (cart_tx, cart_rx) = watch::channel(initial.clone());
        let (catalog_tx, catalog_rx) = watch::channel(Vec::new());
        let actor = Self {
            receiver,
            cart: initial,
            catalog: Vec::new(),
            cart_tx,
            catalog_tx,
            config,
        };
        (actor, CartClient::new(sender, cart_rx, catalog_rx))
    }

    /// Runs the actor's event loop, processing requests until every client is dropped.
    pub async fn run(mut self, ctx: CartContext) {
        info!(size = self.cart.len(), "Cart actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CartRequest::AddProduct {
                    product_id,
                    respond_to,
                } => {
                    debug!(%product_id, "AddProduct");
                    let result = self.add_product(product_id, &ctx).await;
                    let _ = respond_to.send(self.settle(Operation::Add, result, &ctx));
                }
                CartRequest::RemoveProduct {
                    product_id,
                    respond_to,
                } => {
                    debug!(%product_id, "RemoveProduct");
                    let result = self.cart.remove(product_id);
                    let _ = respond_to.send(self.settle(Operation::Remove, result, &ctx));
                }
                CartRequest::UpdateProductAmount { update, respond_to } => {
                    debug!(product_id = %update.product_id, amount = update.amount, "UpdateProductAmount");
                    let result = self.update_product_amount(update, &ctx).await;
                    let _ = respond_to.send(self.settle(Operation::Update, result, &ctx));
                }
                CartRequest::LoadProducts { respond_to } => {
                    debug!("LoadProducts");
                    let _ = respond_to.send(self.load_products(&ctx).await);
                }
                CartRequest::Flush { respond_to } => {
                    debug!("Flush");
                    let _ = respond_to.send(ctx.persist.flush().await.map_err(CartError::from));
                }
            }
        }

        info!(size = self.cart.len(), "Cart actor shutdown");
    }

    async fn add_product(&self, id: ProductId, ctx: &CartContext) -> Result<Cart, CartError> {
        if self.cart.contains(id) {
            let stock = self.query_stock(id, ctx).await?;
            return self.cart.increment(id, &stock);
        }
        let product = self
            .catalog
            .iter()
            .find(|p| p.id == id)
            .ok_or(CartError::NotInCatalog(id))?;
        self.cart.insert_new(product)
    }

    async fn update_product_amount(
        &self,
        update: UpdateProductAmount,
        ctx: &CartContext,
    ) -> Result<Cart, CartError> {
        let UpdateProductAmount { product_id, amount } = update;
        if amount == 0 {
            return Err(CartError::InvalidAmount(amount));
        }
        if !self.cart.contains(product_id) {
            return Err(CartError::NotFound(product_id));
        }
        let stock = self.query_stock(product_id, ctx).await?;
        self.cart.set_amount(product_id, amount, &stock)
    }

    async fn load_products(&mut self, ctx: &CartContext) -> Result<Vec<Product>, CartError> {
        let query = ctx.services.catalog.list_products();
        match with_timeout(self.config.query_timeout(), query).await {
            Ok(products) => {
                info!(count = products.len(), "Catalog loaded");
                self.catalog = products;
                self.catalog_tx.send_replace(self.catalog.clone());
                Ok(self.catalog.clone())
            }
            Err(e) => {
                warn!(error = %e, "Catalog load failed");
                Err(CartError::Collaborator(e))
            }
        }
    }

    async fn query_stock(&self, id: ProductId, ctx: &CartContext) -> Result<StockRecord, CartError> {
        let query = ctx.services.stock.stock(id);
        let stock = with_timeout(self.config.query_timeout(), query).await?;
        debug!(product_id = %id, available = stock.amount, "Stock");
        Ok(stock)
    }

    /// Commit a successful transition or report a failed one.
    fn settle(
        &mut self,
        op: Operation,
        result: Result<Cart, CartError>,
        ctx: &CartContext,
    ) -> Result<Cart, CartError> {
        match result {
            Ok(next) => {
                self.cart = next;
                ctx.persist.save(&self.cart);
                self.cart_tx.send_replace(self.cart.clone());
                info!(%op, size = self.cart.len(), "Cart updated");
                Ok(self.cart.clone())
            }
            Err(e) => {
                warn!(%op, error = %e, "Cart unchanged");
                if e.is_reportable() {
                    ctx.services.notifier.report_error(self.message_for(op, &e));
                }
                Err(e)
            }
        }
    }

    fn message_for(&self, op: Operation, error: &CartError) -> &str {
        let messages = &self.config.messages;
        match (op, error) {
            (_, CartError::InsufficientStock { .. }) => messages.insufficient_stock.as_str(),
            (Operation::Add, _) => messages.add_failed.as_str(),
            (Operation::Remove, _) => messages.remove_failed.as_str(),
            (Operation::Update, _) => messages.update_failed.as_str(),
        }
    }
}

async fn with_timeout<T>(
    limit: Option<Duration>,
    query: impl Future<Output = Result<T, ServiceError>>,
) -> Result<T, ServiceError> {
    match limit {
        Some(limit) => tokio::time::timeout(limit, query)
            .await
            .map_err(|_| ServiceError::Timeout(limit))?,
        None => query.await,
    }
}
