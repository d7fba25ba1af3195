//! # Cart Store Demo
//!
//! Walks through a shopping session against an in-memory inventory and a
//! file-backed cart snapshot:
//! 1.  Starting the [`CartSystem`] (restores any cart left by a previous run).
//! 2.  Loading the catalog and adding products.
//! 3.  Hitting the stock limit and recovering.
//!
//! Run it twice to see the cart survive a restart. The snapshot directory
//! defaults to `./.cart-data` and can be changed with `CART_DATA_DIR`.

use cart_store::config::CartConfig;
use cart_store::lifecycle::{setup_tracing, CartSystem};
use cart_store::model::{Product, ProductId, UpdateProductAmount};
use cart_store::services::{CartServices, FileStorage, InMemoryInventory, TracingNotifier};
use std::sync::Arc;
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = CartConfig::from_env();
    let data_dir = std::env::var("CART_DATA_DIR").unwrap_or_else(|_| ".cart-data".to_string());
    info!(data_dir = %data_dir, storage_key = %config.storage_key, "Starting cart demo");

    let inventory = Arc::new(
        InMemoryInventory::new()
            .with_product(Product::new(1, "Running Sneaker", 179.9, "https://img.example/1.jpg"), 3)
            .with_product(Product::new(2, "Trail Boot", 239.9, "https://img.example/2.jpg"), 5)
            .with_product(Product::new(3, "Canvas Slip-on", 99.9, "https://img.example/3.jpg"), 1),
    );
    let services = CartServices::with_inventory(
        inventory,
        Arc::new(FileStorage::new(data_dir)),
        Arc::new(TracingNotifier),
    );

    let system = CartSystem::start(config, services).await;
    let cart = &system.cart_client;
    info!(size = cart.cart().len(), "Cart restored");

    let products = cart.load_products().await.map_err(|e| e.to_string())?;
    info!(count = products.len(), "Catalog loaded");

    let span = tracing::info_span!("shopping");
    async {
        for id in [1, 1, 2, 3, 3] {
            match cart.add_product(ProductId(id)).await {
                Ok(c) => info!(product_id = id, amount = c.amount_of(ProductId(id)), "Added"),
                Err(e) => warn!(product_id = id, error = %e, "Add rejected"),
            }
        }

        let update = UpdateProductAmount {
            product_id: ProductId(2),
            amount: 4,
        };
        if let Err(e) = cart.update_product_amount(update).await {
            warn!(error = %e, "Update rejected");
        }

        if let Err(e) = cart.remove_product(ProductId(3)).await {
            warn!(error = %e, "Remove rejected");
        }
    }
    .instrument(span)
    .await;

    for item in &cart.cart() {
        info!(product = %item.name, amount = item.amount, "In cart");
    }

    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}
