use crate::cart_actor::{self, CartContext};
use crate::clients::CartClient;
use crate::config::CartConfig;
use crate::persistence::{self, PersistenceWriter};
use crate::services::CartServices;
use tracing::{error, info};

/// The composition root of the cart store.
///
/// `CartSystem` is responsible for:
/// - **Restoring State**: Reading the persisted cart before anything can mutate it
/// - **Lifecycle Management**: Starting and stopping the cart actor and the persistence writer
/// - **Dependency Wiring**: Injecting collaborators into the actor at `run()` time
///
/// Create it once at startup, hand clones of [`cart_client`](Self::cart_client)
/// to whatever needs the cart, and call [`shutdown`](Self::shutdown) at exit.
///
/// # Example
///
/// ```ignore
/// let system = CartSystem::start(CartConfig::from_env(), services).await;
///
/// system.cart_client.load_products().await?;
/// system.cart_client.add_product(ProductId(1)).await?;
///
/// // Gracefully shut down when done
/// system.shutdown().await?;
/// ```
pub struct CartSystem {
    /// Client for interacting with the Cart actor
    pub cart_client: CartClient,

    /// Task handles, actor first, writer last (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl CartSystem {
    /// Loads the persisted cart and spawns the actor and the persistence writer.
    ///
    /// A missing or unreadable snapshot starts the cart empty; see
    /// [`persistence::load_cart`].
    pub async fn start(config: CartConfig, services: CartServices) -> Self {
        let initial = persistence::load_cart(services.storage.as_ref(), &config.storage_key).await;

        let (writer, persist) =
            PersistenceWriter::new(services.storage.clone(), config.storage_key.clone());
        let (cart_actor, cart_client) = cart_actor::new(config, initial);

        let writer_handle = tokio::spawn(writer.run());
        let actor_handle = tokio::spawn(cart_actor.run(CartContext::new(services, persist)));

        Self {
            cart_client,
            handles: vec![actor_handle, writer_handle],
        }
    }

    /// Gracefully shuts down the cart store.
    ///
    /// Dropping the client closes the request channel; the actor drains what
    /// is queued and exits, which drops the last persistence handle; the
    /// writer then drains its queue and exits. Every committed cart is on
    /// storage when this returns `Ok`.
    ///
    /// Clones of the client held elsewhere keep the actor alive, so drop them first.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if both tasks shut down cleanly
    /// - `Err(String)` if a task failed or panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down cart system...");

        drop(self.cart_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Cart task failed: {:?}", e);
                return Err(format!("Cart task failed: {:?}", e));
            }
        }

        info!("Cart system shutdown complete.");
        Ok(())
    }
}
