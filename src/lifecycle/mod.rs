//! # System Lifecycle
//!
//! Wiring, startup and shutdown of the cart store.
//!
//! ## Startup
//!
//! [`CartSystem::start`] is the only place that knows about every moving part:
//!
//! 1. **Restore** - read the snapshot from [`CartStorage`](crate::services::CartStorage)
//! 2. **Create** - the [`CartActor`](crate::cart_actor::CartActor) seeded with that cart, and its client
//! 3. **Inject** - collaborators and the persistence handle are passed to `run(context)`,
//!    not to `new()`, so the actor is constructible without them
//! 4. **Spawn** - actor and persistence writer each get their own Tokio task
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop the client** - closes the request channel
//! 2. **Actor drains** - remaining requests are answered, then the loop ends
//! 3. **Writer drains** - the actor's persistence handle is dropped with it, so the
//!    writer finishes the queued snapshots and exits
//! 4. **Await completion** - both task handles are joined
//!
//! ## Observability
//!
//! [`setup_tracing`] installs the subscriber; see [`tracing`] for what gets logged.

pub mod cart_system;
pub mod tracing;

pub use cart_system::*;
pub use self::tracing::setup_tracing;
