use crate::api::AppState;
use crate::cart_actor::CartContext;
use crate::clients::{AccountClient, CartClient, CatalogClient, OrderClient};
use crate::config::Config;
use crate::promo::{PromoLookup, StaticPromoTable};
use resource_actor::Retention;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Actor task failed: {0}")]
    ActorTaskFailed(String),
}

/// Knobs for [`MarketSystem::new`].
#[derive(Clone)]
pub struct SystemOptions {
    /// Request channel capacity of each actor.
    pub buffer_size: usize,
    /// Idle-cart eviction.
    pub cart_retention: Retention,
    pub promos: Arc<dyn PromoLookup>,
}

impl Default for SystemOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl SystemOptions {
    /// Built-in promo codes extended with the configured ones.
    pub fn from_config(config: &Config) -> Self {
        let mut promos = StaticPromoTable::builtin();
        promos.extend(config.promo_codes.iter().cloned());
        Self {
            buffer_size: config.actor_buffer,
            cart_retention: Retention::new(config.cart_retention, config.eviction_interval),
            promos: Arc::new(promos),
        }
    }
}

/// The running marketplace: one actor per record type plus their clients.
///
/// # Example
///
/// ```ignore
/// let market = MarketSystem::new(SystemOptions::default());
/// let cart = market.carts.add_item(buyer, meal, 2).await?;
/// market.shutdown().await?;
/// ```
pub struct MarketSystem {
    pub catalog: CatalogClient,
    pub accounts: AccountClient,
    pub carts: CartClient,
    pub orders: OrderClient,
    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<JoinHandle<()>>,
}

impl MarketSystem {
    /// Creates every actor, wires their dependencies and spawns them.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn new(options: SystemOptions) -> Self {
        // 1. Create actors (no dependencies)
        let (catalog_actor, catalog) = crate::catalog_actor::new(options.buffer_size);
        let (account_actor, accounts) = crate::account_actor::new(options.buffer_size);
        let (cart_actor, carts) = crate::cart_actor::new(options.buffer_size, options.cart_retention);
        let (order_actor, orders) = crate::order_actor::new(options.buffer_size);

        // 2. Start actors with injected context
        let cart_context = CartContext {
            catalog: Arc::new(catalog.clone()),
            promos: options.promos,
        };
        let handles = vec![
            tokio::spawn(cart_actor.run(cart_context)),
            tokio::spawn(order_actor.run(Arc::new(catalog.clone()))),
            tokio::spawn(catalog_actor.run(())),
            tokio::spawn(account_actor.run(())),
        ];
        info!(actors = handles.len(), "Market system started");

        Self {
            catalog,
            accounts,
            carts,
            orders,
            handles,
        }
    }

    /// Clones of every client, for the HTTP handlers.
    pub fn app_state(&self) -> AppState {
        AppState {
            catalog: self.catalog.clone(),
            accounts: self.accounts.clone(),
            carts: self.carts.clone(),
            orders: self.orders.clone(),
        }
    }

    /// Drops the clients and waits for every actor to finish.
    ///
    /// Hangs while any other client clone (for example an [`AppState`]) is still alive.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down market system...");
        drop(self.carts);
        drop(self.orders);
        drop(self.catalog);
        drop(self.accounts);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Actor task failed");
                return Err(SystemError::ActorTaskFailed(e.to_string()));
            }
        }

        info!("Market system shutdown complete.");
        Ok(())
    }
}
