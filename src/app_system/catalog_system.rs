use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{error, info, instrument};

use crate::actor_framework::ResourceActor;
use crate::clients::{CategoryClient, OrderClient, ProductClient, UserClient};
use crate::config::CatalogConfig;
use crate::domain::{Category, Order, Product, User};

/// Identifier generator counting up from 1.
pub fn sequence() -> impl Fn() -> u64 + Send + Sync + 'static {
    let counter = Arc::new(AtomicU64::new(1));
    move || counter.fetch_add(1, Ordering::SeqCst)
}

/// The catalog application: one store task per entity plus the services
/// wired on top of them.
pub struct CatalogSystem {
    pub product_client: ProductClient,
    pub category_client: CategoryClient,
    pub user_client: UserClient,
    pub order_client: OrderClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl CatalogSystem {
    #[instrument(name = "catalog_system", skip(config))]
    pub fn new(config: &CatalogConfig) -> Self {
        info!(buffer_size = config.buffer_size, "Starting catalog system");

        // 1. Categories come first: products resolve against them
        let (category_actor, category_store) = ResourceActor::<Category>::new(config.buffer_size, sequence());
        let category_handle = tokio::spawn(category_actor.run());

        // 2. Products
        let (product_actor, product_store) = ResourceActor::<Product>::new(config.buffer_size, sequence());
        let product_handle = tokio::spawn(product_actor.run());

        // 3. Users
        let (user_actor, user_store) = ResourceActor::<User>::new(config.buffer_size, sequence());
        let user_handle = tokio::spawn(user_actor.run());

        // 4. Orders, which pin the products they reference
        let (order_actor, order_store) = ResourceActor::<Order>::new(config.buffer_size, sequence());
        let order_handle = tokio::spawn(order_actor.run());

        Self {
            product_client: ProductClient::new(product_store.clone(), category_store.clone(), config.page_limits),
            category_client: CategoryClient::new(category_store),
            user_client: UserClient::new(user_store),
            order_client: OrderClient::new(order_store, product_store),
            handles: vec![category_handle, product_handle, user_handle, order_handle],
        }
    }

    /// Drops every client, which closes the store channels, then waits for
    /// the store tasks to finish.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.product_client);
        drop(self.category_client);
        drop(self.user_client);
        drop(self.order_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Store task failed: {:?}", e);
                return Err(format!("Store task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
