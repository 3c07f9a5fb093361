use chrono::Utc;
use tracing::{error, info, instrument, warn};

use crate::actor_framework::{FrameworkError, ResourceClient};
use crate::domain::{Order, OrderCreate, Product};
use crate::order_actor::OrderError;

/// Client for placing and cancelling orders.
///
/// Every stored order holds a reference on its product, so the product
/// cannot be deleted until the order is cancelled.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    products: ResourceClient<Product>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>, products: ResourceClient<Product>) -> Self {
        Self { inner, products }
    }

    #[instrument(skip(self))]
    pub async fn place_order(&self, product_id: u64, quantity: u32) -> Result<u64, OrderError> {
        if quantity == 0 {
            return Err(OrderError::ValidationError("quantity must be positive".to_string()));
        }

        // Step 1: Pin the product. Fails if it does not exist.
        match self.products.retain(product_id).await {
            Ok(()) => info!("Product reference taken"),
            Err(FrameworkError::NotFound(_)) => {
                error!("Product not found");
                return Err(OrderError::InvalidProduct(product_id.to_string()));
            }
            Err(e) => return Err(OrderError::ActorCommunicationError(e.to_string())),
        }

        // Step 2: Store the order, handing the reference back if that fails
        let payload = OrderCreate {
            product_id,
            quantity,
            moment: Utc::now(),
        };
        match self.inner.create(payload).await {
            Ok(order) => {
                info!(order_id = order.id, "Order placed successfully");
                Ok(order.id)
            }
            Err(e) => {
                error!(error = %e, "Order creation failed");
                if let Err(release_err) = self.products.release(product_id).await {
                    warn!(error = %release_err, "Could not release product reference");
                }
                Err(OrderError::ActorCommunicationError(e.to_string()))
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn get_order(&self, id: u64) -> Result<Option<Order>, OrderError> {
        self.inner
            .get(id)
            .await
            .map_err(|e| OrderError::ActorCommunicationError(e.to_string()))
    }

    /// Releases the order's hold on its product, then deletes the order.
    ///
    /// The hold goes first so a failed release leaves the order in place and
    /// the call can be retried. If the delete then fails, the hold is taken
    /// back.
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, id: u64) -> Result<(), OrderError> {
        let order = self.get_order(id).await?.ok_or_else(|| OrderError::NotFound(id.to_string()))?;

        self.products
            .release(order.product_id)
            .await
            .map_err(|e| OrderError::ActorCommunicationError(e.to_string()))?;

        if let Err(e) = self.inner.delete(id).await {
            error!(error = %e, "Order delete failed");
            if let Err(retain_err) = self.products.retain(order.product_id).await {
                warn!(error = %retain_err, "Could not restore product reference");
            }
            return Err(match e {
                FrameworkError::NotFound(_) => OrderError::NotFound(id.to_string()),
                other => OrderError::ActorCommunicationError(other.to_string()),
            });
        }

        info!(product_id = order.product_id, "Order cancelled");
        Ok(())
    }
}
