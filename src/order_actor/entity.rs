use crate::actor_framework::Entity;
use crate::domain::{Order, OrderCreate};

impl Entity for Order {
    type Id = u64;
    type CreateParams = OrderCreate;
    type Update = (); // Orders are immutable once placed
    type Filter = ();

    fn id(&self) -> &u64 {
        &self.id
    }

    fn from_create_params(id: u64, params: OrderCreate) -> Result<Self, String> {
        Ok(Self {
            id,
            product_id: params.product_id,
            quantity: params.quantity,
            moment: params.moment,
        })
    }

    fn on_create(&mut self) -> Result<(), String> {
        if self.quantity == 0 {
            return Err("quantity must be positive".to_string());
        }
        Ok(())
    }

    fn on_update(&mut self, _update: ()) -> Result<(), String> {
        Ok(())
    }
}
