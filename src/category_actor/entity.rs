use crate::actor_framework::Entity;
use crate::domain::{Category, CategoryCreate};

impl Entity for Category {
    type Id = u64;
    type CreateParams = CategoryCreate;
    type Update = CategoryCreate;
    type Filter = ();

    fn id(&self) -> &u64 {
        &self.id
    }

    fn from_create_params(id: u64, params: CategoryCreate) -> Result<Self, String> {
        Ok(Category::new(id, params.name.trim()))
    }

    fn on_create(&mut self) -> Result<(), String> {
        if self.name.is_empty() {
            return Err("name is required".to_string());
        }
        Ok(())
    }

    fn on_update(&mut self, update: CategoryCreate) -> Result<(), String> {
        self.name = update.name.trim().to_string();
        self.on_create()
    }
}
