use crate::actor_framework::Entity;
use crate::domain::{validate_product, Product, ProductFields, ProductFilter};

impl Entity for Product {
    type Id = u64;
    type CreateParams = ProductFields;
    type Update = ProductFields;
    type Filter = ProductFilter;

    fn id(&self) -> &u64 {
        &self.id
    }

    fn from_create_params(id: u64, params: ProductFields) -> Result<Self, String> {
        Ok(Product::from_fields(id, params))
    }

    fn on_create(&mut self) -> Result<(), String> {
        validate_product(&self.name, self.price)
    }

    /// Copies every field of the update onto the product, keeping its id.
    fn on_update(&mut self, fields: ProductFields) -> Result<(), String> {
        fields.validate()?;
        self.apply(fields);
        Ok(())
    }

    fn matches(&self, filter: &ProductFilter) -> bool {
        let in_category = filter.category_ids.is_empty()
            || filter.category_ids.iter().any(|id| self.has_category(*id));
        in_category && self.name.to_lowercase().contains(filter.name())
    }
}
