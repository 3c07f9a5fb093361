use tracing::{debug, info, instrument};

use crate::actor_framework::ResourceClient;
use crate::category_actor::CategoryError;
use crate::domain::{Category, CategoryCreate, CategoryDTO};

/// Category lookup service.
#[derive(Clone)]
pub struct CategoryClient {
    inner: ResourceClient<Category>,
}

impl_basic_client!(CategoryClient, Category, CategoryDTO, CategoryError);

impl CategoryClient {
    /// Every category in identifier order. The catalog of categories is small
    /// and curated, so this is neither filtered nor paged.
    #[instrument(skip(self))]
    pub async fn find_all(&self) -> Result<Vec<CategoryDTO>, CategoryError> {
        debug!("Sending request");
        let categories = self.inner.list().await?;
        Ok(categories.into_iter().map(CategoryDTO::from).collect())
    }

    #[instrument(fields(category_name = %dto.name), skip(self, dto))]
    pub async fn insert(&self, dto: CategoryDTO) -> Result<CategoryDTO, CategoryError> {
        let category = self.inner.create(CategoryCreate { name: dto.name }).await?;
        info!(category_id = category.id, "Category created successfully");
        Ok(category.into())
    }
}
