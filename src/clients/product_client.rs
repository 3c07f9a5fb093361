use std::collections::BTreeSet;

use tracing::{debug, info, instrument, warn};

use crate::actor_framework::{FrameworkError, ResourceClient};
use crate::domain::{validate_product, Category, Product, ProductDTO, ProductFields, ProductFilter};
use crate::pagination::{Page, PageLimits, PageRequest};
use crate::product_actor::ProductError;

/// Product catalog service.
///
/// Converts between DTOs and stored products, checks that referenced rows
/// exist, and turns store failures into [`ProductError`] kinds.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
    categories: ResourceClient<Category>,
    limits: PageLimits,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>, categories: ResourceClient<Category>, limits: PageLimits) -> Self {
        Self {
            inner,
            categories,
            limits,
        }
    }

    /// Lists products matching the category and name filters.
    ///
    /// An empty `category_ids` slice disables the category filter. No match
    /// yields an empty page, not an error.
    #[instrument(skip(self))]
    pub async fn find_all_paged(
        &self,
        category_ids: &[u64],
        name: &str,
        page: PageRequest,
    ) -> Result<Page<ProductDTO>, ProductError> {
        debug!("Sending request");
        let filter = ProductFilter::new(category_ids.iter().copied(), name);
        let page = self.inner.find_paged(filter, page.clamped(self.limits)).await?;
        debug!(total = page.total_elements, "Products found");
        Ok(page.map(ProductDTO::from))
    }

    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: u64) -> Result<ProductDTO, ProductError> {
        debug!("Sending request");
        match self.inner.get(id).await? {
            Some(product) => Ok(product.into()),
            None => {
                debug!("Product not found");
                Err(ProductError::NotFound(id.to_string()))
            }
        }
    }

    #[instrument(fields(product_name = %dto.name), skip(self, dto))]
    pub async fn insert(&self, dto: ProductDTO) -> Result<ProductDTO, ProductError> {
        let fields = self.fields_from_dto(dto).await?;
        let product = self.inner.create(fields).await?;
        info!(product_id = product.id, "Product created successfully");
        Ok(product.into())
    }

    /// Overwrites an existing product with the DTO's fields.
    ///
    /// Existence is confirmed up front through a lightweight reference, so a
    /// missing id fails before any category is looked up.
    #[instrument(fields(product_name = %dto.name), skip(self, dto))]
    pub async fn update(&self, id: u64, dto: ProductDTO) -> Result<ProductDTO, ProductError> {
        let reference = match self.inner.reference(id).await {
            Ok(reference) => reference,
            Err(FrameworkError::NotFound(_)) => {
                warn!("Update of unknown product");
                return Err(ProductError::NotFound(id.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        let fields = self.fields_from_dto(dto).await?;
        let product = self.inner.update(reference, fields).await?;
        info!("Product updated successfully");
        Ok(product.into())
    }

    /// Deletes a product with a single store request.
    ///
    /// A product still referenced elsewhere fails with `Conflict`, which is
    /// kept apart from `NotFound`.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: u64) -> Result<(), ProductError> {
        match self.inner.delete(id).await {
            Ok(()) => {
                info!("Product deleted");
                Ok(())
            }
            Err(FrameworkError::NotFound(_)) => Err(ProductError::NotFound(id.to_string())),
            Err(e @ FrameworkError::IntegrityViolation { .. }) => {
                warn!(error = %e, "Product delete blocked");
                Err(ProductError::Conflict(e.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Validates the DTO and resolves each referenced category.
    async fn fields_from_dto(&self, dto: ProductDTO) -> Result<ProductFields, ProductError> {
        validate_product(&dto.name, dto.price).map_err(ProductError::Validation)?;

        let mut categories = BTreeSet::new();
        for category in &dto.categories {
            match self.categories.get(category.id).await {
                Ok(Some(found)) => {
                    categories.insert(found);
                }
                Ok(None) => {
                    warn!(category_id = category.id, "Referenced category does not exist");
                    return Err(ProductError::NotFound(format!("category {}", category.id)));
                }
                Err(e) => return Err(ProductError::ActorCommunicationError(e.to_string())),
            }
        }
        Ok(ProductFields::from_dto(dto, categories))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor_framework::{EntityRef, ResourceActor, ResourceRequest};
    use crate::domain::{CategoryCreate, CategoryDTO};
    use crate::mock_framework::{
        create_mock_client, expect_create, expect_delete, expect_find_paged, expect_get, expect_reference,
        expect_update,
    };
    use crate::test_factory::{create_category, create_product, create_product_dto};
    use rust_decimal::Decimal;
    use tokio::sync::mpsc;

    const EXISTING_ID: u64 = 1;
    const NON_EXISTING_ID: u64 = 2;
    const DEPENDENT_ID: u64 = 4;

    /// Real category store holding "Books" (id 1) and the factory category (id 2).
    async fn seeded_categories() -> ResourceClient<Category> {
        let (actor, client) = ResourceActor::<Category>::new(10, crate::app_system::sequence());
        tokio::spawn(actor.run());
        client.create(CategoryCreate { name: "Books".into() }).await.unwrap();
        let electronics = client
            .create(CategoryCreate { name: create_category().name })
            .await
            .unwrap();
        assert_eq!(electronics, create_category());
        client
    }

    async fn service() -> (ProductClient, mpsc::Receiver<ResourceRequest<Product>>) {
        let (inner, receiver) = create_mock_client::<Product>(10);
        let service = ProductClient::new(inner, seeded_categories().await, PageLimits::default());
        (service, receiver)
    }

    #[tokio::test]
    async fn test_find_by_id_returns_dto_when_id_exists() {
        let (service, mut product_rx) = service().await;

        let task = tokio::spawn(async move { service.find_by_id(EXISTING_ID).await });

        let (id, responder) = expect_get(&mut product_rx).await.expect("Expected Product Get");
        assert_eq!(id, EXISTING_ID);
        responder.send(Ok(Some(create_product(EXISTING_ID)))).unwrap();

        let dto = task.await.unwrap().unwrap();
        assert_eq!(dto.id, EXISTING_ID);
        assert_eq!(dto.categories, vec![CategoryDTO::from(create_category())]);
    }

    #[tokio::test]
    async fn test_find_by_id_fails_with_not_found_when_id_does_not_exist() {
        let (service, mut product_rx) = service().await;

        let task = tokio::spawn(async move { service.find_by_id(NON_EXISTING_ID).await });

        let (_, responder) = expect_get(&mut product_rx).await.expect("Expected Product Get");
        responder.send(Ok(None)).unwrap();

        assert_eq!(
            task.await.unwrap(),
            Err(ProductError::NotFound(NON_EXISTING_ID.to_string()))
        );
    }

    #[tokio::test]
    async fn test_find_all_paged_returns_page() {
        let (service, mut product_rx) = service().await;

        let task = tokio::spawn(async move { service.find_all_paged(&[], "", PageRequest::of(0, 10)).await });

        let (filter, page, responder) = expect_find_paged(&mut product_rx).await.expect("Expected FindPaged");
        assert_eq!(filter, ProductFilter::default());
        assert_eq!(page, PageRequest::of(0, 10));
        responder.send(Ok(Page::new(vec![create_product(EXISTING_ID)], page, 1))).unwrap();

        let result = task.await.unwrap().unwrap();
        assert_eq!(result.total_elements, 1);
        assert_eq!(result.content[0].id, EXISTING_ID);
    }

    #[tokio::test]
    async fn test_find_all_paged_clamps_page_size() {
        let (service, mut product_rx) = service().await;

        let task = tokio::spawn(async move { service.find_all_paged(&[2], "phone", PageRequest::of(0, 0)).await });

        let (filter, page, responder) = expect_find_paged(&mut product_rx).await.expect("Expected FindPaged");
        assert_eq!(filter, ProductFilter::new([2], "phone"));
        assert_eq!(page.size, PageLimits::default().default_size);
        responder.send(Ok(Page::empty(page))).unwrap();

        assert!(task.await.unwrap().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_resolves_categories_and_returns_assigned_id() {
        let (service, mut product_rx) = service().await;

        let task = tokio::spawn(async move { service.insert(create_product_dto()).await });

        let (fields, responder) = expect_create(&mut product_rx)
            .await
            .expect("Expected Product Create");
        assert_eq!(fields.categories, BTreeSet::from([create_category()]));
        responder.send(Ok(Product::from_fields(7, fields))).unwrap();

        let dto = task.await.unwrap().unwrap();
        assert_eq!(dto.id, 7);
        assert_eq!(dto.name, create_product_dto().name);
    }

    #[tokio::test]
    async fn test_insert_with_unknown_category_never_reaches_the_store() {
        let (service, mut product_rx) = service().await;
        let mut dto = create_product_dto();
        dto.categories.push(CategoryDTO::new(99, "Ghost"));

        let result = service.insert(dto).await;

        assert_eq!(result, Err(ProductError::NotFound("category 99".to_string())));
        assert!(product_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_insert_with_negative_price_is_a_validation_error() {
        let (service, mut product_rx) = service().await;
        let mut dto = create_product_dto();
        dto.price = Decimal::new(-5, 0);

        let result = service.insert(dto).await;

        assert!(matches!(result, Err(ProductError::Validation(_))));
        assert!(product_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_update_returns_dto_when_id_exists() {
        let (service, mut product_rx) = service().await;

        let task = tokio::spawn(async move { service.update(EXISTING_ID, create_product_dto()).await });

        let (id, responder) = expect_reference(&mut product_rx).await.expect("Expected Reference");
        assert_eq!(id, EXISTING_ID);
        responder.send(Ok(EntityRef::new(id))).unwrap();

        let (reference, fields, responder) = expect_update(&mut product_rx).await.expect("Expected Update");
        assert_eq!(*reference.id(), EXISTING_ID);
        responder.send(Ok(Product::from_fields(EXISTING_ID, fields))).unwrap();

        let dto = task.await.unwrap().unwrap();
        assert_eq!(dto.id, EXISTING_ID);
    }

    #[tokio::test]
    async fn test_update_fails_with_not_found_when_id_does_not_exist() {
        let (service, mut product_rx) = service().await;

        let task = tokio::spawn(async move { service.update(NON_EXISTING_ID, create_product_dto()).await });

        let (id, responder) = expect_reference(&mut product_rx).await.expect("Expected Reference");
        responder.send(Err(FrameworkError::NotFound(id.to_string()))).unwrap();

        assert_eq!(
            task.await.unwrap(),
            Err(ProductError::NotFound(NON_EXISTING_ID.to_string()))
        );
        assert!(product_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_delete_does_nothing_when_id_exists() {
        let (service, mut product_rx) = service().await;

        let task = tokio::spawn(async move { service.delete(EXISTING_ID).await });

        let (id, responder) = expect_delete(&mut product_rx).await.expect("Expected Delete");
        assert_eq!(id, EXISTING_ID);
        responder.send(Ok(())).unwrap();

        assert_eq!(task.await.unwrap(), Ok(()));
        assert!(product_rx.try_recv().is_err(), "exactly one deletion request");
    }

    #[tokio::test]
    async fn test_delete_fails_with_not_found_when_id_does_not_exist() {
        let (service, mut product_rx) = service().await;

        let task = tokio::spawn(async move { service.delete(NON_EXISTING_ID).await });

        let (id, responder) = expect_delete(&mut product_rx).await.expect("Expected Delete");
        responder.send(Err(FrameworkError::NotFound(id.to_string()))).unwrap();

        assert_eq!(
            task.await.unwrap(),
            Err(ProductError::NotFound(NON_EXISTING_ID.to_string()))
        );
        assert!(product_rx.try_recv().is_err(), "exactly one deletion request");
    }

    #[tokio::test]
    async fn test_delete_fails_with_conflict_when_id_is_dependent() {
        let (service, mut product_rx) = service().await;

        let task = tokio::spawn(async move { service.delete(DEPENDENT_ID).await });

        let (id, responder) = expect_delete(&mut product_rx).await.expect("Expected Delete");
        responder
            .send(Err(FrameworkError::IntegrityViolation { id: id.to_string(), holds: 1 }))
            .unwrap();

        assert!(matches!(task.await.unwrap(), Err(ProductError::Conflict(_))));
        assert!(product_rx.try_recv().is_err(), "exactly one deletion request");
    }

    #[tokio::test]
    async fn test_delete_rejected_by_store_is_a_validation_error() {
        let (service, mut product_rx) = service().await;

        let task = tokio::spawn(async move { service.delete(EXISTING_ID).await });

        let (_, responder) = expect_delete(&mut product_rx).await.expect("Expected Delete");
        responder.send(Err(FrameworkError::Rejected("locked".to_string()))).unwrap();

        assert_eq!(task.await.unwrap(), Err(ProductError::Validation("locked".to_string())));
        assert!(product_rx.try_recv().is_err(), "exactly one deletion request");
    }

    #[tokio::test]
    async fn test_closed_store_surfaces_as_communication_error() {
        let (service, product_rx) = service().await;
        drop(product_rx);

        let result = service.delete(EXISTING_ID).await;

        assert!(matches!(result, Err(ProductError::ActorCommunicationError(_))));
    }
}
