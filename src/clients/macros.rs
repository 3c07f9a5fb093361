/// Generates `new(inner)` for a client wrapping a single store.
macro_rules! impl_client_new {
    ($client_name:ident, $entity:ty) => {
        impl $client_name {
            pub fn new(inner: $crate::actor_framework::ResourceClient<$entity>) -> Self {
                Self { inner }
            }
        }
    };
}

/// Generates `find_by_id`, mapping the stored row to its DTO and a missing
/// row to the error's `NotFound` variant.
macro_rules! impl_find_by_id {
    ($client_name:ident, $dto:ty, $error:ident) => {
        impl $client_name {
            #[tracing::instrument(skip(self))]
            pub async fn find_by_id(&self, id: u64) -> Result<$dto, $error> {
                tracing::debug!("Sending request");
                match self.inner.get(id).await? {
                    Some(row) => Ok(<$dto>::from(row)),
                    None => Err($error::NotFound(id.to_string())),
                }
            }
        }
    };
}

macro_rules! impl_basic_client {
    ($client_name:ident, $entity:ty, $dto:ty, $error:ident) => {
        impl_client_new!($client_name, $entity);
        impl_find_by_id!($client_name, $dto, $error);
    };
}
