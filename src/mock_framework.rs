//! # Mock Framework
//!
//! Utilities for testing services in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_get`] or [`expect_delete`] to assert what the
//! service asked the store for, and reply with whatever outcome the test needs.

use tokio::sync::mpsc;

use crate::actor_framework::{Entity, EntityRef, FrameworkError, ResourceClient, ResourceRequest};
use crate::pagination::{Page, PageRequest};

type Responder<R> = tokio::sync::oneshot::Sender<Result<R, FrameworkError>>;

/// Creates a mock client and a receiver for asserting requests.
///
/// Instead of a running `ResourceActor`, the client's requests land on a
/// channel owned by the test. Replies are scripted per request, which makes
/// store failures (missing rows, integrity violations) deterministic. A
/// `try_recv` on the receiver after the call shows no further request was sent.
pub fn create_mock_client<T: Entity>(buffer_size: usize) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::CreateParams, Responder<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Responder<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Reference request
pub async fn expect_reference<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Responder<EntityRef<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Reference { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Update request
pub async fn expect_update<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(EntityRef<T>, T::Update, Responder<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update { reference, update, respond_to }) => Some((reference, update, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Delete request
pub async fn expect_delete<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Responder<()>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Delete { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Retain request
pub async fn expect_retain<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Responder<()>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Retain { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Release request
pub async fn expect_release<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Responder<()>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Release { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a FindPaged request
pub async fn expect_find_paged<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Filter, PageRequest, Responder<Page<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::FindPaged { filter, page, respond_to }) => Some((filter, page, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, CategoryCreate};

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<Category>(10);

        let create_task = tokio::spawn(async move {
            let category = CategoryCreate { name: "Books".to_string() };
            client.create(category).await
        });

        let (params, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(params.name, "Books");
        responder.send(Ok(Category::new(1, "Books"))).unwrap();

        let result = create_task.await.unwrap();
        assert_eq!(result, Ok(Category::new(1, "Books")));
    }

    #[tokio::test]
    async fn test_unexpected_request_yields_none() {
        let (client, mut receiver) = create_mock_client::<Category>(10);

        let task = tokio::spawn(async move { client.list().await });

        assert!(expect_get(&mut receiver).await.is_none());
        // the List responder was dropped unanswered
        assert_eq!(task.await.unwrap(), Err(FrameworkError::ActorDropped));
    }
}
