use std::collections::BTreeMap;
use std::fmt::{self, Debug, Display};
use std::marker::PhantomData;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

use crate::pagination::{Page, PageRequest};

// =============================================================================
// 1. THE ABSTRACTION (Traits with Hooks, Payloads, and Filters)
// =============================================================================

/// Trait that any domain entity must implement to be stored by a [`ResourceActor`].
pub trait Entity: Clone + Debug + Send + Sync + 'static {
    type Id: Ord + Clone + Send + Sync + Display + Debug;
    type CreateParams: Send + Sync + Debug;
    type Update: Send + Sync + Debug;
    type Filter: Send + Sync + Debug;

    /// Get the ID of the entity
    fn id(&self) -> &Self::Id;

    /// Construct the full Entity from the assigned ID and creation parameters
    fn from_create_params(id: Self::Id, params: Self::CreateParams) -> Result<Self, String>;

    // --- Lifecycle Hooks ---

    fn on_create(&mut self) -> Result<(), String> {
        Ok(())
    }
    fn on_update(&mut self, update: Self::Update) -> Result<(), String>;
    fn on_delete(&self) -> Result<(), String> {
        Ok(())
    }

    /// Whether this row belongs in the result of a filtered query.
    fn matches(&self, _filter: &Self::Filter) -> bool {
        true
    }
}

/// Lightweight handle to a stored row.
///
/// Carries only the identifier. Obtaining one proves the row existed when the
/// reference was issued; an update through it still fails if the row has been
/// deleted since.
pub struct EntityRef<T: Entity> {
    id: T::Id,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> EntityRef<T> {
    pub fn new(id: T::Id) -> Self {
        Self { id, _entity: PhantomData }
    }

    pub fn id(&self) -> &T::Id {
        &self.id
    }
}

impl<T: Entity> Clone for EntityRef<T> {
    fn clone(&self) -> Self {
        Self::new(self.id.clone())
    }
}

impl<T: Entity> Debug for EntityRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EntityRef").field(&self.id).finish()
    }
}

/// Failures reported by a store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FrameworkError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Item {id} is still referenced ({holds} holds)")]
    IntegrityViolation { id: String, holds: usize },
    #[error("Rejected: {0}")]
    Rejected(String),
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped the response")]
    ActorDropped,
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        params: T::CreateParams,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Reference {
        id: T::Id,
        respond_to: Response<EntityRef<T>>,
    },
    Update {
        reference: EntityRef<T>,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Retain {
        id: T::Id,
        respond_to: Response<()>,
    },
    Release {
        id: T::Id,
        respond_to: Response<()>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Find {
        filter: T::Filter,
        respond_to: Response<Vec<T>>,
    },
    FindPaged {
        filter: T::Filter,
        page: PageRequest,
        respond_to: Response<Page<T>>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// A stored row plus the number of referential holds other rows keep on it.
struct Row<T> {
    item: T,
    holds: usize,
}

/// Owns one table of entities and serves requests one at a time.
pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    rows: BTreeMap<T::Id, Row<T>>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            rows: BTreeMap::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        (actor, ResourceClient::new(sender))
    }

    #[instrument(name = "resource_actor", skip(self), fields(entity = std::any::type_name::<T>()))]
    pub async fn run(mut self) {
        info!("Store starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    let _ = respond_to.send(self.handle_create(params));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.rows.get(&id).map(|row| row.item.clone());
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Reference { id, respond_to } => {
                    let result = if self.rows.contains_key(&id) {
                        Ok(EntityRef::new(id))
                    } else {
                        Err(FrameworkError::NotFound(id.to_string()))
                    };
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Update { reference, update, respond_to } => {
                    let _ = respond_to.send(self.handle_update(reference, update));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    let _ = respond_to.send(self.handle_delete(id));
                }
                ResourceRequest::Retain { id, respond_to } => {
                    let result = match self.rows.get_mut(&id) {
                        Some(row) => {
                            row.holds += 1;
                            Ok(())
                        }
                        None => Err(FrameworkError::NotFound(id.to_string())),
                    };
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Release { id, respond_to } => {
                    let _ = respond_to.send(self.handle_release(id));
                }
                ResourceRequest::List { respond_to } => {
                    let items = self.rows.values().map(|row| row.item.clone()).collect();
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Find { filter, respond_to } => {
                    let items = self
                        .rows
                        .values()
                        .filter(|row| row.item.matches(&filter))
                        .map(|row| row.item.clone())
                        .collect();
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::FindPaged { filter, page, respond_to } => {
                    let _ = respond_to.send(Ok(self.handle_find_paged(&filter, page)));
                }
            }
        }
        info!(rows = self.rows.len(), "Store stopped");
    }

    fn handle_create(&mut self, params: T::CreateParams) -> Result<T, FrameworkError> {
        let id = (self.next_id_fn)();
        let mut item = T::from_create_params(id, params).map_err(FrameworkError::Rejected)?;
        item.on_create().map_err(FrameworkError::Rejected)?;
        debug!(id = %item.id(), "Row inserted");
        self.rows.insert(item.id().clone(), Row { item: item.clone(), holds: 0 });
        Ok(item)
    }

    fn handle_update(&mut self, reference: EntityRef<T>, update: T::Update) -> Result<T, FrameworkError> {
        let row = self
            .rows
            .get_mut(reference.id())
            .ok_or_else(|| FrameworkError::NotFound(reference.id().to_string()))?;

        // Hooks work on a copy so a rejected update leaves the row untouched.
        let mut updated = row.item.clone();
        updated.on_update(update).map_err(FrameworkError::Rejected)?;
        row.item = updated.clone();
        debug!(id = %reference.id(), "Row updated");
        Ok(updated)
    }

    fn handle_delete(&mut self, id: T::Id) -> Result<(), FrameworkError> {
        let row = self
            .rows
            .get(&id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        if row.holds > 0 {
            warn!(id = %id, holds = row.holds, "Delete blocked by existing references");
            return Err(FrameworkError::IntegrityViolation {
                id: id.to_string(),
                holds: row.holds,
            });
        }
        row.item.on_delete().map_err(FrameworkError::Rejected)?;
        self.rows.remove(&id);
        debug!(id = %id, "Row deleted");
        Ok(())
    }

    fn handle_release(&mut self, id: T::Id) -> Result<(), FrameworkError> {
        let row = self
            .rows
            .get_mut(&id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        if row.holds == 0 {
            warn!(id = %id, "Release without a matching retain");
        } else {
            row.holds -= 1;
        }
        Ok(())
    }

    fn handle_find_paged(&self, filter: &T::Filter, page: PageRequest) -> Page<T> {
        let rows = &self.rows;
        let matching = move || rows.values().filter(move |row| row.item.matches(filter));
        let total = matching().count();
        let content = matching()
            .skip(page.offset())
            .take(page.size as usize)
            .map(|row| row.item.clone())
            .collect();
        Page::new(content, page, total)
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Clone)]
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, params: T::CreateParams) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to }).await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to }).await
    }

    pub async fn reference(&self, id: T::Id) -> Result<EntityRef<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Reference { id, respond_to }).await
    }

    pub async fn update(&self, reference: EntityRef<T>, update: T::Update) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update { reference, update, respond_to })
            .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to }).await
    }

    /// Adds a referential hold; a held row refuses deletion.
    pub async fn retain(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Retain { id, respond_to }).await
    }

    pub async fn release(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Release { id, respond_to }).await
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List { respond_to }).await
    }

    pub async fn find(&self, filter: T::Filter) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Find { filter, respond_to }).await
    }

    pub async fn find_paged(&self, filter: T::Filter, page: PageRequest) -> Result<Page<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::FindPaged { filter, page, respond_to })
            .await
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================
