use tracing::{debug, info, instrument, warn};

use crate::actor_framework::ResourceClient;
use crate::domain::{FieldMessage, User, UserCreate, UserDTO, UserFilter, UserInsertDTO, UserPatch};
use crate::user_actor::{validate_insert, UserError};

/// User service: sign-up with validation and profile lookups.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl_basic_client!(UserClient, User, UserDTO, UserError);

impl UserClient {
    /// Registers a user after checking every sign-up rule.
    ///
    /// All failed rules are reported together. The uniqueness check and the
    /// insert are two store requests, so two concurrent sign-ups with the same
    /// e-mail can both pass.
    #[instrument(fields(user_email = %dto.user.email), skip(self, dto))]
    pub async fn insert(&self, dto: UserInsertDTO) -> Result<UserDTO, UserError> {
        let email_taken = self.find_by_email(&dto.user.email).await?.is_some();
        let errors = validate_insert(&dto, email_taken);
        if !errors.is_empty() {
            warn!(failed = errors.len(), "User validation failed");
            return Err(UserError::Validation(errors));
        }

        let user = self.inner.create(UserCreate::from(dto)).await?;
        info!(user_id = user.id, "User created successfully");
        Ok(user.into())
    }

    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserDTO>, UserError> {
        debug!("Sending request");
        let mut users = self.inner.find(UserFilter::by_email(email)).await?;
        Ok(users.pop().map(UserDTO::from))
    }

    /// Changes the user's names. The e-mail and password are left alone.
    #[instrument(skip(self))]
    pub async fn update(&self, id: u64, patch: UserPatch) -> Result<UserDTO, UserError> {
        if patch.first_name.as_deref().is_some_and(|name| name.trim().is_empty()) {
            return Err(UserError::Validation(vec![FieldMessage::new("firstName", "Required field")]));
        }
        let reference = self.inner.reference(id).await?;
        let user = self.inner.update(reference, patch).await?;
        info!("User updated successfully");
        Ok(user.into())
    }
}
