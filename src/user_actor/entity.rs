use crate::actor_framework::Entity;
use crate::domain::{User, UserCreate, UserFilter, UserPatch};

impl Entity for User {
    type Id = u64;
    type CreateParams = UserCreate;
    type Update = UserPatch;
    type Filter = UserFilter;

    fn id(&self) -> &u64 {
        &self.id
    }

    fn from_create_params(id: u64, params: UserCreate) -> Result<Self, String> {
        Ok(Self {
            id,
            first_name: params.first_name,
            last_name: params.last_name,
            email: params.email,
            password: params.password,
        })
    }

    fn on_update(&mut self, patch: UserPatch) -> Result<(), String> {
        if let Some(first_name) = patch.first_name {
            if first_name.trim().is_empty() {
                return Err("first name is required".to_string());
            }
            self.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            self.last_name = last_name;
        }
        Ok(())
    }

    fn matches(&self, filter: &UserFilter) -> bool {
        filter
            .email()
            .map_or(true, |email| self.email.to_lowercase() == email)
    }
}
