use serde::{Deserialize, Serialize};

/// Represents a registered user in the catalog back office.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Payload for creating a new user.
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Payload for updating an existing user's profile.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Matches users by e-mail, ignoring case.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    email: Option<String>,
}

impl UserFilter {
    pub fn by_email(email: &str) -> Self {
        Self {
            email: Some(email.trim().to_lowercase()),
        }
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}

/// Boundary shape of a user. Never carries the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDTO {
    #[serde(default)]
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<&User> for UserDTO {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
        }
    }
}

impl From<User> for UserDTO {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
        }
    }
}

/// Sign-up payload: the public user fields plus the password.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInsertDTO {
    #[serde(flatten)]
    pub user: UserDTO,
    pub password: String,
}

impl From<UserInsertDTO> for UserCreate {
    fn from(dto: UserInsertDTO) -> Self {
        Self {
            first_name: dto.user.first_name,
            last_name: dto.user.last_name,
            email: dto.user.email.trim().to_string(),
            password: dto.password,
        }
    }
}

/// One failed validation rule, tied to the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMessage {
    pub field_name: String,
    pub message: String,
}

impl FieldMessage {
    pub fn new(field_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field_name, self.message)
    }
}
