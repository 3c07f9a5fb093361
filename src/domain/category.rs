use serde::{Deserialize, Serialize};

/// A catalog category. Products reference categories, never the reverse.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Category {
    pub id: u64,
    pub name: String,
}

impl Category {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }
}

/// Payload for creating a new category.
#[derive(Debug, Clone)]
pub struct CategoryCreate {
    pub name: String,
}

/// Boundary shape of a category. The id is ignored on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDTO {
    #[serde(default)]
    pub id: u64,
    pub name: String,
}

impl CategoryDTO {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }
}

impl From<&Category> for CategoryDTO {
    fn from(category: &Category) -> Self {
        Self::new(category.id, category.name.clone())
    }
}

impl From<Category> for CategoryDTO {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
        }
    }
}
