use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::category::{Category, CategoryDTO};

/// Represents a product in the catalog.
///
/// Categories are stored as resolved id/name pairs; a product write never
/// creates categories, it only links existing ones.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub img_url: String,
    pub date: DateTime<Utc>,
    pub categories: BTreeSet<Category>,
}

impl Product {
    pub fn from_fields(id: u64, fields: ProductFields) -> Self {
        Self {
            id,
            name: fields.name,
            description: fields.description,
            price: fields.price,
            img_url: fields.img_url,
            date: fields.date,
            categories: fields.categories,
        }
    }

    /// Overwrites every field except the identifier.
    pub fn apply(&mut self, fields: ProductFields) {
        self.name = fields.name;
        self.description = fields.description;
        self.price = fields.price;
        self.img_url = fields.img_url;
        self.date = fields.date;
        self.categories = fields.categories;
    }

    pub fn has_category(&self, category_id: u64) -> bool {
        self.categories.iter().any(|category| category.id == category_id)
    }
}

/// Every writable product field, with categories already resolved.
///
/// Used both to create a product and to overwrite an existing one.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFields {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub img_url: String,
    pub date: DateTime<Utc>,
    pub categories: BTreeSet<Category>,
}

impl ProductFields {
    pub fn from_dto(dto: ProductDTO, categories: BTreeSet<Category>) -> Self {
        Self {
            name: dto.name,
            description: dto.description,
            price: dto.price,
            img_url: dto.img_url,
            date: dto.date,
            categories,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        validate_product(&self.name, self.price)
    }
}

pub fn validate_product(name: &str, price: Decimal) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("name is required".to_string());
    }
    if price < Decimal::ZERO {
        return Err(format!("price must not be negative, got {price}"));
    }
    Ok(())
}

/// Criteria for a paged product listing.
///
/// An empty category set means "any category"; otherwise a product matches
/// when it belongs to at least one of them. The name is matched as a
/// case-insensitive substring, so an empty name matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub category_ids: BTreeSet<u64>,
    name: String,
}

impl ProductFilter {
    pub fn new(category_ids: impl IntoIterator<Item = u64>, name: &str) -> Self {
        Self {
            category_ids: category_ids.into_iter().collect(),
            name: name.trim().to_lowercase(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Boundary shape of a product: its fields plus minimal category pairs.
///
/// The id is ignored on insert and update; the store owns identifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDTO {
    #[serde(default)]
    pub id: u64,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub img_url: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub categories: Vec<CategoryDTO>,
}

impl From<&Product> for ProductDTO {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            img_url: product.img_url.clone(),
            date: product.date,
            categories: product.categories.iter().map(CategoryDTO::from).collect(),
        }
    }
}

impl From<Product> for ProductDTO {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            img_url: product.img_url,
            date: product.date,
            categories: product.categories.into_iter().map(CategoryDTO::from).collect(),
        }
    }
}
