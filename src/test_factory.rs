//! Canned catalog rows for tests.

use std::collections::BTreeSet;

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::domain::{Category, Product, ProductDTO};

pub fn create_category() -> Category {
    Category::new(2, "Electronics")
}

pub fn product_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 7, 13, 20, 50, 7).unwrap()
}

pub fn create_product(id: u64) -> Product {
    Product {
        id,
        name: "Phone".to_string(),
        description: "Good Phone".to_string(),
        price: Decimal::new(80000, 2),
        img_url: "https://img.com/img.png".to_string(),
        date: product_date(),
        categories: BTreeSet::from([create_category()]),
    }
}

/// Insert payload for the factory product, linked to the factory category.
pub fn create_product_dto() -> ProductDTO {
    ProductDTO::from(create_product(0))
}
