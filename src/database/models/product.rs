use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::Entity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i32,
    pub reference: String,
    pub name: String,
    /// References product_category.id
    pub category_id: i32,
    // Stored as text upstream, kept verbatim.
    pub price: String,
}

impl Entity for Product {
    const TABLE: &'static str = "product";
    const COLUMNS: &'static [&'static str] = &["id", "reference", "name", "category_id", "price"];
}
