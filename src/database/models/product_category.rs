use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::Entity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ProductCategory {
    pub id: i32,
    pub name: String,
}

impl Entity for ProductCategory {
    const TABLE: &'static str = "product_category";
    const COLUMNS: &'static [&'static str] = &["id", "name"];
}
