use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::Entity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Country {
    pub id: i32,
    pub name: String,
    pub region: String,
}

impl Entity for Country {
    const TABLE: &'static str = "country";
    const COLUMNS: &'static [&'static str] = &["id", "name", "region"];
}
