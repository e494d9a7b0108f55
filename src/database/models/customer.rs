use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::Entity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Customer {
    pub id: i32,
    pub name: String,
    pub email: String,
    /// References country.id
    pub country_id: i32,
    pub premium_customer: String,
}

impl Entity for Customer {
    const TABLE: &'static str = "customer";
    const COLUMNS: &'static [&'static str] =
        &["id", "name", "email", "country_id", "premium_customer"];
}
