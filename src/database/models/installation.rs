use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::Entity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Installation {
    pub id: i32,
    pub name: String,
    pub description: String,
    /// References product.id
    pub product_id: i32,
    /// References customer.id
    pub customer_id: i32,
    pub installation_date: NaiveDate,
}

impl Entity for Installation {
    const TABLE: &'static str = "installation";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "description",
        "product_id",
        "customer_id",
        "installation_date",
    ];
}
