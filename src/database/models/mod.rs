pub mod country;
pub mod customer;
pub mod installation;
pub mod product;
pub mod product_category;

pub use country::Country;
pub use customer::Customer;
pub use installation::Installation;
pub use product::Product;
pub use product_category::ProductCategory;

use serde::Serialize;
use sqlx::{postgres::PgRow, FromRow};

/// A persistent record shape: one row of a named table.
pub trait Entity: for<'r> FromRow<'r, PgRow> + Serialize + Send + Unpin + 'static {
    /// Table the rows live in
    const TABLE: &'static str;
    /// Columns selected, in declaration order
    const COLUMNS: &'static [&'static str];
}
