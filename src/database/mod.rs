pub mod catalog;
pub mod manager;
pub mod models;
pub mod reader;
pub mod registry;
pub mod repository;
pub mod source;

pub use catalog::SchemaCatalog;
pub use manager::{DatabaseError, DatabaseManager};
pub use reader::TableReader;
pub use registry::{Record, TableRegistry, TableShape};
pub use source::{PgTableSource, TableSource};
