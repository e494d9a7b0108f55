// Endpoints behind the bearer middleware. Handlers can rely on an
// `AuthSubject` extension being present.
pub mod tables;

pub use tables::{all_tables, table_data, token_table};
