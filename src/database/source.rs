use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::database::catalog::SchemaCatalog;
use crate::database::manager::DatabaseError;
use crate::database::reader::TableReader;
use crate::database::registry::{Record, TableRegistry};

/// Where the HTTP layer gets table names and rows from.
#[async_trait]
pub trait TableSource: Send + Sync {
    /// Current table names, re-read on every call
    async fn list_tables(&self) -> Result<Vec<String>, DatabaseError>;

    /// All rows of one table
    async fn fetch(&self, table_name: &str) -> Result<Vec<Record>, DatabaseError>;
}

/// PostgreSQL-backed source: live catalog plus registry-driven reader.
#[derive(Debug, Clone)]
pub struct PgTableSource {
    catalog: SchemaCatalog,
    reader: TableReader,
}

impl PgTableSource {
    pub fn new(pool: PgPool, registry: Arc<TableRegistry>) -> Self {
        Self {
            catalog: SchemaCatalog::new(pool.clone()),
            reader: TableReader::new(pool, registry),
        }
    }
}

#[async_trait]
impl TableSource for PgTableSource {
    async fn list_tables(&self) -> Result<Vec<String>, DatabaseError> {
        self.catalog.list_tables().await
    }

    async fn fetch(&self, table_name: &str) -> Result<Vec<Record>, DatabaseError> {
        self.reader.fetch(table_name).await
    }
}
