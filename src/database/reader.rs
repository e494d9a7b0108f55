use sqlx::PgPool;
use std::sync::Arc;

use crate::database::manager::DatabaseError;
use crate::database::registry::{Record, TableRegistry};

/// Fetches every row of a registered table.
#[derive(Debug, Clone)]
pub struct TableReader {
    pool: PgPool,
    registry: Arc<TableRegistry>,
}

impl TableReader {
    pub fn new(pool: PgPool, registry: Arc<TableRegistry>) -> Self {
        Self { pool, registry }
    }

    /// Materialize all rows of `table_name`.
    ///
    /// Callers confirm the table exists in the live catalog first; a name
    /// that exists there but has no registered shape fails with `Unmapped`.
    pub async fn fetch(&self, table_name: &str) -> Result<Vec<Record>, DatabaseError> {
        let shape = self.registry.get(table_name)?;

        // Dropped at the end of scope, returning the connection to the pool
        // on success and on error alike.
        let mut conn = self.pool.acquire().await?;
        let rows = shape.load(&mut *conn).await?;

        tracing::debug!("Fetched {} rows from {}", rows.len(), shape.name);
        Ok(rows)
    }
}
