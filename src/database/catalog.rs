use sqlx::PgPool;

use crate::database::manager::DatabaseError;

/// Base tables of the connection's current schema, straight from the
/// database metadata.
const LIST_TABLES_SQL: &str = r#"
    SELECT table_name::text
    FROM information_schema.tables
    WHERE table_schema = current_schema()
    AND table_type = 'BASE TABLE'
    ORDER BY table_name
"#;

/// Live view of which tables exist. Every call re-reads the schema, so
/// tables created or dropped after startup show up immediately.
#[derive(Debug, Clone)]
pub struct SchemaCatalog {
    pool: PgPool,
}

impl SchemaCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_tables(&self) -> Result<Vec<String>, DatabaseError> {
        let names = sqlx::query_scalar::<_, String>(LIST_TABLES_SQL)
            .fetch_all(&self.pool)
            .await?;
        tracing::debug!("Schema catalog reflected {} tables", names.len());
        Ok(names)
    }
}
