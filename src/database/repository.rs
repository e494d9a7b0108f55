use sqlx::PgConnection;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::Entity;

/// Typed read access to the table behind an entity.
pub struct Repository<T> {
    _phantom: std::marker::PhantomData<fn() -> T>,
}

impl<T: Entity> Repository<T> {
    pub fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }

    /// `SELECT` of every declared column, with no filter, order or limit.
    pub fn select_all_sql() -> String {
        let columns = T::COLUMNS
            .iter()
            .map(|c| DatabaseManager::quote_identifier(c))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "SELECT {} FROM {}",
            columns,
            DatabaseManager::quote_identifier(T::TABLE)
        )
    }

    pub async fn select_all(&self, conn: &mut PgConnection) -> Result<Vec<T>, DatabaseError> {
        let sql = Self::select_all_sql();
        let rows = sqlx::query_as::<_, T>(&sql).fetch_all(conn).await?;
        Ok(rows)
    }
}

impl<T: Entity> Default for Repository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{Country, Installation};

    #[test]
    fn select_all_lists_declared_columns() {
        assert_eq!(
            Repository::<Country>::select_all_sql(),
            r#"SELECT "id", "name", "region" FROM "country""#
        );
    }

    #[test]
    fn select_all_has_no_filter_or_limit() {
        let sql = Repository::<Installation>::select_all_sql();
        assert!(sql.ends_with(r#"FROM "installation""#));
        assert!(!sql.contains("WHERE"));
        assert!(!sql.contains("LIMIT"));
        assert!(sql.contains(r#""installation_date""#));
    }
}
