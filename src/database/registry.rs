use futures::future::BoxFuture;
use serde::Serialize;
use serde_json::Value;
use sqlx::PgConnection;
use std::collections::HashMap;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    Country, Customer, Entity, Installation, Product, ProductCategory,
};
use crate::database::repository::Repository;

/// A fetched row, serialized to a JSON object keyed by column name.
pub type Record = Value;

type Loader = for<'c> fn(&'c mut PgConnection) -> BoxFuture<'c, Result<Vec<Record>, DatabaseError>>;

/// Descriptor of one record shape: table, columns and a typed row loader.
#[derive(Clone, Copy)]
pub struct TableShape {
    pub name: &'static str,
    pub columns: &'static [&'static str],
    loader: Loader,
}

impl TableShape {
    pub fn of<T: Entity>() -> Self {
        Self {
            name: T::TABLE,
            columns: T::COLUMNS,
            loader: load_all::<T>,
        }
    }

    /// Read every row of the table through its typed entity.
    pub fn load<'c>(
        &self,
        conn: &'c mut PgConnection,
    ) -> BoxFuture<'c, Result<Vec<Record>, DatabaseError>> {
        (self.loader)(conn)
    }
}

impl std::fmt::Debug for TableShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableShape")
            .field("name", &self.name)
            .field("columns", &self.columns)
            .finish()
    }
}

fn load_all<T: Entity>(conn: &mut PgConnection) -> BoxFuture<'_, Result<Vec<Record>, DatabaseError>> {
    Box::pin(async move {
        let rows = Repository::<T>::new().select_all(conn).await?;
        rows.iter().map(to_record).collect()
    })
}

/// Serialize one typed row. Keys keep the entity's field order.
fn to_record<T: Serialize>(row: &T) -> Result<Record, DatabaseError> {
    Ok(serde_json::to_value(row)?)
}

/// Static mapping from table name to record shape, built once at startup.
#[derive(Debug, Clone, Default)]
pub struct TableRegistry {
    shapes: HashMap<&'static str, TableShape>,
}

impl TableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry of every declared entity.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register::<Country>();
        registry.register::<Customer>();
        registry.register::<Installation>();
        registry.register::<Product>();
        registry.register::<ProductCategory>();
        registry
    }

    pub fn register<T: Entity>(&mut self) {
        self.shapes.insert(T::TABLE, TableShape::of::<T>());
    }

    pub fn get(&self, table_name: &str) -> Result<&TableShape, DatabaseError> {
        self.shapes
            .get(table_name)
            .ok_or_else(|| DatabaseError::Unmapped(table_name.to_string()))
    }

    pub fn contains(&self, table_name: &str) -> bool {
        self.shapes.contains_key(table_name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.shapes.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
