use axum::{
    extract::{Extension, Path, State},
    response::Json,
};
use serde::{Deserialize, Serialize};

use crate::database::Record;
use crate::error::ApiError;
use crate::middleware::AuthSubject;
use crate::routes::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableNames {
    pub table_names: Vec<String>,
}

/// GET /all-tables - table names from the live schema
pub async fn all_tables(
    State(state): State<AppState>,
    Extension(AuthSubject(subject)): Extension<AuthSubject>,
) -> Result<Json<TableNames>, ApiError> {
    let table_names = state.tables.list_tables().await?;
    tracing::debug!("{} listed {} tables", subject, table_names.len());
    Ok(Json(TableNames { table_names }))
}

/// GET /:table_name - every row of one table
///
/// The name is checked against the live table list before any rows are
/// read; unknown names get a 404.
pub async fn table_data(
    State(state): State<AppState>,
    Path(table_name): Path<String>,
    Extension(AuthSubject(subject)): Extension<AuthSubject>,
) -> Result<Json<Vec<Record>>, ApiError> {
    read_table(&state, &table_name, &subject).await
}

/// GET /token - the login path only answers POST, so a GET reads a table
/// named `token` like any other name.
pub async fn token_table(
    State(state): State<AppState>,
    Extension(AuthSubject(subject)): Extension<AuthSubject>,
) -> Result<Json<Vec<Record>>, ApiError> {
    read_table(&state, "token", &subject).await
}

async fn read_table(
    state: &AppState,
    table_name: &str,
    subject: &str,
) -> Result<Json<Vec<Record>>, ApiError> {
    let table_names = state.tables.list_tables().await?;
    if !table_names.iter().any(|name| name == table_name) {
        return Err(ApiError::table_not_found(table_name));
    }

    let rows = state.tables.fetch(table_name).await?;
    tracing::debug!("{} read {} rows from {}", subject, rows.len(), table_name);
    Ok(Json(rows))
}
