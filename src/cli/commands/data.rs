use anyhow::Context;
use std::sync::Arc;

use crate::cli::{utils::output, OutputFormat};
use crate::config::DatabaseConfig;
use crate::database::{DatabaseManager, PgTableSource, Record, TableRegistry, TableSource};
use crate::handlers::protected::tables::TableNames;

fn table_source() -> anyhow::Result<(DatabaseManager, PgTableSource)> {
    let config = DatabaseConfig::from_env().context("failed to load database configuration")?;
    let database = DatabaseManager::connect_lazy(&config);
    let source = PgTableSource::new(database.pool().clone(), Arc::new(TableRegistry::standard()));
    Ok((database, source))
}

pub async fn tables(output_format: OutputFormat) -> anyhow::Result<()> {
    let (database, source) = table_source()?;
    let table_names = source.list_tables().await;
    database.close().await;

    let names = TableNames { table_names: table_names? };
    output(output_format, &names, || names.table_names.join("\n"))
}

pub async fn dump(table: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let (database, source) = table_source()?;
    let result: anyhow::Result<Vec<Record>> = async {
        let table_names = source.list_tables().await?;
        if !table_names.iter().any(|name| name == table) {
            anyhow::bail!("{} table does not exist.", table);
        }
        Ok(source.fetch(table).await?)
    }
    .await;
    database.close().await;

    let rows = result?;
    // Rows are JSON either way; text mode keeps one row per line.
    output(output_format, &rows, || {
        rows.iter()
            .map(|row| row.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    })
}
