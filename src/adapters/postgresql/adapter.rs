//! PostgreSQL implementation of the key-value store trait
//!
//! Each logical table is a two-column table `(id TEXT PRIMARY KEY, doc JSONB)`.
//! Table names come from validated configuration and are always quoted.

use crate::adapters::database::traits::{document_id, KeyValueStore, ScanFilter};
use crate::adapters::postgresql::client::PostgresClient;
use crate::domain::{Result, StoreError};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tokio_postgres::Row;

/// PostgreSQL document store
pub struct PostgresStore {
    client: Arc<PostgresClient>,
}

impl PostgresStore {
    /// Create a new store over a client
    pub fn new(client: PostgresClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

fn quote_ident(table: &str) -> String {
    format!("\"{}\"", table.replace('"', "\"\""))
}

fn row_document(row: &Row) -> Result<Value> {
    row.try_get::<_, Value>(0)
        .map_err(|e| StoreError::InvalidDocument(format!("Unreadable doc column: {e}")).into())
}

fn create_table_sql(table: &str) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {} (id TEXT PRIMARY KEY, doc JSONB NOT NULL)",
        quote_ident(table)
    )
}

fn upsert_sql(table: &str) -> String {
    format!(
        "INSERT INTO {} (id, doc) VALUES ($1, $2) \
         ON CONFLICT (id) DO UPDATE SET doc = EXCLUDED.doc",
        quote_ident(table)
    )
}

fn batch_upsert_sql(table: &str) -> String {
    format!(
        "INSERT INTO {} (id, doc) \
         SELECT x ->> '_id', x FROM jsonb_array_elements($1::jsonb) AS x \
         ON CONFLICT (id) DO UPDATE SET doc = EXCLUDED.doc",
        quote_ident(table)
    )
}

fn scan_sql(table: &str, filtered: bool) -> String {
    if filtered {
        format!(
            "SELECT doc FROM {} WHERE doc -> $1::text = $2::jsonb ORDER BY id",
            quote_ident(table)
        )
    } else {
        format!("SELECT doc FROM {} ORDER BY id", quote_ident(table))
    }
}

#[async_trait]
impl KeyValueStore for PostgresStore {
    async fn test_connection(&self) -> Result<()> {
        self.client.test_connection().await
    }

    async fn ensure_table_exists(&self, table: &str) -> Result<()> {
        self.client
            .execute(&create_table_sql(table), &[], StoreError::TableCreationFailed)
            .await?;
        tracing::debug!(table, "Table ready");
        Ok(())
    }

    async fn put_item(&self, table: &str, item: Value) -> Result<()> {
        let id = document_id(&item)?.to_string();
        self.client
            .execute(&upsert_sql(table), &[&id, &item], StoreError::WriteFailed)
            .await?;
        Ok(())
    }

    async fn get_item(&self, table: &str, id: &str) -> Result<Option<Value>> {
        let sql = format!("SELECT doc FROM {} WHERE id = $1", quote_ident(table));
        let rows = self.client.query(&sql, &[&id], StoreError::ReadFailed).await?;
        rows.first().map(row_document).transpose()
    }

    async fn delete_item(&self, table: &str, id: &str) -> Result<()> {
        let sql = format!("DELETE FROM {} WHERE id = $1", quote_ident(table));
        self.client
            .execute(&sql, &[&id], StoreError::DeleteFailed)
            .await?;
        Ok(())
    }

    async fn scan(&self, table: &str, filter: Option<&ScanFilter>) -> Result<Vec<Value>> {
        let rows = match filter {
            Some(f) => {
                self.client
                    .query(
                        &scan_sql(table, true),
                        &[&f.attribute, &f.equals],
                        StoreError::ScanFailed,
                    )
                    .await?
            }
            None => {
                self.client
                    .query(&scan_sql(table, false), &[], StoreError::ScanFailed)
                    .await?
            }
        };

        tracing::debug!(table, rows = rows.len(), filtered = filter.is_some(), "Scan complete");
        rows.iter().map(row_document).collect()
    }

    async fn batch_write(&self, table: &str, items: Vec<Value>) -> Result<()> {
        if items.is_empty() {
            return Ok(());
        }
        for item in &items {
            document_id(item)?;
        }

        // One statement per page, so the page commits or fails as a unit
        let page = Value::Array(items);
        self.client
            .execute(&batch_upsert_sql(table), &[&page], StoreError::WriteFailed)
            .await?;
        Ok(())
    }

    async fn batch_delete(&self, table: &str, ids: Vec<String>) -> Result<usize> {
        if ids.is_empty() {
            return Ok(0);
        }
        let sql = format!("DELETE FROM {} WHERE id = ANY($1)", quote_ident(table));
        let removed = self
            .client
            .execute(&sql, &[&ids], StoreError::DeleteFailed)
            .await?;
        Ok(removed as usize)
    }

    fn store_name(&self) -> &str {
        "postgresql"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_ident() {
        assert_eq!(quote_ident("raffles"), "\"raffles\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn test_statements_target_quoted_table() {
        assert_eq!(
            create_table_sql("raffle_tickets"),
            "CREATE TABLE IF NOT EXISTS \"raffle_tickets\" (id TEXT PRIMARY KEY, doc JSONB NOT NULL)"
        );
        assert!(upsert_sql("raffles").starts_with("INSERT INTO \"raffles\""));
        assert!(batch_upsert_sql("raffles").contains("jsonb_array_elements($1::jsonb)"));
        assert!(scan_sql("raffle_tickets", true).contains("doc -> $1::text = $2::jsonb"));
        assert!(!scan_sql("raffle_tickets", false).contains("WHERE"));
    }
}
