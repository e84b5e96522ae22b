//! In-memory key-value store
//!
//! Tables are ordered maps behind a single async lock, so each call
//! (including a whole batch) is applied atomically and scans return
//! documents in key order. Tables are created on first use.

use crate::adapters::database::traits::{document_id, KeyValueStore, ScanFilter};
use crate::domain::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

type Table = BTreeMap<String, Value>;

/// Process-local store used for development and tests
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<String, Table>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in `table`
    pub async fn len(&self, table: &str) -> usize {
        self.tables
            .read()
            .await
            .get(table)
            .map(BTreeMap::len)
            .unwrap_or(0)
    }

    /// Returns true if `table` holds no documents
    pub async fn is_empty(&self, table: &str) -> bool {
        self.len(table).await == 0
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn test_connection(&self) -> Result<()> {
        Ok(())
    }

    async fn ensure_table_exists(&self, table: &str) -> Result<()> {
        self.tables
            .write()
            .await
            .entry(table.to_string())
            .or_default();
        Ok(())
    }

    async fn put_item(&self, table: &str, item: Value) -> Result<()> {
        let id = document_id(&item)?.to_string();
        self.tables
            .write()
            .await
            .entry(table.to_string())
            .or_default()
            .insert(id, item);
        Ok(())
    }

    async fn get_item(&self, table: &str, id: &str) -> Result<Option<Value>> {
        Ok(self
            .tables
            .read()
            .await
            .get(table)
            .and_then(|t| t.get(id))
            .cloned())
    }

    async fn delete_item(&self, table: &str, id: &str) -> Result<()> {
        if let Some(t) = self.tables.write().await.get_mut(table) {
            t.remove(id);
        }
        Ok(())
    }

    async fn scan(&self, table: &str, filter: Option<&ScanFilter>) -> Result<Vec<Value>> {
        let tables = self.tables.read().await;
        let Some(t) = tables.get(table) else {
            return Ok(Vec::new());
        };

        Ok(t.values()
            .filter(|doc| filter.map_or(true, |f| f.matches(doc)))
            .cloned()
            .collect())
    }

    async fn batch_write(&self, table: &str, items: Vec<Value>) -> Result<()> {
        // Validate the whole page before touching the table
        let keyed = items
            .into_iter()
            .map(|item| Ok((document_id(&item)?.to_string(), item)))
            .collect::<Result<Vec<_>>>()?;

        let mut tables = self.tables.write().await;
        let t = tables.entry(table.to_string()).or_default();
        t.extend(keyed);
        Ok(())
    }

    async fn batch_delete(&self, table: &str, ids: Vec<String>) -> Result<usize> {
        let mut tables = self.tables.write().await;
        let Some(t) = tables.get_mut(table) else {
            return Ok(0);
        };

        Ok(ids.iter().filter(|id| t.remove(id.as_str()).is_some()).count())
    }

    fn store_name(&self) -> &str {
        "memory"
    }
}
