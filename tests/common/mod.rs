//! Shared fixtures for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tombola::adapters::database::{KeyValueStore, ScanFilter};
use tombola::adapters::memory::MemoryStore;
use tombola::domain::{Result, StoreError};

/// Memory store that fails chosen batch calls
///
/// Batch calls are numbered from 1 in the order they arrive.
pub struct FailingStore {
    pub inner: Arc<MemoryStore>,
    fail_writes: HashSet<usize>,
    fail_deletes: HashSet<usize>,
    fail_puts: bool,
    fail_scans: bool,
    fail_item_deletes: bool,
    writes: AtomicUsize,
    deletes: AtomicUsize,
}

impl FailingStore {
    pub fn new(inner: Arc<MemoryStore>) -> Self {
        Self {
            inner,
            fail_writes: HashSet::new(),
            fail_deletes: HashSet::new(),
            fail_puts: false,
            fail_scans: false,
            fail_item_deletes: false,
            writes: AtomicUsize::new(0),
            deletes: AtomicUsize::new(0),
        }
    }

    pub fn failing_writes(mut self, calls: &[usize]) -> Self {
        self.fail_writes.extend(calls);
        self
    }

    pub fn failing_deletes(mut self, calls: &[usize]) -> Self {
        self.fail_deletes.extend(calls);
        self
    }

    pub fn failing_puts(mut self) -> Self {
        self.fail_puts = true;
        self
    }

    pub fn failing_scans(mut self) -> Self {
        self.fail_scans = true;
        self
    }

    pub fn failing_item_deletes(mut self) -> Self {
        self.fail_item_deletes = true;
        self
    }
}

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn test_connection(&self) -> Result<()> {
        self.inner.test_connection().await
    }

    async fn ensure_table_exists(&self, table: &str) -> Result<()> {
        self.inner.ensure_table_exists(table).await
    }

    async fn put_item(&self, table: &str, item: Value) -> Result<()> {
        if self.fail_puts {
            return Err(StoreError::WriteFailed(format!("injected put failure on {table}")).into());
        }
        self.inner.put_item(table, item).await
    }

    async fn get_item(&self, table: &str, id: &str) -> Result<Option<Value>> {
        self.inner.get_item(table, id).await
    }

    async fn delete_item(&self, table: &str, id: &str) -> Result<()> {
        if self.fail_item_deletes {
            return Err(StoreError::DeleteFailed(format!("injected delete failure on {table}")).into());
        }
        self.inner.delete_item(table, id).await
    }

    async fn scan(&self, table: &str, filter: Option<&ScanFilter>) -> Result<Vec<Value>> {
        if self.fail_scans {
            return Err(StoreError::ScanFailed(format!("injected scan failure on {table}")).into());
        }
        self.inner.scan(table, filter).await
    }

    async fn batch_write(&self, table: &str, items: Vec<Value>) -> Result<()> {
        let call = self.writes.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_writes.contains(&call) {
            return Err(StoreError::Throttled(format!("injected failure on write {call}")).into());
        }
        self.inner.batch_write(table, items).await
    }

    async fn batch_delete(&self, table: &str, ids: Vec<String>) -> Result<usize> {
        let call = self.deletes.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_deletes.contains(&call) {
            return Err(StoreError::DeleteFailed(format!("injected failure on delete {call}")).into());
        }
        self.inner.batch_delete(table, ids).await
    }

    fn store_name(&self) -> &str {
        "failing-memory"
    }
}

pub fn raffle_body(digit_count: u32, total_children: u32) -> String {
    format!(
        r#"{{"name":"Charity draw","description":"Annual","digitCount":{digit_count},"totalChildren":{total_children},"maxSale":10,"price":5}}"#
    )
}

pub fn product_body(digit_count: u32, total_children: u32) -> String {
    format!(
        r#"{{"name":"Sneaker","digitCount":{digit_count},"totalChildren":{total_children},"price":"80.5","seller":"acme","category":"shoes","active":true}}"#
    )
}
