//! Key-value store abstraction
//!
//! This module defines the trait that storage adapters must implement
//! to work with Tombola.

use crate::domain::{Result, StoreError};
use async_trait::async_trait;
use serde_json::Value;

/// Attribute every stored document is keyed by
pub const ID_FIELD: &str = "_id";

/// Equality filter applied to a table scan
///
/// Filtering happens during the scan, so its cost is linear in the size of
/// the table, not in the number of matching items.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanFilter {
    /// Top-level document attribute to compare
    pub attribute: String,

    /// Value the attribute must equal
    pub equals: Value,
}

impl ScanFilter {
    /// Create an equality filter on `attribute`
    pub fn equals(attribute: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            attribute: attribute.into(),
            equals: value.into(),
        }
    }

    /// Returns true if `document` passes the filter
    pub fn matches(&self, document: &Value) -> bool {
        document.get(&self.attribute) == Some(&self.equals)
    }
}

/// Extracts the `_id` key of a document
///
/// # Errors
///
/// Returns `InvalidDocument` if the document is not an object with a
/// non-empty string `_id`.
pub fn document_id(document: &Value) -> Result<&str> {
    match document.get(ID_FIELD).and_then(Value::as_str) {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(StoreError::InvalidDocument(format!(
            "document has no string {ID_FIELD} attribute"
        ))
        .into()),
    }
}

/// Key-value store trait for parent and child tables
///
/// Every table holds JSON object documents keyed by their `_id` attribute.
/// Batch operations apply one page; a page either succeeds or fails as a
/// whole. Nothing spans pages.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Test the store connection
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached.
    async fn test_connection(&self) -> Result<()>;

    /// Ensure a table exists, creating it if necessary
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be created.
    async fn ensure_table_exists(&self, table: &str) -> Result<()>;

    /// Write a single document, replacing any document with the same `_id`
    async fn put_item(&self, table: &str, item: Value) -> Result<()>;

    /// Read a single document by `_id`
    ///
    /// # Returns
    ///
    /// Returns `Ok(None)` if no document has that key.
    async fn get_item(&self, table: &str, id: &str) -> Result<Option<Value>>;

    /// Delete a single document by `_id`
    ///
    /// Deleting a missing key is not an error.
    async fn delete_item(&self, table: &str, id: &str) -> Result<()>;

    /// Read every document in the table, optionally filtered
    ///
    /// Documents are returned in the store's scan order.
    async fn scan(&self, table: &str, filter: Option<&ScanFilter>) -> Result<Vec<Value>>;

    /// Write one page of documents
    ///
    /// # Errors
    ///
    /// Returns an error if the page was not written. Pages written by earlier
    /// calls are unaffected.
    async fn batch_write(&self, table: &str, items: Vec<Value>) -> Result<()>;

    /// Delete one page of documents by `_id`
    ///
    /// # Returns
    ///
    /// Returns the number of documents that existed and were removed.
    async fn batch_delete(&self, table: &str, ids: Vec<String>) -> Result<usize>;

    /// Get a display name for the store
    fn store_name(&self) -> &str;
}
