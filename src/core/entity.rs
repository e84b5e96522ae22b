//! Parent record access
//!
//! [`EntityStore`] reads and writes parents of one kind in that kind's
//! parent table. Children are never touched here.

use crate::adapters::database::KeyValueStore;
use crate::config::schema::TablesConfig;
use crate::core::issuance::codes::CodeWidth;
use crate::domain::{
    NewParent, Parent, ParentId, ParentKind, ParentPatch, Result, StoreError, TombolaError,
};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::Arc;

/// Create, read, list and update parents of one kind
#[derive(Clone)]
pub struct EntityStore {
    store: Arc<dyn KeyValueStore + Send + Sync>,
    kind: ParentKind,
    table: String,
}

impl EntityStore {
    /// Create an entity store over an explicit table
    pub fn new(
        store: Arc<dyn KeyValueStore + Send + Sync>,
        kind: ParentKind,
        table: impl Into<String>,
    ) -> Self {
        Self {
            store,
            kind,
            table: table.into(),
        }
    }

    /// Create an entity store over the configured parent table for `kind`
    pub fn for_kind(
        store: Arc<dyn KeyValueStore + Send + Sync>,
        tables: &TablesConfig,
        kind: ParentKind,
    ) -> Self {
        Self::new(store, kind, tables.parent_table(kind))
    }

    /// Parent kind this store serves
    pub fn kind(&self) -> ParentKind {
        self.kind
    }

    /// Parent table name
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Stores a new parent and returns it as read back from the store
    ///
    /// The identifier is generated here and both timestamps are set to `now`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for an invalid body, or a `StoreError` if the
    /// write fails or the record is not visible after it.
    pub async fn create(&self, new_parent: NewParent, now: DateTime<Utc>) -> Result<Parent> {
        let width = CodeWidth::new(new_parent.digit_count)?;
        let total_children = new_parent.total_children()?;
        new_parent.validate_fields()?;

        let parent = new_parent.into_parent(self.kind, width.digits(), total_children, now);
        let id = parent.id.clone();

        self.store
            .put_item(&self.table, parent.to_document()?)
            .await?;
        tracing::debug!(kind = %self.kind, parent_id = %id, "Parent written");

        self.find(&id).await?.ok_or_else(|| {
            StoreError::ReadFailed(format!(
                "{} {id} not visible after write",
                self.kind.label()
            ))
            .into()
        })
    }

    /// Reads a parent by identifier
    ///
    /// # Returns
    ///
    /// Returns `Ok(None)` if no parent of this kind has that identifier.
    pub async fn find(&self, id: &ParentId) -> Result<Option<Parent>> {
        match self.store.get_item(&self.table, id.as_str()).await? {
            Some(document) => {
                let parent = self.decode(document)?;
                if parent.kind() != self.kind {
                    tracing::warn!(
                        parent_id = %id,
                        expected = %self.kind,
                        found = %parent.kind(),
                        "Record of another kind in parent table"
                    );
                    return Ok(None);
                }
                Ok(Some(parent))
            }
            None => Ok(None),
        }
    }

    /// Reads a parent by identifier, failing if it is absent
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the identifier does not resolve.
    pub async fn get(&self, id: &ParentId) -> Result<Parent> {
        self.find(id)
            .await?
            .ok_or_else(|| TombolaError::NotFound(format!("{} {id}", self.kind.label())))
    }

    /// Reads every parent in the table
    ///
    /// This is a full-table scan. Documents that do not decode as a parent of
    /// this kind are skipped with a warning.
    pub async fn list_all(&self) -> Result<Vec<Parent>> {
        let documents = self.store.scan(&self.table, None).await?;
        let scanned = documents.len();

        let parents: Vec<Parent> = documents
            .into_iter()
            .filter_map(|document| match self.decode(document) {
                Ok(parent) if parent.kind() == self.kind => Some(parent),
                Ok(parent) => {
                    tracing::warn!(parent_id = %parent.id, found = %parent.kind(), "Skipping record of another kind");
                    None
                }
                Err(e) => {
                    tracing::warn!(table = %self.table, error = %e, "Skipping undecodable record");
                    None
                }
            })
            .collect();

        tracing::debug!(table = %self.table, scanned, returned = parents.len(), "Listed parents");
        Ok(parents)
    }

    /// Merges `patch` into the stored parent and writes it back
    ///
    /// `updatedAt` is always set to `now`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the identifier does not resolve and
    /// `InvalidArgument` if the patch does not fit this kind.
    pub async fn update(
        &self,
        id: &ParentId,
        patch: &ParentPatch,
        now: DateTime<Utc>,
    ) -> Result<Parent> {
        let mut parent = self.get(id).await?;
        patch.apply(&mut parent, now)?;

        self.store
            .put_item(&self.table, parent.to_document()?)
            .await?;

        tracing::info!(
            kind = %self.kind,
            parent_id = %id,
            fields = ?patch.changed_fields(),
            "Parent updated"
        );
        Ok(parent)
    }

    /// Deletes the parent record only
    pub async fn delete(&self, id: &ParentId) -> Result<()> {
        self.store.delete_item(&self.table, id.as_str()).await
    }

    fn decode(&self, document: Value) -> Result<Parent> {
        Parent::from_document(document).map_err(|e| {
            StoreError::InvalidDocument(format!("{} record in {}: {e}", self.kind.label(), self.table))
                .into()
        })
    }
}
