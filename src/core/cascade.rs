//! Parent deletion with its children
//!
//! Children are found by scanning the child table for a matching `parentRef`.
//! There is no secondary index, so the scan reads the whole child table.
//! Child pages are deleted one at a time; a failed page is recorded and the
//! run continues to the parent delete. Repeating a delete sweeps whatever
//! children an earlier partial run left behind.

use crate::adapters::database::{document_id, KeyValueStore, ScanFilter};
use crate::config::TombolaConfig;
use crate::core::entity::EntityStore;
use crate::core::pages::{chunk, page_count};
use crate::domain::{ParentId, ParentKind, Result, TombolaError, PARENT_REF_FIELD};
use crate::{log_error_with_context, log_page_progress};
use std::sync::Arc;

/// Result of one cascade delete
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CascadeReport {
    /// Whether the parent record existed when the delete started
    pub parent_found: bool,

    /// Children matched by the scan
    pub children_found: usize,

    /// Children the store confirmed as removed
    pub children_removed: usize,

    /// Child delete pages that failed
    pub pages_failed: usize,

    /// Scan and page errors, in the order they happened
    pub errors: Vec<String>,
}

impl CascadeReport {
    /// Returns true when the scan succeeded and every child page was deleted
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }

    fn add_failure(&mut self, error: String) {
        self.errors.push(error);
    }
}

/// Deletes a parent and every child that references it
pub struct CascadeDeleter {
    entities: EntityStore,
    store: Arc<dyn KeyValueStore + Send + Sync>,
    child_table: String,
    page_size: usize,
}

impl CascadeDeleter {
    /// Create a deleter using the configured tables and page size
    pub fn new(
        store: Arc<dyn KeyValueStore + Send + Sync>,
        config: &TombolaConfig,
        kind: ParentKind,
    ) -> Self {
        Self {
            entities: EntityStore::for_kind(store.clone(), &config.tables, kind),
            store,
            child_table: config.tables.child_table(kind).to_string(),
            page_size: config.store.page_size,
        }
    }

    /// Deletes the children of `id`, then the parent itself
    ///
    /// The child sweep runs even when the parent is already gone, so a retry
    /// after a partial cascade removes the children left behind.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` only when neither the parent nor any child exists,
    /// or a `StoreError` if the parent cannot be read or deleted. Child scan
    /// and page failures are recorded in the report instead.
    pub async fn delete_parent_and_children(&self, id: &ParentId) -> Result<CascadeReport> {
        let mut report = CascadeReport {
            parent_found: self.entities.find(id).await?.is_some(),
            ..CascadeReport::default()
        };

        let filter = ScanFilter::equals(PARENT_REF_FIELD, id.as_str());
        match self.store.scan(&self.child_table, Some(&filter)).await {
            Ok(children) => {
                report.children_found = children.len();
                tracing::info!(
                    parent_id = %id,
                    table = %self.child_table,
                    children_found = report.children_found,
                    "Scanned child table"
                );

                let mut ids = Vec::with_capacity(children.len());
                for child in &children {
                    match document_id(child) {
                        Ok(child_id) => ids.push(child_id.to_string()),
                        Err(e) => report.add_failure(e.to_string()),
                    }
                }
                self.delete_pages(ids, &mut report).await?;
            }
            Err(e) => {
                log_error_with_context!(&e, "child scan failed during cascade delete");
                report.add_failure(e.to_string());
            }
        }

        if !report.parent_found && report.children_found == 0 && report.is_complete() {
            return Err(TombolaError::NotFound(format!(
                "{} {id}",
                self.entities.kind().label()
            )));
        }

        if report.parent_found {
            self.entities.delete(id).await?;
        }

        tracing::info!(
            kind = %self.entities.kind(),
            parent_id = %id,
            parent_found = report.parent_found,
            children_found = report.children_found,
            children_removed = report.children_removed,
            pages_failed = report.pages_failed,
            complete = report.is_complete(),
            "Cascade delete finished"
        );
        Ok(report)
    }

    async fn delete_pages(&self, ids: Vec<String>, report: &mut CascadeReport) -> Result<()> {
        let total_pages = page_count(ids.len(), self.page_size);
        for (index, page) in chunk(ids, self.page_size)?.into_iter().enumerate() {
            log_page_progress!(self.child_table.as_str(), index + 1, total_pages);
            let size = page.len();
            match self.store.batch_delete(&self.child_table, page).await {
                Ok(removed) => report.children_removed += removed,
                Err(e) => {
                    tracing::warn!(
                        table = %self.child_table,
                        page = index,
                        size,
                        error = %e,
                        "Child delete page failed; continuing"
                    );
                    report.pages_failed += 1;
                    report.add_failure(e.to_string());
                }
            }
        }
        Ok(())
    }
}
