//! Child generation and paged persistence
//!
//! Children are written one page per `batch_write`. A page that fails is
//! logged and recorded; pages already written stay written.

use super::codes::{generate_codes, CodeWidth};
use super::report::{IssuanceReport, PageOutcome};
use crate::adapters::database::KeyValueStore;
use crate::core::pages::{chunk, page_count};
use crate::domain::{Child, Parent, Result};
use crate::log_page_progress;
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use serde_json::Value;
use std::sync::Arc;

/// Writes the children of one parent in pages
pub struct ChildWriter {
    store: Arc<dyn KeyValueStore + Send + Sync>,
    table: String,
    page_size: usize,
    write_concurrency: usize,
}

impl ChildWriter {
    /// Create a writer for `table`
    ///
    /// A `write_concurrency` of 1 writes pages strictly in order.
    pub fn new(
        store: Arc<dyn KeyValueStore + Send + Sync>,
        table: impl Into<String>,
        page_size: usize,
        write_concurrency: usize,
    ) -> Self {
        Self {
            store,
            table: table.into(),
            page_size,
            write_concurrency: write_concurrency.max(1),
        }
    }

    /// Generates `parent.total_children` children and persists them
    ///
    /// # Arguments
    ///
    /// * `parent` - The stored parent, as re-read after its write
    /// * `now` - Timestamp shared by every child of this run
    ///
    /// # Errors
    ///
    /// Fails only before the first page write: invalid width, exhausted code
    /// range, or an unusable page size. Page failures are reported instead.
    pub async fn write_children(&self, parent: Parent, now: DateTime<Utc>) -> Result<IssuanceReport> {
        let width = CodeWidth::new(i64::from(parent.digit_count))?;
        let codes = generate_codes(width, parent.total_children as usize)?;
        self.write_with_codes(parent, codes, now).await
    }

    /// Persists one child per supplied code
    ///
    /// # Errors
    ///
    /// Fails if a child cannot be serialized or the page size is zero.
    pub async fn write_with_codes(
        &self,
        parent: Parent,
        codes: Vec<u64>,
        now: DateTime<Utc>,
    ) -> Result<IssuanceReport> {
        let children: Vec<Child> = codes
            .into_iter()
            .map(|code| Child::issue(&parent, code, now))
            .collect();
        let documents = children
            .iter()
            .map(Child::to_document)
            .collect::<Result<Vec<Value>>>()?;

        let total_pages = page_count(documents.len(), self.page_size);
        let pages = chunk(documents, self.page_size)?;

        tracing::info!(
            parent_id = %parent.id,
            table = %self.table,
            children = children.len(),
            pages = total_pages,
            concurrency = self.write_concurrency,
            "Writing children"
        );

        let mut report = IssuanceReport::new(parent, children);

        if self.write_concurrency == 1 {
            for (index, page) in pages.into_iter().enumerate() {
                log_page_progress!(self.table.as_str(), index + 1, total_pages);
                report.record(self.write_page(index, page).await);
            }
        } else {
            let mut outcomes: Vec<PageOutcome> = stream::iter(pages.into_iter().enumerate())
                .map(|(index, page)| self.write_page(index, page))
                .buffer_unordered(self.write_concurrency)
                .collect()
                .await;
            outcomes.sort_by_key(|outcome| outcome.index);
            for outcome in outcomes {
                report.record(outcome);
            }
        }

        report.log_summary();
        Ok(report)
    }

    async fn write_page(&self, index: usize, page: Vec<Value>) -> PageOutcome {
        let size = page.len();
        match self.store.batch_write(&self.table, page).await {
            Ok(()) => PageOutcome::written(index, size),
            Err(e) => {
                tracing::warn!(
                    table = %self.table,
                    page = index,
                    size,
                    error = %e,
                    "Page write failed; continuing with remaining pages"
                );
                PageOutcome::failed(index, size, e.to_string())
            }
        }
    }
}
