//! Parent creation with bulk child issuance
//!
//! One run validates the request, stores the parent, reads it back, generates
//! unique codes and writes the children in pages:
//!
//! ```rust
//! use std::sync::Arc;
//! use tombola::adapters::memory::MemoryStore;
//! use tombola::config::TombolaConfig;
//! use tombola::core::issuance::Issuer;
//! use tombola::domain::{NewParent, ParentKind};
//!
//! # async fn example() -> tombola::domain::Result<()> {
//! let store = Arc::new(MemoryStore::new());
//! let issuer = Issuer::new(store, &TombolaConfig::default(), ParentKind::Raffle);
//!
//! let body = NewParent::from_json(r#"{"name":"Summer","digitCount":6,"totalChildren":600}"#)?;
//! let report = issuer.issue(body).await?;
//! assert_eq!(report.children.len(), 600);
//! assert!(report.is_complete());
//! # Ok(())
//! # }
//! ```

pub mod codes;
pub mod report;
pub mod writer;

pub use codes::{generate_codes, generate_codes_with_rng, CodeWidth};
pub use report::{IssuanceReport, PageOutcome};
pub use writer::ChildWriter;

use crate::adapters::database::KeyValueStore;
use crate::config::TombolaConfig;
use crate::core::entity::EntityStore;
use crate::domain::time::now_millis;
use crate::domain::{NewParent, ParentKind, Result, TombolaError};
use std::sync::Arc;

/// Runs parent creation and child issuance for one kind
pub struct Issuer {
    entities: EntityStore,
    writer: ChildWriter,
    max_children: u32,
}

impl Issuer {
    /// Create an issuer using the configured tables and batching
    pub fn new(
        store: Arc<dyn KeyValueStore + Send + Sync>,
        config: &TombolaConfig,
        kind: ParentKind,
    ) -> Self {
        let writer = ChildWriter::new(
            store.clone(),
            config.tables.child_table(kind),
            config.store.page_size,
            config.store.write_concurrency,
        );
        Self {
            entities: EntityStore::for_kind(store, &config.tables, kind),
            writer,
            max_children: config.issuance.max_children,
        }
    }

    /// Creates a parent and issues its children
    ///
    /// Every check runs before the first write, so a rejected request leaves
    /// the store untouched.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` for a bad digit count, child count, or price
    /// - `RangeExhausted` when the digit width cannot hold `totalChildren` codes
    /// - `Store` when the parent cannot be written or read back
    ///
    /// Child page failures do not fail the run; they show up in the report.
    pub async fn issue(&self, new_parent: NewParent) -> Result<IssuanceReport> {
        let now = now_millis();

        let width = CodeWidth::new(new_parent.digit_count)?;
        let total_children = new_parent.total_children()?;
        if total_children > self.max_children {
            return Err(TombolaError::InvalidArgument(format!(
                "totalChildren must not exceed {}, got {total_children}",
                self.max_children
            )));
        }
        width.check_capacity(u64::from(total_children))?;
        new_parent.validate_fields()?;

        let parent = self.entities.create(new_parent, now).await?;
        tracing::info!(
            kind = %self.entities.kind(),
            parent_id = %parent.id,
            digit_count = parent.digit_count,
            total_children = parent.total_children,
            "Parent created"
        );

        self.writer.write_children(parent, now).await
    }
}
