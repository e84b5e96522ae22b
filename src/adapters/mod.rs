//! Storage backends for Tombola.
//!
//! - [`database`] - The [`KeyValueStore`](database::KeyValueStore) trait and the store factory
//! - [`memory`] - In-process store for local runs and tests
//! - [`postgresql`] - PostgreSQL JSONB document tables
//!
//! # Design Pattern
//!
//! Backends follow the **Adapter Pattern**: the core talks only to the trait,
//! and tests substitute the memory store or a wrapper that injects failures.
//!
//! ```rust
//! use tombola::adapters::database::{KeyValueStore, ScanFilter};
//! use tombola::adapters::memory::MemoryStore;
//! use serde_json::json;
//!
//! # async fn example() -> tombola::domain::Result<()> {
//! let store = MemoryStore::new();
//! store.batch_write("raffle_tickets", vec![
//!     json!({"_id": "t-1", "parentRef": "r-1", "code": 123456}),
//!     json!({"_id": "t-2", "parentRef": "r-2", "code": 654321}),
//! ]).await?;
//!
//! let filter = ScanFilter::equals("parentRef", "r-1");
//! let tickets = store.scan("raffle_tickets", Some(&filter)).await?;
//! assert_eq!(tickets.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod database;
pub mod memory;
pub mod postgresql;
