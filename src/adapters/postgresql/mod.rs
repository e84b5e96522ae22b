//! PostgreSQL document store
//!
//! Stores each record as a JSONB document keyed by its `_id`.

pub mod adapter;
pub mod client;

pub use adapter::PostgresStore;
pub use client::PostgresClient;
