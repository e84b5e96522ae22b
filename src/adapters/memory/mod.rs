//! In-memory store
//!
//! Used for local runs and tests. Nothing survives the process.

pub mod store;

pub use store::MemoryStore;
