//! Key-value store abstraction layer
//!
//! Parents and children live in key-value tables behind the
//! [`KeyValueStore`] trait, so the core never sees which backend is in use.

pub mod factory;
pub mod traits;

pub use factory::create_store;
pub use traits::{document_id, KeyValueStore, ScanFilter, ID_FIELD};
