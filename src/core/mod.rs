//! Core issuance and deletion logic for Tombola.
//!
//! # Modules
//!
//! - [`pages`] - Splits work into store-sized pages
//! - [`issuance`] - Code generation, paged child writes, and the create run
//! - [`entity`] - Parent create, read, list, and update
//! - [`cascade`] - Parent deletion together with its children
//!
//! # Runs
//!
//! Creation: validate, store the parent, read it back, generate codes, write
//! child pages, report.
//!
//! Deletion: resolve the parent, scan for its children, delete child pages,
//! delete the parent, report.
//!
//! Neither run is transactional across pages. Both return a report that
//! says whether every page succeeded.

pub mod cascade;
pub mod entity;
pub mod issuance;
pub mod pages;

pub use cascade::{CascadeDeleter, CascadeReport};
pub use entity::EntityStore;
pub use issuance::{ChildWriter, IssuanceReport, Issuer, PageOutcome};
