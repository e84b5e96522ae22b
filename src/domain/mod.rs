//! Domain models and types for Tombola.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`ParentId`], [`ChildId`])
//! - **Records** ([`Parent`], [`Child`]) and their kind-specific details
//! - **Request shapes** ([`NewParent`], [`ParentPatch`])
//! - **Error types** ([`TombolaError`], [`StoreError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! Identifiers are newtypes so a child ID can never be passed where a parent
//! ID is expected:
//!
//! ```rust
//! use tombola::domain::{ChildId, ParentId};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let raffle = ParentId::new("raffle-123")?;
//! let ticket = ChildId::generate();
//!
//! // This won't compile
//! // let wrong: ParentId = ticket;
//! # Ok(())
//! # }
//! ```
//!
//! # Stored Documents
//!
//! Records serialize to the camelCase JSON documents kept in the store.
//! The identifier is `_id`, timestamps are epoch milliseconds, and a `kind`
//! tag selects the kind-specific fields:
//!
//! ```rust
//! use tombola::domain::{NewParent, ParentKind};
//! use tombola::domain::time::now_millis;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let body = NewParent::from_json(r#"{"name":"Summer draw","digitCount":6,"totalChildren":600}"#)?;
//! let raffle = body.into_parent(ParentKind::Raffle, 6, 600, now_millis());
//!
//! let document = raffle.to_document()?;
//! assert_eq!(document["kind"], "raffle");
//! # Ok(())
//! # }
//! ```

pub mod child;
pub mod errors;
pub mod ids;
pub mod kind;
pub mod parent;
pub mod patch;
pub mod result;
pub mod time;

// Re-export commonly used types for convenience
pub use child::{Child, ChildDetails, VariationDetails, PARENT_REF_FIELD};
pub use errors::{StoreError, TombolaError};
pub use ids::{ChildId, ParentId};
pub use kind::ParentKind;
pub use parent::{NewParent, Parent, ParentDetails, ProductDetails};
pub use patch::ParentPatch;
pub use result::Result;
