// Tombola - Bulk ticket issuance engine
// Copyright (c) 2025 Tombola Contributors
// Licensed under the MIT License

//! # Tombola - Bulk ticket issuance
//!
//! Tombola manages raffles and products. Creating one issues its whole batch
//! of children up front: tickets for a raffle, variations for a product. Each
//! child carries a random fixed-width numeric code that is unique within its
//! batch.
//!
//! ## Overview
//!
//! - **Issue** a parent and its children with unique random codes
//! - **Page** child writes and deletes through a key-value store
//! - **Update** a parent's descriptive fields through an allow-listed patch
//! - **Cascade** a parent delete to every child that references it
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`api`] - Verb dispatch from requests to responses
//! - [`core`] - Issuance, entity access, cascade delete, paging
//! - [`adapters`] - Key-value stores (in-memory, PostgreSQL)
//! - [`domain`] - Records, identifiers, and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use tombola::adapters::memory::MemoryStore;
//! use tombola::api::{Method, Request, RequestHandler};
//! use tombola::config::TombolaConfig;
//! use tombola::domain::ParentKind;
//!
//! # async fn example() {
//! let config = TombolaConfig::default();
//! let handler = RequestHandler::new(Arc::new(MemoryStore::new()), &config, ParentKind::Raffle);
//!
//! let request = Request::new(Method::Post)
//!     .with_body(r#"{"name":"Spring draw","digitCount":4,"totalChildren":50,"price":2.5}"#);
//! let response = handler.handle(request).await;
//!
//! assert_eq!(response.status_code, 200);
//! let tickets: Vec<serde_json::Value> = serde_json::from_str(&response.body).unwrap();
//! assert_eq!(tickets.len(), 50);
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Library operations return [`domain::Result`], whose error type is
//! [`domain::TombolaError`]. Store failures arrive as
//! [`domain::StoreError`] and convert with `?`:
//!
//! ```rust,no_run
//! use tombola::domain::TombolaError;
//!
//! fn example() -> Result<(), TombolaError> {
//!     let config = tombola::config::load_config("tombola.toml")?;
//!     println!("store: {}", config.store_target);
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! Tombola logs through `tracing`; see [`logging::init_logging`].

pub mod adapters;
pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
