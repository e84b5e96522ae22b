//! Configuration management for Tombola.
//!
//! # Overview
//!
//! Tombola uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `TOMBOLA_<SECTION>_<KEY>` overrides
//! - Default values for every optional setting
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use tombola::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("tombola.toml")?;
//!
//! println!("Store: {}", config.store_target);
//! println!("Page size: {}", config.store.page_size);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`StoreConfig`] - Page size, region, write concurrency
//! - [`TablesConfig`] - Parent and child table names per kind
//! - [`IssuanceConfig`] - Issuance limits
//! - [`PostgreSQLConfig`] - PostgreSQL pool settings
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! store_target = "postgresql"
//!
//! [application]
//! log_level = "info"
//!
//! [store]
//! page_size = 25
//! region = "us-east-1"
//!
//! [postgresql]
//! connection_string = "${TOMBOLA_PG_URL}"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, load_config_from_str};
pub use schema::{
    ApplicationConfig, IssuanceConfig, LoggingConfig, PostgreSQLConfig, StoreConfig, StoreTarget,
    TablesConfig, TombolaConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
