//! Store factory
//!
//! Creates the key-value store selected by configuration.

use crate::adapters::database::traits::KeyValueStore;
use crate::adapters::memory::MemoryStore;
use crate::adapters::postgresql::{PostgresClient, PostgresStore};
use crate::config::schema::{StoreTarget, TombolaConfig};
use crate::domain::{Result, TombolaError};
use std::sync::Arc;

/// Create a key-value store based on the configuration
///
/// Every configured table is created if it does not exist yet, so the
/// returned store is ready for both parent kinds.
///
/// # Arguments
///
/// * `config` - The validated Tombola configuration
///
/// # Returns
///
/// Returns an Arc-wrapped trait object that implements KeyValueStore
///
/// # Errors
///
/// Returns an error if the store cannot be created or a table cannot be
/// prepared
pub async fn create_store(config: &TombolaConfig) -> Result<Arc<dyn KeyValueStore + Send + Sync>> {
    let store: Arc<dyn KeyValueStore + Send + Sync> = match config.store_target {
        StoreTarget::Memory => {
            tracing::info!("Creating in-memory store");
            Arc::new(MemoryStore::new())
        }
        StoreTarget::PostgreSQL => {
            let pg_config = config.postgresql.as_ref().ok_or_else(|| {
                TombolaError::Configuration(
                    "postgresql configuration is required when store_target = 'postgresql'"
                        .to_string(),
                )
            })?;

            tracing::info!(region = %config.store.region, "Creating PostgreSQL store");
            let client = PostgresClient::new(pg_config.clone())?;
            Arc::new(PostgresStore::new(client))
        }
    };

    for table in config.tables.all() {
        store.ensure_table_exists(table).await?;
    }

    Ok(store)
}
