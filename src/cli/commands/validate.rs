//! Validate config command implementation
//!
//! Loads and validates the configuration file, optionally checking that
//! the configured store is reachable.

use super::{EXIT_CONFIG, EXIT_FATAL, EXIT_OK};
use crate::adapters::database::create_store;
use crate::config::load_config;
use crate::config::schema::StoreTarget;
use crate::domain::ParentKind;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Also connect to the store and prepare its tables
    #[arg(long)]
    pub check_store: bool,
}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates as part of loading
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration is valid");
                c
            }
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Store Target: {}", config.store_target);
        if config.store_target == StoreTarget::PostgreSQL {
            if let Some(ref pg_config) = config.postgresql {
                println!("  Max Connections: {}", pg_config.max_connections);
                println!("  SSL Mode: {}", pg_config.ssl_mode);
            }
        }
        println!("  Page Size: {}", config.store.page_size);
        println!("  Write Concurrency: {}", config.store.write_concurrency);
        println!("  Max Children: {}", config.issuance.max_children);
        for kind in [ParentKind::Raffle, ParentKind::Product] {
            println!(
                "  {} Tables: {} / {}",
                kind.label(),
                config.tables.parent_table(kind),
                config.tables.child_table(kind)
            );
        }
        println!();

        if !self.check_store {
            return Ok(EXIT_OK);
        }

        println!("🔌 Checking store connection...");
        match create_store(&config).await {
            Ok(store) => {
                println!("✅ Store '{}' is reachable and tables are ready", store.store_name());
                Ok(EXIT_OK)
            }
            Err(e) => {
                println!("❌ Store check failed");
                println!("   Error: {e}");
                Ok(EXIT_FATAL)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_validate_missing_file() {
        let args = ValidateArgs { check_store: false };
        let code = args.execute("no-such-tombola.toml").await.unwrap();
        assert_eq!(code, EXIT_CONFIG);
    }

    #[tokio::test]
    async fn test_validate_memory_config_with_store_check() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "store_target = \"memory\"").unwrap();

        let args = ValidateArgs { check_store: true };
        let code = args
            .execute(file.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(code, EXIT_OK);
    }

    #[tokio::test]
    async fn test_validate_rejects_bad_page_size() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[store]\npage_size = 0").unwrap();

        let args = ValidateArgs { check_store: false };
        let code = args
            .execute(file.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(code, EXIT_CONFIG);
    }
}
