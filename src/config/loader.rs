//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{StoreTarget, TombolaConfig};
use super::secret::secret_string;
use crate::domain::errors::TombolaError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into TombolaConfig
/// 4. Applies environment variable overrides (TOMBOLA_* prefix)
/// 5. Validates the configuration
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use tombola::config::loader::load_config;
///
/// let config = load_config("tombola.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<TombolaConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(TombolaError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        TombolaError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    load_config_from_str(&contents)
}

/// Loads configuration from TOML text
///
/// Same pipeline as [`load_config`] minus the file read.
///
/// # Errors
///
/// Returns an error if substitution, parsing, or validation fails.
pub fn load_config_from_str(contents: &str) -> Result<TombolaConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: TombolaConfig = toml::from_str(&contents)
        .map_err(|e| TombolaError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        TombolaError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| TombolaError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&cap[0], &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|m| m == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(TombolaError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

/// Reads and parses an override variable
///
/// Unset variables yield `None`; unparseable values are a configuration error.
fn env_override<T: FromStr>(name: &str) -> Result<Option<T>> {
    match std::env::var(name) {
        Ok(val) => val.trim().parse().map(Some).map_err(|_| {
            TombolaError::Configuration(format!("Invalid value '{val}' for {name}"))
        }),
        Err(_) => Ok(None),
    }
}

/// Applies environment variable overrides using TOMBOLA_* prefix
///
/// Environment variables follow the pattern: TOMBOLA_<SECTION>_<KEY>
/// For example: TOMBOLA_STORE_PAGE_SIZE, TOMBOLA_TABLES_RAFFLES
fn apply_env_overrides(config: &mut TombolaConfig) -> Result<()> {
    if let Ok(val) = std::env::var("TOMBOLA_STORE_TARGET") {
        config.store_target = match val.to_lowercase().as_str() {
            "memory" => StoreTarget::Memory,
            "postgresql" => StoreTarget::PostgreSQL,
            other => {
                return Err(TombolaError::Configuration(format!(
                    "Invalid value '{other}' for TOMBOLA_STORE_TARGET"
                )))
            }
        };
    }

    // Application overrides
    if let Ok(val) = std::env::var("TOMBOLA_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Store overrides
    if let Some(size) = env_override("TOMBOLA_STORE_PAGE_SIZE")? {
        config.store.page_size = size;
    }
    if let Ok(val) = std::env::var("TOMBOLA_STORE_REGION") {
        config.store.region = val;
    }
    if let Some(concurrency) = env_override("TOMBOLA_STORE_WRITE_CONCURRENCY")? {
        config.store.write_concurrency = concurrency;
    }

    // Table overrides
    if let Ok(val) = std::env::var("TOMBOLA_TABLES_RAFFLES") {
        config.tables.raffles = val;
    }
    if let Ok(val) = std::env::var("TOMBOLA_TABLES_RAFFLE_TICKETS") {
        config.tables.raffle_tickets = val;
    }
    if let Ok(val) = std::env::var("TOMBOLA_TABLES_PRODUCTS") {
        config.tables.products = val;
    }
    if let Ok(val) = std::env::var("TOMBOLA_TABLES_PRODUCT_VARIATIONS") {
        config.tables.product_variations = val;
    }

    // Issuance overrides
    if let Some(max) = env_override("TOMBOLA_ISSUANCE_MAX_CHILDREN")? {
        config.issuance.max_children = max;
    }

    // PostgreSQL overrides (only if PostgreSQL is configured)
    if let Some(ref mut pg_config) = config.postgresql {
        if let Ok(val) = std::env::var("TOMBOLA_POSTGRESQL_CONNECTION_STRING") {
            pg_config.connection_string = secret_string(val);
        }
        if let Some(max) = env_override("TOMBOLA_POSTGRESQL_MAX_CONNECTIONS")? {
            pg_config.max_connections = max;
        }
        if let Some(secs) = env_override("TOMBOLA_POSTGRESQL_STATEMENT_TIMEOUT_SECONDS")? {
            pg_config.statement_timeout_seconds = secs;
        }
        if let Ok(val) = std::env::var("TOMBOLA_POSTGRESQL_SSL_MODE") {
            pg_config.ssl_mode = val;
        }
    }

    // Logging overrides
    if let Some(enabled) = env_override("TOMBOLA_LOGGING_LOCAL_ENABLED")? {
        config.logging.local_enabled = enabled;
    }
    if let Ok(val) = std::env::var("TOMBOLA_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("TOMBOLA_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}
