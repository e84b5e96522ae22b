//! Logging and observability
//!
//! Structured logging through `tracing`:
//! - Human-readable console output
//! - Optional JSON file output with daily or hourly rotation
//! - Level from configuration or `--log-level`, overridable by `RUST_LOG`
//!
//! # Example
//!
//! ```no_run
//! use tombola::logging::init_logging;
//! use tombola::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(kind = "raffle", "Issuance started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log progress through a paged write or delete
///
/// # Example
///
/// ```no_run
/// use tombola::log_page_progress;
///
/// log_page_progress!("raffle_tickets", 3, 24);
/// ```
#[macro_export]
macro_rules! log_page_progress {
    ($table:expr, $page:expr, $pages:expr) => {
        tracing::debug!(
            table = $table,
            page = $page,
            pages = $pages,
            progress_pct = ($page as f64 / $pages as f64 * 100.0),
            "Processing page"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use tombola::log_error_with_context;
/// use tombola::domain::TombolaError;
///
/// let error = TombolaError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
