//! CLI interface and argument parsing
//!
//! Command-line interface for Tombola using clap. Record commands map onto
//! the request verbs: `create` is POST, `list` and `get` are GET, `update`
//! is PUT and `delete` is DELETE.

pub mod commands;

use clap::{Parser, Subcommand};

/// Tombola - bulk ticket issuance for raffles and products
#[derive(Parser, Debug)]
#[command(name = "tombola")]
#[command(version, about, long_about = None)]
#[command(author = "Tombola Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "tombola.toml", env = "TOMBOLA_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "TOMBOLA_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a raffle or product and issue its tickets or variations
    Create(commands::create::CreateArgs),

    /// List every raffle or product
    List(commands::read::ListArgs),

    /// Show one raffle or product
    Get(commands::read::GetArgs),

    /// Update a raffle's or product's descriptive fields
    Update(commands::update::UpdateArgs),

    /// Delete a raffle or product and all of its children
    Delete(commands::delete::DeleteArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
