//! Configuration error types.

use thiserror::Error;

/// Errors that can occur while loading or applying a table configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration text could not be parsed
    #[error("Failed to parse table configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// A row names a state that was never registered
    #[error("Unknown state '{name}' in {table} table")]
    UnknownState { name: String, table: String },
}
