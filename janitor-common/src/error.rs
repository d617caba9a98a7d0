//! Common error types for Janitor

use thiserror::Error;

/// Common result type for Janitor operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types shared by the Janitor crates
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input that cannot be interpreted (e.g. a malformed timestamp)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
