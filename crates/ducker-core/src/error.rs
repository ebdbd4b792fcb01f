//! Error types for ducker-core.

use thiserror::Error;

/// Error type for ducker operations.
///
/// Steady-state processing never fails; only construction can.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type alias.
pub type Result<T> = core::result::Result<T, Error>;
