//! Error types for the hand gesture control library.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// Skeleton tracking failed for a frame
    #[error("Tracking error: {0}")]
    Tracking(String),

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Input event injection failed
    #[error("Input injection error: {0}")]
    InputInjection(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Replay recording could not be read or parsed
    #[error("Replay error: {0}")]
    Replay(String),

    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
