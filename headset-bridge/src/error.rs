//! Common error types for headset-bridge.
//!
//! This module provides a centralized Error enum using thiserror,
//! with conversions from the serial and HTTP error types used by the
//! forwarding loop.

use thiserror::Error;

/// Main error type for headset-bridge operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O errors from tokio or std
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serial port errors
    #[error("Serial port error: {0}")]
    Serial(#[from] tokio_serial::Error),

    /// Outbound HTTP request errors (refused, timed out, DNS, ...)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed hex payload text
    #[error("Payload error: {0}")]
    Payload(String),
}

/// Convenience type alias for Results using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
