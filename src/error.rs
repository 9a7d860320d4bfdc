//! Error types for habitwatch
//!
//! The detection core itself is total and never fails. These errors only
//! surface at the boundaries: parsing frame records, loading configuration,
//! restoring persisted session state.

use thiserror::Error;

/// Errors that can occur at the engine boundary
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to parse frame record: {0}")]
    ParseError(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid segmentation mask: {0}")]
    InvalidMask(String),

    #[error("Unknown habit mode: {0}")]
    UnknownMode(String),

    #[error("Invalid session state: {0}")]
    StateError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
