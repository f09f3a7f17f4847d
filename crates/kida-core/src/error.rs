//! Error types for the KIDA client
//!
//! Two failure families reach callers: the request never produced a usable
//! page (transport) or the page did not have the expected layout (parse).

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for all KIDA query operations
///
/// Implements Display for human-readable messages and Serialize
/// so frontends can emit errors as JSON strings.
#[derive(Error, Debug)]
pub enum KidaError {
    /// Connection failure, timeout, or non-success HTTP status
    #[error("HTTP request failed: {0}")]
    TransportError(#[from] reqwest::Error),

    /// Expected markup is missing or malformed
    #[error("Failed to parse HTML: {0}")]
    ParseError(String),

    /// Search criteria rejected before any request was sent
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

impl KidaError {
    /// Returns true if the error came from the HTTP layer
    pub fn is_transport(&self) -> bool {
        matches!(self, KidaError::TransportError(_))
    }

    /// Returns true if the error came from page parsing
    pub fn is_parse(&self) -> bool {
        matches!(self, KidaError::ParseError(_))
    }
}

impl Serialize for KidaError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for KIDA operations
pub type Result<T> = std::result::Result<T, KidaError>;
