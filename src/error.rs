//! Error types for the hebmorph library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`HebMorphError`] enum. Per-word analysis outcomes (a word that is not in
//! the dictionary, a word that only matches after toleration) are ordinary
//! return values and never surface here.
//!
//! # Examples
//!
//! ```
//! use hebmorph::error::{HebMorphError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(HebMorphError::invalid_key("empty key"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for hebmorph operations.
#[derive(Error, Debug)]
pub enum HebMorphError {
    /// An empty or otherwise structurally invalid dictionary key.
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// A strict dictionary lookup found nothing under the key.
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Invalid argument (bad special case literal, bad affix table, etc.)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Invalid configuration values
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors (reading configuration files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Errors raised by dictionary-building collaborators
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with HebMorphError.
pub type Result<T> = std::result::Result<T, HebMorphError>;

impl HebMorphError {
    /// Create a new invalid key error.
    pub fn invalid_key<S: Into<String>>(msg: S) -> Self {
        HebMorphError::InvalidKey(msg.into())
    }

    /// Create a new not found error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        HebMorphError::NotFound(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        HebMorphError::InvalidArgument(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        HebMorphError::Config(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        HebMorphError::Other(msg.into())
    }

    /// Whether this error is a strict-lookup miss.
    ///
    /// Callers routinely check the dictionary for absence, so this is the
    /// one variant that is expected in normal control flow.
    pub fn is_not_found(&self) -> bool {
        matches!(self, HebMorphError::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = HebMorphError::invalid_key("empty key");
        assert_eq!(error.to_string(), "Invalid key: empty key");

        let error = HebMorphError::not_found("שלום");
        assert_eq!(error.to_string(), "Key not found: שלום");
        assert!(error.is_not_found());

        let error = HebMorphError::config("buffer_size must be positive");
        assert_eq!(
            error.to_string(),
            "Configuration error: buffer_size must be positive"
        );
        assert!(!error.is_not_found());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = HebMorphError::from(io_error);

        match error {
            HebMorphError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }

    #[test]
    fn test_anyhow_error_conversion() {
        let error = HebMorphError::from(anyhow::anyhow!("bad dictionary line"));
        assert_eq!(error.to_string(), "Anyhow error: bad dictionary line");
    }
}
