//! Error types for the Extractor

use thiserror::Error;

/// Errors raised while setting up extraction
///
/// Extraction itself never fails; malformed payloads degrade to empty fields.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExtractorError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
