//! Configuration for the Extractor

use crate::error::ExtractorError;
use crate::DEFAULT_MAX_DEPTH;
use serde::{Deserialize, Serialize};

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Deepest nesting level the locator and coercers will walk into
    pub max_depth: usize,

    /// Render numeric call start/end values as RFC 3339 UTC timestamps
    pub normalize_timestamps: bool,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ExtractorError> {
        if self.max_depth == 0 {
            return Err(ExtractorError::Config(
                "max_depth must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            normalize_timestamps: false,
        }
    }
}
