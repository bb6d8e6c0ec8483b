//! Configuration for the filter

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::parser::{DEFAULT_MAX_SEQUENCE_LEN, MAX_SEQUENCE_LEN, MIN_SEQUENCE_LEN};

/// Filter configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Longest escape sequence buffered before it is flushed as plain text
    pub max_sequence_len: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            max_sequence_len: DEFAULT_MAX_SEQUENCE_LEN,
        }
    }
}

impl FilterConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: FilterConfig = serde_json::from_str(&content)?;
        config.validate()?;
        tracing::debug!("Loaded filter config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check that the values are usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_sequence_len < MIN_SEQUENCE_LEN {
            return Err(ConfigError::Invalid(format!(
                "max_sequence_len must be at least {}, got {}",
                MIN_SEQUENCE_LEN, self.max_sequence_len
            )));
        }
        if self.max_sequence_len > MAX_SEQUENCE_LEN {
            return Err(ConfigError::Invalid(format!(
                "max_sequence_len must be at most {}, got {}",
                MAX_SEQUENCE_LEN, self.max_sequence_len
            )));
        }
        Ok(())
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
