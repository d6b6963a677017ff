//! Configuration for haltr
//!
//! Setup-time helpers only: the stop-sequence engine itself takes plain
//! values and never reads the environment.

use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::stop::{text_handler, TextStopHandler};

/// Read an environment variable, falling back to a default.
///
/// An unset variable and a set-but-empty one both fall back.
pub fn env_or_default(name: &str, default: &str) -> String {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => value,
        _ => default.to_string(),
    }
}

fn default_sentinel() -> String {
    "<|endoftext|>".to_string()
}

/// Stop-sequence filter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Literal stop strings; empty means pass-through
    #[serde(default)]
    pub stop_sequences: Vec<String>,

    /// Unit emitted in place of a matched stop sequence
    #[serde(default = "default_sentinel")]
    pub sentinel: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            stop_sequences: Vec::new(),
            sentinel: default_sentinel(),
        }
    }
}

impl FilterConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Build the text stop handler this configuration describes.
    pub fn into_handler(self) -> Result<TextStopHandler> {
        Ok(text_handler(self.stop_sequences, self.sentinel)?)
    }
}
