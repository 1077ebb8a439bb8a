//! Splitter configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Result, SplitError};
use crate::types::SplitUnit;

/// Configuration of a document splitter, fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitterConfig {
    /// Unit the text is segmented into.
    #[serde(default)]
    pub split_by: SplitUnit,

    /// Maximum number of units per chunk.
    #[serde(default = "default_split_length")]
    pub split_length: usize,

    /// Number of units shared by consecutive chunks.
    #[serde(default)]
    pub split_overlap: usize,

    /// A final chunk with fewer units than this is merged into its predecessor.
    #[serde(default)]
    pub split_threshold: usize,

    /// Avoid ending chunks mid-sentence (word units only).
    #[serde(default)]
    pub respect_sentence_boundary: bool,

    /// Name of the custom splitting function (function units only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub splitting_function: Option<String>,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            split_by: SplitUnit::Word,
            split_length: 200,
            split_overlap: 0,
            split_threshold: 0,
            respect_sentence_boundary: false,
            splitting_function: None,
        }
    }
}

fn default_split_length() -> usize {
    200
}

fn parse_error(e: toml::de::Error) -> SplitError {
    SplitError::Config {
        message: format!("Failed to parse config: {}", e),
    }
}

impl SplitterConfig {
    /// Create a configuration for the given unit with default sizes.
    pub fn new(split_by: SplitUnit) -> Self {
        Self {
            split_by,
            ..Self::default()
        }
    }

    /// Set length and overlap.
    pub fn with_window(mut self, split_length: usize, split_overlap: usize) -> Self {
        self.split_length = split_length;
        self.split_overlap = split_overlap;
        self
    }

    /// Set the merge threshold.
    pub fn with_threshold(mut self, split_threshold: usize) -> Self {
        self.split_threshold = split_threshold;
        self
    }

    /// Set sentence boundary handling.
    pub fn with_sentence_boundary(mut self, respect: bool) -> Self {
        self.respect_sentence_boundary = respect;
        self
    }

    /// Check that chunks can be formed and always advance.
    pub fn validate(&self) -> Result<()> {
        if self.split_length == 0 {
            return Err(SplitError::invalid_config("split_length must be greater than 0"));
        }
        if self.split_overlap >= self.split_length {
            return Err(SplitError::invalid_config(format!(
                "split_overlap ({}) must be less than split_length ({})",
                self.split_overlap, self.split_length
            )));
        }
        Ok(())
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    ///
    /// An unknown `split_by` name fails with `UnsupportedSplitUnit`; any other
    /// malformed input is a configuration error.
    pub fn from_toml(content: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(content).map_err(parse_error)?;
        if let Some(toml::Value::String(unit)) = table.get("split_by") {
            unit.parse::<SplitUnit>()?;
        }
        toml::Value::Table(table).try_into().map_err(parse_error)
    }

    /// Load configuration from default paths.
    pub fn load_default() -> Result<Self> {
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("docsplit").join("config.toml");
            if user_config.exists() {
                return Self::load(&user_config);
            }
        }

        let local_config = PathBuf::from("docsplit.toml");
        if local_config.exists() {
            return Self::load(&local_config);
        }

        Ok(Self::default())
    }
}
