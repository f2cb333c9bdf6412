use serde::{Deserialize, Serialize};

use crate::error::{CoherenceError, Result};

/// Options for a scoring run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Enables truncation of the file list and of each transcript
    pub debug: bool,
    /// Files processed when `debug` is set
    pub max_files: usize,
    /// Records kept per transcript when `debug` is set
    pub max_records: usize,
    /// Scores kept per turn pair
    pub top_k: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            debug: false,
            max_files: 7,
            max_records: 3000,
            top_k: 3,
        }
    }
}

impl PipelineConfig {
    /// Reject options under which no pair could keep a score
    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(CoherenceError::InvalidConfig(
                "top_k must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Apply the file limit in debug mode
    pub fn limit_files<T>(&self, items: &mut Vec<T>) {
        if self.debug {
            items.truncate(self.max_files);
        }
    }

    /// Apply the record limit in debug mode
    pub fn limit_records<T>(&self, items: &mut Vec<T>) {
        if self.debug {
            items.truncate(self.max_records);
        }
    }
}
