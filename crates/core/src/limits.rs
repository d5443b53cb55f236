//! Construction limits
//!
//! This module defines configurable limits enforced when an array is
//! constructed. Limits can be built in code or loaded from a TOML file:
//!
//! ```toml
//! max_rank = 32
//! max_total_length = 2147483647
//! ```
//!
//! Independently of configuration, no array may hold more than
//! [`MAX_ADDRESSABLE_SLOTS`] slots.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Hard ceiling on the number of slots a buffer can address
pub const MAX_ADDRESSABLE_SLOTS: u64 = u32::MAX as u64;

/// Limits applied at array construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayLimits {
    /// Maximum number of dimensions (default: 32)
    #[serde(default = "default_max_rank")]
    pub max_rank: usize,

    /// Maximum total slot count (default: `i32::MAX`)
    #[serde(default = "default_max_total_length")]
    pub max_total_length: u64,
}

fn default_max_rank() -> usize {
    32
}

fn default_max_total_length() -> u64 {
    i32::MAX as u64
}

impl Default for ArrayLimits {
    fn default() -> Self {
        ArrayLimits {
            max_rank: default_max_rank(),
            max_total_length: default_max_total_length(),
        }
    }
}

impl ArrayLimits {
    /// Create limits with small values for testing
    pub fn with_small_limits() -> Self {
        ArrayLimits {
            max_rank: 4,
            max_total_length: 1024,
        }
    }

    /// Effective slot ceiling: the configured value capped by the addressable maximum
    pub fn slot_ceiling(&self) -> u64 {
        self.max_total_length.min(MAX_ADDRESSABLE_SLOTS)
    }

    /// Check a rank against `max_rank`
    pub fn validate_rank(&self, rank: usize) -> Result<()> {
        if rank > self.max_rank {
            return Err(Error::invalid_argument(format!(
                "rank {} exceeds the configured maximum of {}",
                rank, self.max_rank
            )));
        }
        Ok(())
    }

    /// Check a total slot count against the slot ceiling
    pub fn validate_total_length(&self, total: u64) -> Result<()> {
        let ceiling = self.slot_ceiling();
        if total > ceiling {
            return Err(Error::invalid_argument(format!(
                "array of {} elements exceeds the maximum of {}",
                total, ceiling
            )));
        }
        Ok(())
    }

    /// Parse limits from TOML text; missing keys take their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let limits: ArrayLimits = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse limits: {}", e)))?;
        if limits.max_rank == 0 {
            return Err(Error::Config("max_rank must be at least 1".to_string()));
        }
        Ok(limits)
    }

    /// Read and parse limits from a file path
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read limits file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Default limits file content with comments
    pub fn default_toml() -> &'static str {
        r#"# rankarray construction limits
#
# Maximum number of dimensions per array.
max_rank = 32

# Maximum number of elements per array. Values above 4294967295
# are capped to the addressable slot count.
max_total_length = 2147483647
"#
    }
}
