//! Configuration module for Wayback-Robots
//!
//! There is no configuration file: the CLI builds a [`HarvestConfig`] from its
//! flags and validates it before a run starts.
//!
//! # Example
//!
//! ```
//! use wayback_robots::config::HarvestConfig;
//!
//! let mut config = HarvestConfig::new("example.com");
//! config.concurrency = 4;
//! config.validate().unwrap();
//! ```

mod types;
mod validation;

// Re-export types
pub use types::{
    ArchiveConfig, HarvestConfig, DEFAULT_CDX_URL, DEFAULT_CONCURRENCY, DEFAULT_SNAPSHOT_URL,
    DEFAULT_TIMEOUT_SECS,
};

use crate::ConfigError;

impl HarvestConfig {
    /// Validates the configuration
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The configuration can be used for a run
    /// * `Err(ConfigError)` - A field is out of range or malformed
    pub fn validate(&self) -> Result<(), ConfigError> {
        validation::validate(self)
    }
}
