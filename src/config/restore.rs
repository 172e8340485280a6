//! Restoration configuration module.
//!
//! This module defines defaults for restoring defect text and printing
//! confidence scores.

use super::ConfigResult;
use super::Validate;
use crate::error::config::ConfigError;
use crate::restoration::confidence::DEFAULT_PRECISION;
use crate::restoration::RestorationMode;
use serde::{Deserialize, Serialize};

/// Largest number of decimal places accepted for confidence output.
const MAX_PRECISION: usize = 10;

/// Restoration configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestoreConfig {
    /// Mode used by `restore` when `--best` is not given
    pub default_mode: RestorationMode,

    /// Decimal places used when printing confidence percentages
    pub confidence_precision: usize,
}

impl Default for RestoreConfig {
    fn default() -> Self {
        Self {
            default_mode: RestorationMode::All,
            confidence_precision: DEFAULT_PRECISION,
        }
    }
}

impl Validate for RestoreConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.confidence_precision > MAX_PRECISION {
            return Err(ConfigError::ValueOutOfRange {
                key: "restore.confidence_precision".to_string(),
                message: format!("must be at most {MAX_PRECISION}"),
            });
        }

        Ok(())
    }
}
