//! Configuration and build errors.

use thiserror::Error;

/// A single problem with an [`EngineConfig`](crate::config::EngineConfig).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Precision {precision} exceeds the supported maximum of {max}")]
    PrecisionOutOfRange { precision: u32, max: u32 },

    #[error("History limit must be at least 1; use no limit to keep every key press")]
    ZeroHistoryLimit,

    #[error("Malformed configuration: {0}")]
    Malformed(String),
}

/// Errors that can occur when building a calculator.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Every problem found in the configuration, not just the first
    #[error("Invalid calculator configuration ({} problem(s))", .0.len())]
    InvalidConfig(Vec<ConfigError>),
}

impl BuildError {
    pub fn problems(&self) -> &[ConfigError] {
        match self {
            Self::InvalidConfig(problems) => problems,
        }
    }
}
