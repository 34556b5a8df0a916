//! Configuration errors
//!
//! Everything that can go wrong is caught while building a run. Once a
//! `GameState` exists, ticking it cannot fail.

use thiserror::Error;

/// Errors raised while loading or validating [`crate::Settings`].
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Operator symbol outside `+ - x /`.
    #[error("Unknown gate operator '{0}'")]
    InvalidOperator(char),

    /// Operator pool contains no symbols.
    #[error("Operator pool is empty")]
    EmptyOperatorPool,

    /// A spawn interval was zero, negative or not a number.
    #[error("Spawn interval '{name}' must be positive, got {value}")]
    NonPositiveInterval { name: &'static str, value: f32 },

    /// Field dimensions were zero, negative or not a number.
    #[error("Field must have positive size, got {width}x{height}")]
    InvalidField { width: f32, height: f32 },

    /// An operand or stat range that cannot be sampled or applied.
    #[error("Invalid range '{name}': {min}..={max}")]
    InvalidRange { name: &'static str, min: u64, max: u64 },

    /// Settings file could not be read.
    #[error("Failed to read settings '{path}': {details}")]
    Io { path: String, details: String },

    /// Settings JSON could not be parsed.
    #[error("Settings parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
