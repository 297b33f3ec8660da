//! Error taxonomy for cap table and scenario inputs.

use thiserror::Error;

/// A single field is negative, non-finite, or otherwise ill-formed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputValidationError {
    #[error("{field} must be non-negative, got {value}")]
    Negative { field: String, value: f64 },
    #[error("{field} must be a finite number")]
    NotFinite { field: String },
    #[error("share class name must not be empty")]
    EmptyName,
    #[error(
        "participation cap for '{class}' must be positive and at least the \
         liquidation multiple ({multiple}x), got {cap}x"
    )]
    CapOutOfRange {
        class: String,
        cap: f64,
        multiple: f64,
    },
}

/// Fields are individually valid but inconsistent with each other.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("options held ({held}) exceed the option pool ({pool})")]
    OptionsExceedPool { held: u64, pool: u64 },
    #[error("duplicate share class name '{0}'")]
    DuplicateClass(String),
    #[error("cap table has no common or option pool shares")]
    NoCommonShares,
    #[error("total share count overflows")]
    ShareOverflow,
}

/// Any reason a waterfall cannot be computed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("invalid input: {0}")]
    Input(#[from] InputValidationError),
    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigurationError),
}
