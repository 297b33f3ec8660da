//! EquityLab Core — cap table domain types, validation, liquidation waterfall,
//! and option valuation.
//!
//! This crate contains the calculation engine:
//! - Domain types (share classes, cap tables, exit scenarios)
//! - Input validation with a two-level error taxonomy
//! - Liquidation waterfall: seniority-ordered preferences, capped
//!   participation, and conversion elections
//! - Option valuation for a common-stock grant
//! - Deterministic cap table fingerprints
//!
//! Everything here is pure and synchronous: no I/O, no shared state.

pub mod domain;
pub mod error;
pub mod fingerprint;
pub mod options;
pub mod validate;
pub mod waterfall;

pub use domain::{CapTable, ExitScenario, Participation, ShareClass};
pub use error::{CalcError, ConfigurationError, InputValidationError};
pub use fingerprint::{fingerprint, CapTableHash};
pub use options::{intrinsic_value, value_options, OptionValue};
pub use waterfall::{
    compute, compute_all, compute_validated, ClassPayout, PayoutKind, PayoutStep, WaterfallResult,
};
