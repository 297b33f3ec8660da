//! Input validation, run before any computation.

use std::collections::HashSet;

use crate::domain::{CapTable, ExitScenario, ShareClass};
use crate::error::{CalcError, ConfigurationError, InputValidationError};

/// Reject NaN/infinite and negative values.
pub fn non_negative(field: &str, value: f64) -> Result<(), InputValidationError> {
    if !value.is_finite() {
        return Err(InputValidationError::NotFinite {
            field: field.to_string(),
        });
    }
    if value < 0.0 {
        return Err(InputValidationError::Negative {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}

pub fn validate_share_class(class: &ShareClass) -> Result<(), InputValidationError> {
    if class.name.trim().is_empty() {
        return Err(InputValidationError::EmptyName);
    }
    non_negative(&format!("{} invested", class.name), class.invested)?;
    non_negative(&format!("{} multiple", class.name), class.multiple)?;
    if let Some(cap) = class.participation.cap() {
        if !cap.is_finite() || cap <= 0.0 || cap < class.multiple {
            return Err(InputValidationError::CapOutOfRange {
                class: class.name.clone(),
                cap,
                multiple: class.multiple,
            });
        }
    }
    Ok(())
}

/// Validate every field, then the relationships between them.
///
/// A negative strike is accepted (free exercise); a non-finite one is not.
pub fn validate_cap_table(table: &CapTable) -> Result<(), CalcError> {
    if !table.strike_price.is_finite() {
        return Err(InputValidationError::NotFinite {
            field: "strike price".into(),
        }
        .into());
    }
    for class in &table.share_classes {
        validate_share_class(class)?;
    }

    let mut seen = HashSet::new();
    for class in &table.share_classes {
        if !seen.insert(class.name.as_str()) {
            return Err(ConfigurationError::DuplicateClass(class.name.clone()).into());
        }
    }

    if table.options_held > table.option_pool {
        return Err(ConfigurationError::OptionsExceedPool {
            held: table.options_held,
            pool: table.option_pool,
        }
        .into());
    }

    let common = table
        .common_shares
        .checked_add(table.option_pool)
        .ok_or(ConfigurationError::ShareOverflow)?;
    if common == 0 {
        return Err(ConfigurationError::NoCommonShares.into());
    }
    table
        .share_classes
        .iter()
        .try_fold(common, |acc, c| acc.checked_add(c.shares))
        .ok_or(ConfigurationError::ShareOverflow)?;

    Ok(())
}

pub fn validate_scenario(scenario: &ExitScenario) -> Result<(), InputValidationError> {
    non_negative(&format!("{} proceeds", scenario.name), scenario.proceeds)
}
