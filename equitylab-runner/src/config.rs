//! TOML configuration for an equity analysis.
//!
//! ```toml
//! [cap_table]
//! common_shares = 5500000
//! option_pool = 1000000
//! options_held = 50000
//! strike_price = 0.10
//!
//! [[share_class]]
//! name = "Series A"
//! shares = 1500000
//! invested = 10000000
//! multiple = 1.0
//! seniority = 1
//! participation = { type = "participating", cap = 3.0 }
//!
//! [[scenario]]
//! name = "Base Case"
//! proceeds = 50000000
//!
//! [sensitivity]
//! multipliers = [0.5, 1.0, 2.0]
//! ```
//!
//! Share counts are read as signed integers so that negative input surfaces
//! as a validation error rather than a parse error.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use equitylab_core::validate::{non_negative, validate_cap_table};
use equitylab_core::{
    CalcError, CapTable, ExitScenario, InputValidationError, Participation, ShareClass,
};

use crate::sensitivity::DEFAULT_MULTIPLIERS;

/// Errors from loading or interpreting a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to write TOML: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error(transparent)]
    Invalid(#[from] CalcError),
}

impl From<InputValidationError> for ConfigError {
    fn from(e: InputValidationError) -> Self {
        Self::Invalid(e.into())
    }
}

fn default_multiple() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapTableSection {
    pub common_shares: i64,
    #[serde(default)]
    pub option_pool: i64,
    #[serde(default)]
    pub options_held: i64,
    #[serde(default)]
    pub strike_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareClassSection {
    pub name: String,
    pub shares: i64,
    pub invested: f64,
    #[serde(default = "default_multiple")]
    pub multiple: f64,
    #[serde(default)]
    pub seniority: u32,
    #[serde(default)]
    pub participation: Participation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSection {
    #[serde(default)]
    pub name: String,
    pub proceeds: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivitySection {
    #[serde(default = "default_multipliers")]
    pub multipliers: Vec<f64>,
}

fn default_multipliers() -> Vec<f64> {
    DEFAULT_MULTIPLIERS.to_vec()
}

impl Default for SensitivitySection {
    fn default() -> Self {
        Self {
            multipliers: default_multipliers(),
        }
    }
}

/// Complete input for one analysis: cap table, rounds, scenarios, sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub cap_table: CapTableSection,
    #[serde(default, rename = "share_class")]
    pub share_classes: Vec<ShareClassSection>,
    #[serde(default, rename = "scenario")]
    pub scenarios: Vec<ScenarioSection>,
    #[serde(default)]
    pub sensitivity: SensitivitySection,
}

fn share_count(field: &str, value: i64) -> Result<u64, InputValidationError> {
    u64::try_from(value).map_err(|_| InputValidationError::Negative {
        field: field.to_string(),
        value: value as f64,
    })
}

impl AnalysisConfig {
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded analysis config");
        Self::from_toml(&content)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Build and validate the core cap table.
    pub fn cap_table(&self) -> Result<CapTable, ConfigError> {
        let section = &self.cap_table;
        let mut table = CapTable::new(
            share_count("common shares", section.common_shares)?,
            share_count("option pool", section.option_pool)?,
        )
        .with_grant(
            share_count("options held", section.options_held)?,
            section.strike_price,
        );

        for class in &self.share_classes {
            table = table.with_class(ShareClass {
                name: class.name.clone(),
                shares: share_count(&format!("{} shares", class.name), class.shares)?,
                invested: class.invested,
                multiple: class.multiple,
                participation: class.participation,
                seniority: class.seniority,
            });
        }

        validate_cap_table(&table)?;
        Ok(table)
    }

    /// Exit scenarios in file order. Unnamed scenarios become "Scenario N".
    pub fn scenarios(&self) -> Result<Vec<ExitScenario>, ConfigError> {
        self.scenarios
            .iter()
            .enumerate()
            .map(|(i, s)| -> Result<ExitScenario, ConfigError> {
                let name = if s.name.trim().is_empty() {
                    format!("Scenario {}", i + 1)
                } else {
                    s.name.clone()
                };
                non_negative(&format!("{name} proceeds"), s.proceeds)?;
                Ok(ExitScenario::new(name, s.proceeds))
            })
            .collect()
    }

    /// Sensitivity multipliers, validated as finite and non-negative.
    pub fn multipliers(&self) -> Result<Vec<f64>, ConfigError> {
        for &m in &self.sensitivity.multipliers {
            non_negative("sensitivity multiplier", m)?;
        }
        Ok(self.sensitivity.multipliers.clone())
    }

    /// A starter configuration: two priced rounds and three exit scenarios.
    pub fn template() -> Self {
        Self {
            cap_table: CapTableSection {
                common_shares: 5_500_000,
                option_pool: 1_000_000,
                options_held: 50_000,
                strike_price: 0.10,
            },
            share_classes: vec![
                ShareClassSection {
                    name: "Seed".into(),
                    shares: 2_000_000,
                    invested: 2_000_000.0,
                    multiple: 1.0,
                    seniority: 0,
                    participation: Participation::NonParticipating,
                },
                ShareClassSection {
                    name: "Series A".into(),
                    shares: 1_500_000,
                    invested: 10_000_000.0,
                    multiple: 1.0,
                    seniority: 1,
                    participation: Participation::NonParticipating,
                },
            ],
            scenarios: vec![
                ScenarioSection {
                    name: "Conservative".into(),
                    proceeds: 25_000_000.0,
                },
                ScenarioSection {
                    name: "Base Case".into(),
                    proceeds: 50_000_000.0,
                },
                ScenarioSection {
                    name: "Optimistic".into(),
                    proceeds: 100_000_000.0,
                },
            ],
            sensitivity: SensitivitySection::default(),
        }
    }
}
