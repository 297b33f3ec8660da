//! Analysis runner — evaluates every exit scenario for one cap table and
//! assembles the report.
//!
//! Two entry points:
//! - `run_analysis()`: takes a parsed `AnalysisConfig`. Used by the CLI.
//! - `analyze()`: takes a built cap table and scenarios directly.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use equitylab_core::validate::{non_negative, validate_cap_table, validate_scenario};
use equitylab_core::{
    compute_validated, fingerprint, value_options, CalcError, CapTable, CapTableHash,
    ExitScenario, WaterfallResult,
};

use crate::config::{AnalysisConfig, ConfigError};
use crate::sensitivity::{break_even_exit, sweep, SensitivityPoint};
use crate::series::ChartSeries;
use crate::summary::CapTableSummary;

/// Errors from the analysis runner.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("calculation error: {0}")]
    Calc(#[from] CalcError),
    #[error("no exit scenarios to analyze")]
    NoScenarios,
    #[error("failed to fingerprint cap table: {0}")]
    Fingerprint(#[from] serde_json::Error),
}

/// Current schema version for serialized reports.
pub const SCHEMA_VERSION: u32 = 1;

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// Option holder's outcome in one exit scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario: String,
    pub exit_value: f64,
    pub price_per_share: f64,
    pub option_value: f64,
    pub exercise_cost: f64,
    /// `None` when exercise is free and the grant has value.
    pub roi_pct: Option<f64>,
    /// Total paid to common and the option pool.
    pub common_proceeds: f64,
    /// Classes that converted to common in this scenario.
    pub converted: Vec<String>,
}

impl ScenarioResult {
    pub fn from_waterfall(table: &CapTable, waterfall: &WaterfallResult) -> Self {
        let value = value_options(table, waterfall);
        Self {
            scenario: waterfall.scenario.clone(),
            exit_value: waterfall.proceeds,
            price_per_share: waterfall.price_per_common_share,
            option_value: value.total_value,
            exercise_cost: value.exercise_cost,
            roi_pct: value.roi_pct,
            common_proceeds: waterfall.common_payout,
            converted: waterfall
                .converted_classes()
                .map(|c| c.name.clone())
                .collect(),
        }
    }
}

/// Complete output of one analysis, persisted as `report.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub fingerprint: CapTableHash,
    pub cap_table: CapTable,
    pub summary: CapTableSummary,
    pub results: Vec<ScenarioResult>,
    /// Index into `results` of the scenario with the highest option value.
    pub best_index: usize,
    pub best_waterfall: WaterfallResult,
    pub sensitivity: Vec<SensitivityPoint>,
    /// Smallest exit at which the grant is in the money.
    pub break_even_exit: Option<f64>,
    pub series: ChartSeries,
}

impl AnalysisReport {
    pub fn best(&self) -> &ScenarioResult {
        &self.results[self.best_index]
    }
}

/// Build the cap table and scenarios from a config and analyze them.
pub fn run_analysis(config: &AnalysisConfig) -> Result<AnalysisReport, AnalysisError> {
    let table = config.cap_table()?;
    let scenarios = config.scenarios()?;
    let multipliers = config.multipliers()?;
    analyze(&table, &scenarios, &multipliers)
}

/// Analyze a cap table across `scenarios`, sweeping the best one by
/// `multipliers`.
pub fn analyze(
    table: &CapTable,
    scenarios: &[ExitScenario],
    multipliers: &[f64],
) -> Result<AnalysisReport, AnalysisError> {
    if scenarios.is_empty() {
        return Err(AnalysisError::NoScenarios);
    }
    validate_cap_table(table)?;
    for scenario in scenarios {
        validate_scenario(scenario).map_err(CalcError::from)?;
    }
    for &m in multipliers {
        non_negative("sensitivity multiplier", m).map_err(CalcError::from)?;
    }

    let fingerprint = fingerprint(table)?;
    info!(
        fingerprint = fingerprint.short(12),
        classes = table.share_classes.len(),
        scenarios = scenarios.len(),
        "running analysis"
    );

    let waterfalls: Vec<WaterfallResult> = scenarios
        .par_iter()
        .map(|s| compute_validated(table, s))
        .collect();
    let results: Vec<ScenarioResult> = waterfalls
        .iter()
        .map(|w| ScenarioResult::from_waterfall(table, w))
        .collect();

    // First scenario wins ties.
    let best_index = results
        .iter()
        .enumerate()
        .fold(0, |best, (i, r)| {
            if r.option_value > results[best].option_value {
                i
            } else {
                best
            }
        });
    let best_waterfall = waterfalls[best_index].clone();
    debug!(
        scenario = %best_waterfall.scenario,
        option_value = results[best_index].option_value,
        "best scenario"
    );

    let sensitivity = sweep(table, &scenarios[best_index], multipliers);
    let break_even_exit = break_even_exit(table);
    let series = ChartSeries::build(&results, &best_waterfall);

    info!(
        best = %best_waterfall.scenario,
        break_even = ?break_even_exit,
        "analysis complete"
    );

    Ok(AnalysisReport {
        schema_version: SCHEMA_VERSION,
        fingerprint,
        cap_table: table.clone(),
        summary: CapTableSummary::from_table(table),
        results,
        best_index,
        best_waterfall,
        sensitivity,
        break_even_exit,
        series,
    })
}
