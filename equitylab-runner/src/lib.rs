//! EquityLab Runner — scenario analysis, sensitivity sweeps, and reporting.
//!
//! This crate builds on `equitylab-core` to provide:
//! - TOML analysis configs with a starter template
//! - Parallel evaluation of exit scenarios with best-scenario selection
//! - Sensitivity sweeps and break-even exit search
//! - Chart-ready series and cap table summaries
//! - JSON / CSV / Markdown export with schema versioning

pub mod analysis;
pub mod config;
pub mod export;
pub mod format;
pub mod sensitivity;
pub mod series;
pub mod summary;

pub use analysis::{analyze, run_analysis, AnalysisError, AnalysisReport, ScenarioResult};
pub use config::{AnalysisConfig, ConfigError};
pub use export::{
    export_json, export_scenarios_csv, export_waterfall_csv, generate_report, import_json,
    load_artifacts, save_artifacts,
};
pub use sensitivity::{break_even_exit, sweep, SensitivityPoint, DEFAULT_MULTIPLIERS};
pub use series::{ChartSeries, WaterfallBar};
pub use summary::CapTableSummary;
