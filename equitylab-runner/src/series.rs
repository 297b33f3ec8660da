//! Chart-ready series derived from an analysis.
//!
//! Rendering is left to the consumer; these are plain vectors aligned by
//! scenario index, plus the bars of the best scenario's waterfall.

use serde::{Deserialize, Serialize};

use equitylab_core::{PayoutKind, WaterfallResult};

use crate::analysis::ScenarioResult;

/// Display ceiling for ROI when exercise is free.
pub const ROI_DISPLAY_CAP: f64 = 999_999.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterfallBar {
    pub label: String,
    pub kind: PayoutKind,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub scenarios: Vec<String>,
    pub exit_values: Vec<f64>,
    pub option_values: Vec<f64>,
    /// ROI in percent, with free exercise shown as [`ROI_DISPLAY_CAP`].
    pub roi_pct: Vec<f64>,
    /// Non-zero payouts of the best scenario, in payment order.
    pub waterfall: Vec<WaterfallBar>,
}

impl ChartSeries {
    pub fn build(results: &[ScenarioResult], best: &WaterfallResult) -> Self {
        Self {
            scenarios: results.iter().map(|r| r.scenario.clone()).collect(),
            exit_values: results.iter().map(|r| r.exit_value).collect(),
            option_values: results.iter().map(|r| r.option_value).collect(),
            roi_pct: results
                .iter()
                .map(|r| r.roi_pct.unwrap_or(ROI_DISPLAY_CAP).min(ROI_DISPLAY_CAP))
                .collect(),
            waterfall: best
                .steps
                .iter()
                .filter(|s| s.amount > 0.0)
                .map(|s| WaterfallBar {
                    label: s.label.clone(),
                    kind: s.kind,
                    amount: s.amount,
                })
                .collect(),
        }
    }
}
