//! Reporting and export — JSON, CSV, and Markdown artifact generation.
//!
//! Provides three export formats for analysis reports:
//! - **JSON**: full round-trip serialization with schema versioning
//! - **CSV**: per-scenario results and the best scenario's waterfall
//! - **Markdown**: human-readable equity summary
//!
//! Persisted reports carry a `schema_version` field. Newer versions are
//! rejected on load.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use equitylab_core::WaterfallResult;

use crate::analysis::{AnalysisReport, ScenarioResult, SCHEMA_VERSION};
use crate::format::{count, money, money_cents, roi};

// ─── JSON export ────────────────────────────────────────────────────

/// Serialize an `AnalysisReport` to pretty JSON.
pub fn export_json(report: &AnalysisReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize AnalysisReport to JSON")
}

/// Deserialize an `AnalysisReport` from JSON, rejecting unknown schema versions.
pub fn import_json(json: &str) -> Result<AnalysisReport> {
    let report: AnalysisReport =
        serde_json::from_str(json).context("failed to deserialize AnalysisReport from JSON")?;
    if report.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            report.schema_version,
            SCHEMA_VERSION
        );
    }
    if report.best_index >= report.results.len() {
        bail!(
            "best scenario index {} out of range ({} results)",
            report.best_index,
            report.results.len()
        );
    }
    Ok(report)
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Export per-scenario results as CSV.
///
/// Columns: scenario, exit_value, price_per_share, option_value,
/// exercise_cost, roi_pct, common_proceeds, converted
pub fn export_scenarios_csv(results: &[ScenarioResult]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record([
        "scenario",
        "exit_value",
        "price_per_share",
        "option_value",
        "exercise_cost",
        "roi_pct",
        "common_proceeds",
        "converted",
    ])?;

    for r in results {
        wtr.write_record([
            &r.scenario,
            &format!("{:.2}", r.exit_value),
            &format!("{:.6}", r.price_per_share),
            &format!("{:.2}", r.option_value),
            &format!("{:.2}", r.exercise_cost),
            &r.roi_pct.map(|v| format!("{v:.2}")).unwrap_or_default(),
            &format!("{:.2}", r.common_proceeds),
            &r.converted.join(";"),
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Export a waterfall's payment steps as CSV.
pub fn export_waterfall_csv(waterfall: &WaterfallResult) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["step", "label", "kind", "amount", "remaining_after"])?;
    for (i, step) in waterfall.steps.iter().enumerate() {
        wtr.write_record([
            &i.to_string(),
            &step.label,
            &format!("{:?}", step.kind),
            &format!("{:.2}", step.amount),
            &format!("{:.2}", step.remaining_after),
        ])?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── Artifact bundle ────────────────────────────────────────────────

/// Save the full artifact set for one analysis.
///
/// Creates a directory named `{fingerprint}_{timestamp}/` under `output_dir`
/// containing:
/// - `report.json` — the full `AnalysisReport`
/// - `scenarios.csv` — one row per exit scenario
/// - `waterfall.csv` — payment steps of the best scenario
/// - `report.md` — Markdown summary
///
/// Returns the path to the created directory.
pub fn save_artifacts(report: &AnalysisReport, output_dir: &Path) -> Result<PathBuf> {
    let dirname = format!(
        "{}_{}",
        report.fingerprint.short(12),
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    );
    let run_dir = output_dir.join(dirname);
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create artifact dir: {}", run_dir.display()))?;

    std::fs::write(run_dir.join("report.json"), export_json(report)?)?;
    std::fs::write(
        run_dir.join("scenarios.csv"),
        export_scenarios_csv(&report.results)?,
    )?;
    std::fs::write(
        run_dir.join("waterfall.csv"),
        export_waterfall_csv(&report.best_waterfall)?,
    )?;
    std::fs::write(run_dir.join("report.md"), generate_report(report))?;

    tracing::info!(dir = %run_dir.display(), "saved artifacts");
    Ok(run_dir)
}

/// Load an `AnalysisReport` from an artifact directory's report.json.
///
/// Rejects unknown schema versions.
pub fn load_artifacts(dir: &Path) -> Result<AnalysisReport> {
    let path = dir.join("report.json");
    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    import_json(&json)
}

// ─── Markdown report ────────────────────────────────────────────────

/// Generate a Markdown report for one analysis.
pub fn generate_report(report: &AnalysisReport) -> String {
    let mut md = String::with_capacity(2048);
    let s = &report.summary;

    md.push_str("# Equity Report\n\n");

    md.push_str("## Your Equity Summary\n\n");
    md.push_str("| Field | Value |\n");
    md.push_str("| --- | --- |\n");
    md.push_str(&format!("| Option Grant | {} options |\n", count(s.options_held)));
    md.push_str(&format!("| Strike Price | {} |\n", money_cents(s.strike_price)));
    md.push_str(&format!("| Exercise Cost | {} |\n", money_cents(s.exercise_cost)));
    md.push_str(&format!(
        "| Ownership | {:.4}% of {} fully diluted shares |\n",
        s.ownership_pct,
        count(s.fully_diluted_shares)
    ));
    md.push_str(&format!(
        "| Break-even Price | {} per share |\n",
        money_cents(s.break_even_price)
    ));
    if let Some(exit) = report.break_even_exit {
        md.push_str(&format!("| Break-even Exit | {} |\n", money(exit)));
    }
    md.push_str(&format!("| Cap Table | {} |\n", report.fingerprint.short(12)));
    md.push('\n');

    md.push_str("## Liquidation Preferences\n\n");
    if s.liquidation_terms.is_empty() {
        md.push_str("No preferred stock.\n");
    } else {
        for line in &s.liquidation_terms {
            md.push_str(&format!("- {line}\n"));
        }
        md.push_str(&format!(
            "\nTotal preference: {}\n",
            money(s.total_preference)
        ));
    }
    md.push('\n');

    md.push_str("## Scenario Results\n\n");
    md.push_str("| Scenario | Exit Value | Price/Share | Option Value | ROI | Converted |\n");
    md.push_str("| --- | ---: | ---: | ---: | ---: | --- |\n");
    for r in &report.results {
        let converted = if r.converted.is_empty() {
            "-".to_string()
        } else {
            r.converted.join(", ")
        };
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} |\n",
            r.scenario,
            money(r.exit_value),
            money_cents(r.price_per_share),
            money(r.option_value),
            roi(r.roi_pct),
            converted
        ));
    }
    md.push('\n');

    md.push_str(&format!(
        "## Waterfall: {}\n\n",
        report.best_waterfall.scenario
    ));
    md.push_str("| Step | Amount | Remaining |\n");
    md.push_str("| --- | ---: | ---: |\n");
    for step in &report.best_waterfall.steps {
        md.push_str(&format!(
            "| {} | {} | {} |\n",
            step.label,
            money(step.amount),
            money(step.remaining_after)
        ));
    }
    md.push('\n');

    if !report.sensitivity.is_empty() {
        md.push_str("## Sensitivity\n\n");
        md.push_str("| Multiplier | Exit Value | Price/Share | Option Value |\n");
        md.push_str("| ---: | ---: | ---: | ---: |\n");
        for p in &report.sensitivity {
            md.push_str(&format!(
                "| {}x | {} | {} | {} |\n",
                p.multiplier,
                money(p.exit_value),
                money_cents(p.price_per_share),
                money(p.option_value)
            ));
        }
        md.push('\n');
    }

    md
}
