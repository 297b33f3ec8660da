//! End-to-end analysis scenarios driven from TOML.

use equitylab_runner::{run_analysis, AnalysisConfig, AnalysisError, ConfigError};

const STACKED: &str = r#"
[cap_table]
common_shares = 5000000
option_pool = 500000
options_held = 50000
strike_price = 0.10

[[share_class]]
name = "Seed"
shares = 2000000
invested = 2000000

[[share_class]]
name = "Series A"
shares = 1500000
invested = 10000000
seniority = 1

[[share_class]]
name = "Series B"
shares = 1000000
invested = 20000000
seniority = 2

[[scenario]]
name = "Fire sale"
proceeds = 25000000

[[scenario]]
name = "Base"
proceeds = 50000000

[sensitivity]
multipliers = [0.5, 1.0, 2.0]
"#;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-6 * b.abs().max(1.0)
}

#[test]
fn fire_sale_leaves_options_worthless() {
    let report = run_analysis(&AnalysisConfig::from_toml(STACKED).unwrap()).unwrap();
    let fire_sale = &report.results[0];
    assert_eq!(fire_sale.option_value, 0.0);
    assert_eq!(fire_sale.common_proceeds, 0.0);
    assert_eq!(fire_sale.roi_pct, Some(0.0));
}

#[test]
fn base_case_values_grant() {
    let report = run_analysis(&AnalysisConfig::from_toml(STACKED).unwrap()).unwrap();
    assert_eq!(report.best().scenario, "Base");

    // 18M residual after 32M preferences; Seed converts at $1/share.
    let price = 20_000_000.0 / 7_500_000.0;
    assert!(approx(report.best().price_per_share, price));
    assert!(approx(report.best().option_value, (price - 0.10) * 50_000.0));
    assert_eq!(report.best().converted, vec!["Seed".to_string()]);
}

#[test]
fn summary_and_break_even() {
    let report = run_analysis(&AnalysisConfig::from_toml(STACKED).unwrap()).unwrap();
    assert_eq!(report.summary.total_preference, 32_000_000.0);
    assert_eq!(report.summary.fully_diluted_shares, 10_000_000);

    // Common price clears $0.10 once 0.10 × 5.5M = 550K is left after preferences.
    let exit = report.break_even_exit.unwrap();
    assert!((exit - 32_550_000.0).abs() <= 1.0, "got {exit}");
}

#[test]
fn sensitivity_uses_configured_multipliers() {
    let report = run_analysis(&AnalysisConfig::from_toml(STACKED).unwrap()).unwrap();
    let exits: Vec<f64> = report.sensitivity.iter().map(|p| p.exit_value).collect();
    assert_eq!(exits, vec![25_000_000.0, 50_000_000.0, 100_000_000.0]);
}

#[test]
fn no_scenarios_is_an_error() {
    let toml = "[cap_table]\ncommon_shares = 1000\n";
    let err = run_analysis(&AnalysisConfig::from_toml(toml).unwrap()).unwrap_err();
    assert!(matches!(err, AnalysisError::NoScenarios));
}

#[test]
fn duplicate_class_names_rejected() {
    let toml = STACKED.replace("name = \"Series B\"", "name = \"Seed\"");
    let err = run_analysis(&AnalysisConfig::from_toml(&toml).unwrap()).unwrap_err();
    assert!(matches!(err, AnalysisError::Config(ConfigError::Invalid(_))));
    assert!(err.to_string().contains("duplicate share class name 'Seed'"));
}

#[test]
fn free_grant_under_water_charts_zero_roi() {
    let toml = STACKED.replace("strike_price = 0.10", "strike_price = 0.0");
    let report = run_analysis(&AnalysisConfig::from_toml(&toml).unwrap()).unwrap();

    let fire_sale = &report.results[0];
    assert_eq!(fire_sale.option_value, 0.0);
    assert_eq!(fire_sale.roi_pct, Some(0.0));
    assert_eq!(report.series.roi_pct[0], 0.0);

    // Base has value and no exercise cost: unbounded ROI.
    assert_eq!(report.results[1].roi_pct, None);
    assert_eq!(report.series.roi_pct[1], equitylab_runner::series::ROI_DISPLAY_CAP);
}
