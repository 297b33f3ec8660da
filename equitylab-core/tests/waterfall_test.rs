//! Waterfall scenarios: reference cap tables with hand-checked payouts.

use equitylab_core::{
    compute, value_options, CalcError, CapTable, ConfigurationError, ExitScenario,
    InputValidationError, PayoutKind, ShareClass,
};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-6 * b.abs().max(1.0)
}

/// 8M common, 1M Series A (1x non-participating, $1M invested).
fn series_a_table() -> CapTable {
    CapTable::new(8_000_000, 0).with_class(ShareClass::new("Series A", 1_000_000, 1_000_000.0))
}

/// Seed / Series A / Series B stacked by seniority, with an option pool.
fn three_round_table() -> CapTable {
    CapTable::new(5_000_000, 500_000)
        .with_grant(50_000, 0.10)
        .with_class(ShareClass::new("Seed", 2_000_000, 2_000_000.0).with_seniority(0))
        .with_class(ShareClass::new("Series A", 1_500_000, 10_000_000.0).with_seniority(1))
        .with_class(ShareClass::new("Series B", 1_000_000, 20_000_000.0).with_seniority(2))
}

// ── Conversion ──────────────────────────────────────────────────────

#[test]
fn series_a_converts_at_ten_million() {
    let result = compute(&series_a_table(), &ExitScenario::new("Base", 10_000_000.0)).unwrap();
    let a = result.class("Series A").unwrap();

    assert!(a.converted);
    assert_eq!(a.preference, 0.0);
    assert!(approx(a.total(), 10_000_000.0 / 9.0)); // $1,111,111.11
    assert!(approx(result.common_payout, 80_000_000.0 / 9.0));
    assert!(approx(result.total_distributed(), 10_000_000.0));
}

#[test]
fn series_a_keeps_preference_at_five_million() {
    let result = compute(&series_a_table(), &ExitScenario::new("Low", 5_000_000.0)).unwrap();
    let a = result.class("Series A").unwrap();

    assert!(!a.converted);
    assert_eq!(a.total(), 1_000_000.0);
    assert_eq!(result.common_payout, 4_000_000.0);
    assert_eq!(result.price_per_common_share, 0.5);
}

#[test]
fn non_participating_payout_is_max_of_preference_and_conversion() {
    let table = series_a_table();
    for exit in [0.5e6, 1e6, 4e6, 9e6, 9.5e6, 20e6, 100e6] {
        let result = compute(&table, &ExitScenario::new("x", exit)).unwrap();
        let a = result.class("Series A").unwrap();
        let preference = 1_000_000.0_f64.min(exit);
        let as_converted = exit / 9.0;
        assert!(
            approx(a.total(), preference.max(as_converted)),
            "exit {exit}: got {}, expected {}",
            a.total(),
            preference.max(as_converted)
        );
    }
}

// ── Seniority ───────────────────────────────────────────────────────

#[test]
fn shortfall_wipes_out_junior_classes_and_common() {
    let result = compute(&three_round_table(), &ExitScenario::new("Fire sale", 25_000_000.0)).unwrap();

    assert_eq!(result.class("Series B").unwrap().total(), 20_000_000.0);
    assert_eq!(result.class("Series A").unwrap().total(), 5_000_000.0);
    assert_eq!(result.class("Seed").unwrap().total(), 0.0);
    assert_eq!(result.common_payout, 0.0);

    let option = value_options(&three_round_table(), &result);
    assert_eq!(option.total_value, 0.0);
}

#[test]
fn preferences_paid_in_seniority_order() {
    let result = compute(&three_round_table(), &ExitScenario::new("Base", 50_000_000.0)).unwrap();
    let pref_labels: Vec<&str> = result
        .steps
        .iter()
        .filter(|s| s.kind == PayoutKind::Preference)
        .map(|s| s.label.as_str())
        .collect();
    assert_eq!(
        pref_labels,
        vec!["Series B (Pref)", "Series A (Pref)", "Seed (Pref)"]
    );
}

#[test]
fn base_case_common_price_and_option_value() {
    // 50M - 32M preferences = 18M; Seed ($1/share) converts:
    // (18M + 2M) / (5.5M + 2M) = $2.6667/share.
    let table = three_round_table();
    let result = compute(&table, &ExitScenario::new("Base", 50_000_000.0)).unwrap();

    let seed = result.class("Seed").unwrap();
    assert!(seed.converted);
    assert!(!result.class("Series A").unwrap().converted);
    assert!(!result.class("Series B").unwrap().converted);

    let price = 20_000_000.0 / 7_500_000.0;
    assert!(approx(result.price_per_common_share, price));

    let option = value_options(&table, &result);
    assert!(approx(option.total_value, (price - 0.10) * 50_000.0));
}

#[test]
fn pari_passu_classes_share_a_shortfall() {
    let table = CapTable::new(1_000_000, 0)
        .with_class(ShareClass::new("A", 1_000_000, 6_000_000.0).with_seniority(1))
        .with_class(ShareClass::new("B", 1_000_000, 2_000_000.0).with_seniority(1));
    let result = compute(&table, &ExitScenario::new("Thin", 4_000_000.0)).unwrap();

    assert_eq!(result.class("A").unwrap().total(), 3_000_000.0);
    assert_eq!(result.class("B").unwrap().total(), 1_000_000.0);
    assert_eq!(result.common_payout, 0.0);
}

// ── Participation ───────────────────────────────────────────────────

#[test]
fn participating_double_dips() {
    let table = CapTable::new(8_000_000, 0)
        .with_class(ShareClass::new("Series A", 2_000_000, 5_000_000.0).participating());
    let result = compute(&table, &ExitScenario::new("Base", 25_000_000.0)).unwrap();
    let a = result.class("Series A").unwrap();

    assert_eq!(a.preference, 5_000_000.0);
    assert!(approx(a.participation, 4_000_000.0)); // 20M × 2/10
    assert!(approx(result.common_payout, 16_000_000.0));
    assert!(!a.converted);
}

#[test]
fn participation_cap_is_never_exceeded_without_conversion() {
    let table = CapTable::new(8_000_000, 0).with_class(
        ShareClass::new("Series A", 2_000_000, 5_000_000.0).participating_capped(2.0),
    );
    for exit in [6e6, 10e6, 20e6, 40e6, 49e6, 51e6, 80e6] {
        let result = compute(&table, &ExitScenario::new("x", exit)).unwrap();
        let a = result.class("Series A").unwrap();
        if !a.converted {
            assert!(a.total() <= 10_000_000.0 + 1e-6, "exit {exit}: {}", a.total());
        } else {
            // Converting only happens once the as-converted share beats the cap.
            assert!(a.total() > 10_000_000.0);
        }
    }
}

#[test]
fn multiple_applies_to_preference() {
    let table = CapTable::new(1_000_000, 0)
        .with_class(ShareClass::new("Series B", 1_000_000, 2_000_000.0).with_multiple(2.0));
    let result = compute(&table, &ExitScenario::new("Mid", 5_000_000.0)).unwrap();
    assert_eq!(result.class("Series B").unwrap().total(), 4_000_000.0);
    assert_eq!(result.common_payout, 1_000_000.0);
}

// ── Edge cases ──────────────────────────────────────────────────────

#[test]
fn zero_proceeds_pay_nothing() {
    let table = three_round_table();
    let result = compute(&table, &ExitScenario::new("Zero", 0.0)).unwrap();

    assert!(result.classes.iter().all(|c| c.total() == 0.0));
    assert_eq!(result.common_payout, 0.0);
    assert_eq!(result.price_per_common_share, 0.0);
    assert_eq!(value_options(&table, &result).total_value, 0.0);
}

#[test]
fn strike_above_price_is_worthless() {
    let table = CapTable::new(8_000_000, 100_000)
        .with_grant(10_000, 5.0)
        .with_class(ShareClass::new("Series A", 1_000_000, 1_000_000.0));
    let result = compute(&table, &ExitScenario::new("Base", 10_000_000.0)).unwrap();
    assert!(result.price_per_common_share < 5.0);
    assert_eq!(value_options(&table, &result).total_value, 0.0);
}

#[test]
fn negative_strike_means_free_exercise() {
    let table = CapTable::new(900_000, 100_000).with_grant(1_000, -3.0);
    let result = compute(&table, &ExitScenario::new("Base", 2_000_000.0)).unwrap();
    let option = value_options(&table, &result);
    assert_eq!(option.strike, 0.0);
    assert_eq!(option.total_value, 2_000.0);
    assert_eq!(option.exercise_cost, 0.0);
}

// ── Errors ──────────────────────────────────────────────────────────

#[test]
fn negative_proceeds_rejected() {
    let err = compute(&series_a_table(), &ExitScenario::new("Bad", -1.0)).unwrap_err();
    assert!(matches!(
        err,
        CalcError::Input(InputValidationError::Negative { .. })
    ));
}

#[test]
fn options_beyond_pool_rejected() {
    let table = CapTable::new(1_000_000, 10_000).with_grant(20_000, 0.1);
    let err = compute(&table, &ExitScenario::new("Base", 1.0)).unwrap_err();
    assert!(matches!(
        err,
        CalcError::Configuration(ConfigurationError::OptionsExceedPool { .. })
    ));
    assert_eq!(
        err.to_string(),
        "invalid configuration: options held (20000) exceed the option pool (10000)"
    );
}
