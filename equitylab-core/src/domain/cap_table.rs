//! Common stock, the option pool, and the preferred rounds.

use serde::{Deserialize, Serialize};

use super::share_class::ShareClass;

/// The company's capitalization table, plus the option grant being analysed.
///
/// The option pool is counted as common-equivalent: pool shares take part in
/// the common distribution as if exercised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapTable {
    pub common_shares: u64,
    #[serde(default)]
    pub option_pool: u64,
    /// Options held by the holder being analysed (drawn from the pool).
    #[serde(default)]
    pub options_held: u64,
    /// Strike price per option. Values ≤ 0 mean free exercise.
    #[serde(default)]
    pub strike_price: f64,
    #[serde(default)]
    pub share_classes: Vec<ShareClass>,
}

impl CapTable {
    pub fn new(common_shares: u64, option_pool: u64) -> Self {
        Self {
            common_shares,
            option_pool,
            options_held: 0,
            strike_price: 0.0,
            share_classes: Vec::new(),
        }
    }

    pub fn with_grant(mut self, options_held: u64, strike_price: f64) -> Self {
        self.options_held = options_held;
        self.strike_price = strike_price;
        self
    }

    pub fn with_class(mut self, class: ShareClass) -> Self {
        self.share_classes.push(class);
        self
    }

    /// Total preferred shares across all rounds (as-converted).
    ///
    /// Share totals saturate at `u64::MAX`; validation rejects such tables.
    pub fn preferred_shares(&self) -> u64 {
        self.share_classes
            .iter()
            .fold(0u64, |acc, c| acc.saturating_add(c.shares))
    }

    /// Common shares plus the option pool.
    pub fn common_equivalent_shares(&self) -> u64 {
        self.common_shares.saturating_add(self.option_pool)
    }

    pub fn fully_diluted_shares(&self) -> u64 {
        self.common_equivalent_shares()
            .saturating_add(self.preferred_shares())
    }

    /// Sum of every class's liquidation preference.
    pub fn total_preference(&self) -> f64 {
        self.share_classes
            .iter()
            .map(|c| c.liquidation_preference())
            .sum()
    }

    /// Strike actually paid per option.
    pub fn effective_strike(&self) -> f64 {
        self.strike_price.max(0.0)
    }

    /// Holder's fully-diluted ownership, in percent.
    pub fn holder_stake_pct(&self) -> f64 {
        let total = self.fully_diluted_shares();
        if total == 0 {
            return 0.0;
        }
        self.options_held as f64 / total as f64 * 100.0
    }

    pub fn class(&self, name: &str) -> Option<&ShareClass> {
        self.share_classes.iter().find(|c| c.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CapTable {
        CapTable::new(6_000_000, 500_000)
            .with_grant(50_000, 0.10)
            .with_class(ShareClass::new("Seed", 2_000_000, 2_000_000.0))
            .with_class(ShareClass::new("Series A", 1_500_000, 10_000_000.0))
    }

    #[test]
    fn share_totals() {
        let table = sample();
        assert_eq!(table.preferred_shares(), 3_500_000);
        assert_eq!(table.common_equivalent_shares(), 6_500_000);
        assert_eq!(table.fully_diluted_shares(), 10_000_000);
    }

    #[test]
    fn share_totals_saturate_on_unvalidated_tables() {
        let table = CapTable::new(u64::MAX, 1)
            .with_class(ShareClass::new("A", u64::MAX, 1.0))
            .with_class(ShareClass::new("B", 1, 1.0));
        assert_eq!(table.preferred_shares(), u64::MAX);
        assert_eq!(table.common_equivalent_shares(), u64::MAX);
        assert_eq!(table.fully_diluted_shares(), u64::MAX);
    }

    #[test]
    fn holder_stake() {
        let table = sample();
        assert!((table.holder_stake_pct() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn total_preference_sums_classes() {
        assert_eq!(sample().total_preference(), 12_000_000.0);
    }

    #[test]
    fn negative_strike_is_free_exercise() {
        let table = CapTable::new(1, 0).with_grant(1, -0.5);
        assert_eq!(table.effective_strike(), 0.0);
    }

    #[test]
    fn class_lookup_by_name() {
        let table = sample();
        assert_eq!(table.class("Series A").map(|c| c.shares), Some(1_500_000));
        assert!(table.class("Series Z").is_none());
    }
}
