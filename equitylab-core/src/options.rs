//! Option valuation for the holder of a common-stock option grant.

use serde::{Deserialize, Serialize};

use crate::domain::CapTable;
use crate::waterfall::WaterfallResult;

/// Value of an option grant at one exit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionValue {
    pub options: u64,
    /// Strike actually paid (negative strikes clamp to zero).
    pub strike: f64,
    pub price_per_share: f64,
    /// `max(0, price - strike)`.
    pub spread_per_option: f64,
    /// Spread times options held; already net of the strike.
    pub total_value: f64,
    /// Cash needed to exercise the whole grant.
    pub exercise_cost: f64,
    /// `total_value / exercise_cost` in percent. `None` when exercise is free
    /// and the grant has value (unbounded return); zero for a worthless grant.
    pub roi_pct: Option<f64>,
}

impl OptionValue {
    pub fn is_in_the_money(&self) -> bool {
        self.spread_per_option > 0.0
    }
}

/// Intrinsic value of `options` options: `max(0, price - strike) × options`.
pub fn intrinsic_value(price_per_share: f64, strike: f64, options: u64) -> f64 {
    (price_per_share - strike.max(0.0)).max(0.0) * options as f64
}

/// Value the table's option grant against a computed waterfall.
pub fn value_options(table: &CapTable, waterfall: &WaterfallResult) -> OptionValue {
    let strike = table.effective_strike();
    let price = waterfall.price_per_common_share;
    let spread = (price - strike).max(0.0);
    let total_value = spread * table.options_held as f64;
    let exercise_cost = strike * table.options_held as f64;
    let roi_pct = if exercise_cost > 0.0 {
        Some(total_value / exercise_cost * 100.0)
    } else if total_value > 0.0 {
        None
    } else {
        Some(0.0)
    };

    OptionValue {
        options: table.options_held,
        strike,
        price_per_share: price,
        spread_per_option: spread,
        total_value,
        exercise_cost,
        roi_pct,
    }
}
