//! Cap table summary for the option holder.

use serde::{Deserialize, Serialize};

use equitylab_core::CapTable;

/// Static facts about a cap table, independent of any exit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapTableSummary {
    pub common_shares: u64,
    pub option_pool: u64,
    pub preferred_shares: u64,
    pub fully_diluted_shares: u64,
    pub options_held: u64,
    pub strike_price: f64,
    /// Options held as a percentage of fully diluted shares.
    pub ownership_pct: f64,
    /// Cash needed to exercise the whole grant.
    pub exercise_cost: f64,
    pub total_preference: f64,
    /// Per-share price at which the grant starts to have value.
    pub break_even_price: f64,
    /// One line per share class, e.g. "Seed: 1x Non-Participating".
    pub liquidation_terms: Vec<String>,
}

impl CapTableSummary {
    pub fn from_table(table: &CapTable) -> Self {
        let strike = table.effective_strike();
        Self {
            common_shares: table.common_shares,
            option_pool: table.option_pool,
            preferred_shares: table.preferred_shares(),
            fully_diluted_shares: table.fully_diluted_shares(),
            options_held: table.options_held,
            strike_price: table.strike_price,
            ownership_pct: table.holder_stake_pct(),
            exercise_cost: strike * table.options_held as f64,
            total_preference: table.total_preference(),
            break_even_price: strike,
            liquidation_terms: table
                .share_classes
                .iter()
                .filter(|c| c.shares > 0)
                .map(|c| c.terms())
                .collect(),
        }
    }
}
