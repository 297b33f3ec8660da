//! Sensitivity sweeps and break-even search.
//!
//! A sweep rescales one exit scenario by a list of multipliers and values the
//! option grant at each point. The break-even search finds the smallest exit
//! at which the common price clears the strike.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use equitylab_core::{compute_validated, value_options, CapTable, ExitScenario};

/// Multipliers applied to the best scenario when none are configured.
pub const DEFAULT_MULTIPLIERS: [f64; 6] = [0.5, 0.75, 1.0, 1.25, 1.5, 2.0];

/// Break-even search stops once the bracket is narrower than this (dollars).
pub const BREAK_EVEN_RESOLUTION: f64 = 1.0;

/// How many times the bracket may double past the total preference.
const MAX_DOUBLINGS: u32 = 64;

/// One point of a sensitivity sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityPoint {
    pub multiplier: f64,
    pub exit_value: f64,
    pub price_per_share: f64,
    pub option_value: f64,
}

/// Value the grant at `base.proceeds × m` for each multiplier.
///
/// The table and multipliers must already be validated.
pub fn sweep(table: &CapTable, base: &ExitScenario, multipliers: &[f64]) -> Vec<SensitivityPoint> {
    multipliers
        .par_iter()
        .map(|&m| {
            let scenario = base.scaled(m);
            let waterfall = compute_validated(table, &scenario);
            let value = value_options(table, &waterfall);
            SensitivityPoint {
                multiplier: m,
                exit_value: scenario.proceeds,
                price_per_share: waterfall.price_per_common_share,
                option_value: value.total_value,
            }
        })
        .collect()
}

fn price_at(table: &CapTable, proceeds: f64) -> f64 {
    compute_validated(table, &ExitScenario::new("break-even", proceeds)).price_per_common_share
}

/// Smallest exit value (to within [`BREAK_EVEN_RESOLUTION`]) at which the
/// common price exceeds the effective strike.
///
/// Common price is non-decreasing in proceeds, so bisection applies. The
/// bracket starts at the total preference and doubles; returns `None` if the
/// strike is still not cleared after 64 doublings.
pub fn break_even_exit(table: &CapTable) -> Option<f64> {
    let strike = table.effective_strike();

    let mut lo = 0.0_f64;
    let mut hi = table.total_preference().max(1.0);
    let mut doublings = 0u32;
    while price_at(table, hi) <= strike {
        if doublings == MAX_DOUBLINGS {
            debug!(strike, bound = hi, "break-even exit not found below bound");
            return None;
        }
        lo = hi;
        hi *= 2.0;
        doublings += 1;
    }

    // Above 2^53 adjacent f64 values are more than $1 apart.
    let resolution = BREAK_EVEN_RESOLUTION.max(hi * 4.0 * f64::EPSILON);
    let mut iterations = 0u32;
    while hi - lo > resolution {
        let mid = lo + (hi - lo) / 2.0;
        if price_at(table, mid) > strike {
            hi = mid;
        } else {
            lo = mid;
        }
        iterations += 1;
    }

    debug!(strike, exit = hi, iterations, "break-even exit found");
    Some(hi)
}
