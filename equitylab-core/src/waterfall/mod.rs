//! Liquidation waterfall — how exit proceeds flow through the cap table.
//!
//! Three phases per exit:
//! 1. **Preferences**: non-converted classes are paid by descending seniority;
//!    equal seniority is pari passu.
//! 2. **Residual**: what is left is shared pro-rata by share count among
//!    common-equivalent shares, participating classes, and converted classes,
//!    with participation caps enforced.
//! 3. **Conversion**: non-participating and capped participating classes
//!    convert to common when that pays them more (resolved before 1 and 2 are
//!    run for the final result).

mod conversion;
mod participation;
mod preference;
mod result;

pub use result::{ClassPayout, PayoutKind, PayoutStep, WaterfallResult};

use crate::domain::{CapTable, ExitScenario, Participation};
use crate::error::CalcError;
use crate::validate::{validate_cap_table, validate_scenario};

use participation::{share_residual, Participant};
use preference::{pay_preferences, seniority_groups};

/// Raw amounts for one set of conversion elections.
#[derive(Debug, Clone)]
pub(crate) struct Distribution {
    pub preference: Vec<f64>,
    pub participation: Vec<f64>,
    pub capped: Vec<bool>,
    pub common: f64,
    pub leftover: f64,
}

impl Distribution {
    pub fn class_total(&self, i: usize) -> f64 {
        self.preference[i] + self.participation[i]
    }
}

/// Run preferences then residual sharing with the given classes converted.
pub(crate) fn distribute(table: &CapTable, proceeds: f64, converted: &[bool]) -> Distribution {
    let classes = &table.share_classes;
    let (preference, residual) = pay_preferences(classes, converted, proceeds);

    // Participant 0 is common; class i sits at slot[i] when it shares the residual.
    let mut participants = vec![Participant {
        shares: table.common_equivalent_shares(),
        headroom: None,
    }];
    let mut slot = vec![None; classes.len()];
    for (i, class) in classes.iter().enumerate() {
        let headroom = if converted[i] {
            None
        } else {
            match class.participation {
                Participation::NonParticipating => continue,
                Participation::Participating { .. } => class
                    .cap_amount()
                    .map(|cap| (cap - preference[i]).max(0.0)),
            }
        };
        slot[i] = Some(participants.len());
        participants.push(Participant {
            shares: class.shares,
            headroom,
        });
    }

    let split = share_residual(&participants, residual);
    let participation = slot
        .iter()
        .map(|s| s.map_or(0.0, |p| split.amounts[p]))
        .collect();
    let capped = slot
        .iter()
        .map(|s| s.is_some_and(|p| split.capped[p]))
        .collect();

    Distribution {
        preference,
        participation,
        capped,
        common: split.amounts[0],
        leftover: split.leftover,
    }
}

/// Compute how `scenario`'s proceeds distribute across `table`.
///
/// Validates both inputs first; a zero exit yields an all-zero result.
pub fn compute(table: &CapTable, scenario: &ExitScenario) -> Result<WaterfallResult, CalcError> {
    validate_cap_table(table)?;
    validate_scenario(scenario)?;
    Ok(compute_validated(table, scenario))
}

/// Compute several scenarios against one table, validating the table once.
pub fn compute_all(
    table: &CapTable,
    scenarios: &[ExitScenario],
) -> Result<Vec<WaterfallResult>, CalcError> {
    validate_cap_table(table)?;
    scenarios
        .iter()
        .map(|s| {
            validate_scenario(s)?;
            Ok(compute_validated(table, s))
        })
        .collect()
}

/// Compute without validation. Callers must have validated both inputs.
pub fn compute_validated(table: &CapTable, scenario: &ExitScenario) -> WaterfallResult {
    let proceeds = scenario.proceeds;
    let converted = conversion::resolve_conversions(table, proceeds);
    let dist = distribute(table, proceeds, &converted);
    build_result(table, scenario, &converted, &dist)
}

fn build_result(
    table: &CapTable,
    scenario: &ExitScenario,
    converted: &[bool],
    dist: &Distribution,
) -> WaterfallResult {
    let classes = &table.share_classes;
    let mut steps = Vec::new();
    let mut remaining = scenario.proceeds;

    let mut push_step = |label: String, kind: PayoutKind, amount: f64| {
        remaining = (remaining - amount).max(0.0);
        steps.push(PayoutStep {
            label,
            kind,
            amount,
            remaining_after: remaining,
        });
    };

    for group in seniority_groups(classes, converted) {
        for i in group {
            if classes[i].liquidation_preference() > 0.0 {
                push_step(
                    format!("{} (Pref)", classes[i].name),
                    PayoutKind::Preference,
                    dist.preference[i],
                );
            }
        }
    }
    for (i, class) in classes.iter().enumerate() {
        if converted[i] {
            push_step(
                format!("{} (Conv.)", class.name),
                PayoutKind::Conversion,
                dist.participation[i],
            );
        } else if class.participation.is_participating() {
            push_step(
                format!("{} (Part.)", class.name),
                PayoutKind::Participation,
                dist.participation[i],
            );
        }
    }
    push_step("Common".into(), PayoutKind::Common, dist.common);

    let payouts = classes
        .iter()
        .enumerate()
        .map(|(i, class)| ClassPayout {
            name: class.name.clone(),
            shares: class.shares,
            preference: dist.preference[i],
            participation: dist.participation[i],
            converted: converted[i],
            capped: dist.capped[i],
        })
        .collect();

    let common_shares = table.common_equivalent_shares();
    let price_per_common_share = if common_shares == 0 {
        0.0
    } else {
        dist.common / common_shares as f64
    };

    WaterfallResult {
        scenario: scenario.name.clone(),
        proceeds: scenario.proceeds,
        classes: payouts,
        common_payout: dist.common,
        price_per_common_share,
        undistributed: dist.leftover,
        steps,
    }
}
