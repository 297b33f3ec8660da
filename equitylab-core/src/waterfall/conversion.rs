//! Conversion elections for non-participating and capped participating stock.

use crate::domain::{CapTable, Participation, ShareClass};

use super::distribute;

/// Gains smaller than this are not worth converting for.
const CONVERSION_TOLERANCE: f64 = 1e-6;

/// Common price per share above which converting pays the class more.
///
/// Non-participating stock gives up its preference; capped participating
/// stock gives up its cap.
fn conversion_threshold(class: &ShareClass) -> f64 {
    if class.shares == 0 {
        return f64::INFINITY;
    }
    match class.participation {
        Participation::NonParticipating => class.preference_per_share(),
        Participation::Participating { .. } => class
            .cap_amount()
            .map_or(f64::INFINITY, |cap| cap / class.shares as f64),
    }
}

/// Decide which classes convert to common at this exit.
///
/// Candidates are tried cheapest-threshold first; a class converts when a full
/// recompute with it converted pays it strictly more. Each conversion only
/// lowers the common price towards the converting class's threshold, so
/// classes that already converted keep preferring conversion. Passes repeat
/// until none converts.
pub(crate) fn resolve_conversions(table: &CapTable, proceeds: f64) -> Vec<bool> {
    let classes = &table.share_classes;
    let mut candidates: Vec<usize> = (0..classes.len())
        .filter(|&i| classes[i].may_convert() && classes[i].shares > 0)
        .collect();
    candidates.sort_by(|&a, &b| {
        conversion_threshold(&classes[a]).total_cmp(&conversion_threshold(&classes[b]))
    });

    let mut converted = vec![false; classes.len()];
    if proceeds <= 0.0 || candidates.is_empty() {
        return converted;
    }

    let mut current = distribute(table, proceeds, &converted);
    loop {
        let mut changed = false;
        for &i in &candidates {
            if converted[i] {
                continue;
            }
            let mut trial = converted.clone();
            trial[i] = true;
            let outcome = distribute(table, proceeds, &trial);
            if outcome.class_total(i) > current.class_total(i) + CONVERSION_TOLERANCE {
                converted = trial;
                current = outcome;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
    converted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_uses_preference_for_non_participating() {
        let class = ShareClass::new("A", 1_000_000, 2_000_000.0);
        assert_eq!(conversion_threshold(&class), 2.0);
    }

    #[test]
    fn threshold_uses_cap_for_capped_participating() {
        let class = ShareClass::new("A", 1_000_000, 2_000_000.0).participating_capped(3.0);
        assert_eq!(conversion_threshold(&class), 6.0);
    }

    #[test]
    fn uncapped_participating_never_a_candidate() {
        let table = CapTable::new(1_000, 0).with_class(ShareClass::new("P", 1_000, 1.0).participating());
        assert_eq!(resolve_conversions(&table, 1e12), vec![false]);
    }

    #[test]
    fn converts_only_above_threshold() {
        let table = CapTable::new(8_000_000, 0)
            .with_class(ShareClass::new("Series A", 1_000_000, 1_000_000.0));
        // Threshold is $1/share: below 9M exit the preference wins.
        assert_eq!(resolve_conversions(&table, 8_000_000.0), vec![false]);
        assert_eq!(resolve_conversions(&table, 10_000_000.0), vec![true]);
    }

    #[test]
    fn cheaper_class_converts_first() {
        let table = CapTable::new(1_000_000, 0)
            .with_class(ShareClass::new("Cheap", 1_000_000, 500_000.0))
            .with_class(ShareClass::new("Pricey", 1_000_000, 5_000_000.0));
        // Residual after both preferences is 1.5M, so common trades at $1.50:
        // above Cheap's $0.50 threshold, below Pricey's $5.
        let converted = resolve_conversions(&table, 7_000_000.0);
        assert_eq!(converted, vec![true, false]);
    }

    #[test]
    fn nothing_converts_at_zero() {
        let table = CapTable::new(10, 0).with_class(ShareClass::new("A", 10, 0.0));
        assert_eq!(resolve_conversions(&table, 0.0), vec![false]);
    }
}
