//! Liquidation preferences, paid by descending seniority.

use crate::domain::ShareClass;

/// Class indices grouped by seniority, most senior group first.
///
/// Within a group, classes keep their cap table order. Classes flagged in
/// `skip` (converted to common) are left out.
pub(crate) fn seniority_groups(classes: &[ShareClass], skip: &[bool]) -> Vec<Vec<usize>> {
    let mut order: Vec<usize> = (0..classes.len()).filter(|&i| !skip[i]).collect();
    order.sort_by(|&a, &b| classes[b].seniority.cmp(&classes[a].seniority));

    let mut groups: Vec<Vec<usize>> = Vec::new();
    for i in order {
        match groups.last_mut() {
            Some(group) if classes[group[0]].seniority == classes[i].seniority => group.push(i),
            _ => groups.push(vec![i]),
        }
    }
    groups
}

/// Pay each group's preferences out of `proceeds`.
///
/// Returns the preference paid per class (indexed like `classes`) and the
/// proceeds left afterwards. A group that cannot be paid in full splits what
/// remains pro-rata to each member's preference; every junior group then
/// receives nothing.
pub(crate) fn pay_preferences(
    classes: &[ShareClass],
    converted: &[bool],
    proceeds: f64,
) -> (Vec<f64>, f64) {
    let mut paid = vec![0.0; classes.len()];
    let mut remaining = proceeds;

    for group in seniority_groups(classes, converted) {
        let owed: f64 = group
            .iter()
            .map(|&i| classes[i].liquidation_preference())
            .sum();
        if owed <= 0.0 {
            continue;
        }

        if remaining >= owed {
            for &i in &group {
                paid[i] = classes[i].liquidation_preference();
            }
            remaining -= owed;
        } else {
            for &i in &group {
                paid[i] = remaining * classes[i].liquidation_preference() / owed;
            }
            remaining = 0.0;
        }
    }

    (paid, remaining.max(0.0))
}
