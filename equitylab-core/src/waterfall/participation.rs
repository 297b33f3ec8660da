//! Residual sharing among common, participating, and converted stock.

/// A holder of residual proceeds.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Participant {
    pub shares: u64,
    /// Most this participant may still receive, if capped.
    pub headroom: Option<f64>,
}

#[derive(Debug, Clone)]
pub(crate) struct ResidualSplit {
    /// Indexed like the participants slice.
    pub amounts: Vec<f64>,
    pub capped: Vec<bool>,
    /// Residual nobody could absorb (every remaining participant capped).
    pub leftover: f64,
}

/// Share `residual` pro-rata by share count, honouring caps.
///
/// A participant whose pro-rata amount would exceed its headroom receives the
/// headroom instead and drops out; the excess is re-shared among the rest.
/// Raising the price only ever pushes more participants over their caps, so
/// each round caps at least one participant or terminates.
pub(crate) fn share_residual(participants: &[Participant], residual: f64) -> ResidualSplit {
    let n = participants.len();
    let mut amounts = vec![0.0; n];
    let mut capped = vec![false; n];
    let mut active: Vec<usize> = (0..n).filter(|&i| participants[i].shares > 0).collect();
    let mut pool = residual.max(0.0);

    while pool > 0.0 {
        let total_shares: u64 = active.iter().map(|&i| participants[i].shares).sum();
        if total_shares == 0 {
            break;
        }
        let price = pool / total_shares as f64;

        let newly_capped: Vec<usize> = active
            .iter()
            .copied()
            .filter(|&i| {
                participants[i]
                    .headroom
                    .is_some_and(|h| price * participants[i].shares as f64 > h)
            })
            .collect();

        if newly_capped.is_empty() {
            for &i in &active {
                amounts[i] = price * participants[i].shares as f64;
            }
            pool = 0.0;
            break;
        }

        for &i in &newly_capped {
            let headroom = participants[i].headroom.unwrap_or(0.0).max(0.0);
            amounts[i] = headroom;
            capped[i] = true;
            pool -= headroom;
        }
        active.retain(|i| !capped[*i]);
        pool = pool.max(0.0);
    }

    ResidualSplit {
        amounts,
        capped,
        leftover: pool,
    }
}
