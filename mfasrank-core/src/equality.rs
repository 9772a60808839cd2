/// Equality resolution: drop directional evidence for pairs judged mostly equal.
///
/// This is a per-pair majority vote. It is not transitive: resolving {a,b}
/// as a tie says nothing about {b,c}.
use std::collections::BTreeSet;

use crate::aggregate::{count, PairCounts};
use crate::constants::TIE_MAJORITY;
use crate::types::SystemId;

/// Delete both directed win entries of every pair whose tie fraction is at
/// least `TIE_MAJORITY`. Returns the resolved pairs as `(min, max)` tuples.
pub fn resolve_equalities(wins: &mut PairCounts, ties: &PairCounts) -> Vec<(SystemId, SystemId)> {
    let pairs: BTreeSet<(SystemId, SystemId)> = ties
        .keys()
        .map(|(a, b)| if a <= b { (a.clone(), b.clone()) } else { (b.clone(), a.clone()) })
        .collect();

    let mut resolved = Vec::new();
    for (a, b) in pairs {
        let n_eq = if a == b {
            count(ties, &a, &b)
        } else {
            count(ties, &a, &b) + count(ties, &b, &a)
        };
        let n_dir = if a == b {
            count(wins, &a, &b)
        } else {
            count(wins, &a, &b) + count(wins, &b, &a)
        };
        let fraction = n_eq as f64 / (n_eq + n_dir) as f64;

        if fraction >= TIE_MAJORITY {
            wins.remove(&(a.clone(), b.clone()));
            wins.remove(&(b.clone(), a.clone()));
            resolved.push((a, b));
        }
    }
    resolved
}
