/// Judgment aggregation: tally raw judgments for one item into per-pair counts.
use std::collections::{BTreeMap, BTreeSet};

use crate::types::{Judgment, SystemId};

/// Count per ordered pair `(a, b)`.
pub type PairCounts = BTreeMap<(SystemId, SystemId), u32>;

/// Aggregated evidence for one item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    /// `wins[(a, b)]`: judgments where `a` beat `b`.
    pub wins: PairCounts,
    /// `ties[(a, b)]`: equality judgments, keyed as stored on the judgment.
    /// Consumers sum both orderings of a pair.
    pub ties: PairCounts,
    /// Every system seen in any judgment, sorted.
    pub vertices: BTreeSet<SystemId>,
}

impl Tally {
    pub fn from_judgments(judgments: &[Judgment]) -> Self {
        let mut tally = Tally::default();
        for judgment in judgments {
            tally.add(judgment);
        }
        tally
    }

    pub fn add(&mut self, judgment: &Judgment) {
        self.vertices.insert(judgment.winner.clone());
        self.vertices.insert(judgment.loser.clone());

        let key = (judgment.winner.clone(), judgment.loser.clone());
        let counts = if judgment.is_equal() { &mut self.ties } else { &mut self.wins };
        *counts.entry(key).or_insert(0) += 1;
    }

    /// Sorted vertex list, the stable index order for the solver.
    pub fn vertex_list(&self) -> Vec<SystemId> {
        self.vertices.iter().cloned().collect()
    }
}

/// Count for `(a, b)`, 0 when absent.
pub(crate) fn count(counts: &PairCounts, a: &str, b: &str) -> u32 {
    counts.get(&(a.to_string(), b.to_string())).copied().unwrap_or(0)
}
