/// Tournament reduction: at most one directed, positively weighted edge per pair.
use std::collections::BTreeSet;

use crate::aggregate::PairCounts;
use crate::types::SystemId;

/// Reduced weighted digraph for one item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tournament {
    edges: PairCounts,
}

impl Tournament {
    /// Collapse opposing edges into their net margin.
    ///
    /// A pair with evidence in both directions keeps a single edge in the
    /// winning direction weighted by the difference, or no edge when the
    /// difference is zero. One-directional pairs pass through. Self pairs
    /// always cancel.
    pub fn reduce(wins: &PairCounts) -> Self {
        let mut edges = PairCounts::new();
        for ((a, b), &ab) in wins {
            if ab == 0 {
                continue;
            }
            match wins.get(&(b.clone(), a.clone())) {
                Some(&ba) => {
                    if ab > ba {
                        edges.insert((a.clone(), b.clone()), ab - ba);
                    }
                    // ab < ba is handled when the loop reaches (b, a)
                }
                None => {
                    edges.insert((a.clone(), b.clone()), ab);
                }
            }
        }
        Tournament { edges }
    }

    /// Build from `(tail, head, weight)` triples, reducing them like win counts.
    pub fn from_edges<I, S>(edges: I) -> Self
    where
        I: IntoIterator<Item = (S, S, u32)>,
        S: Into<SystemId>,
    {
        let wins: PairCounts = edges
            .into_iter()
            .map(|(a, b, w)| ((a.into(), b.into()), w))
            .collect();
        Self::reduce(&wins)
    }

    pub fn edges(&self) -> &PairCounts {
        &self.edges
    }

    /// Weight of edge `tail -> head`, if present.
    pub fn weight(&self, tail: &str, head: &str) -> Option<u32> {
        self.edges.get(&(tail.to_string(), head.to_string())).copied()
    }

    /// True when a positively weighted edge joins `a` and `b` in either direction.
    pub fn connects(&self, a: &str, b: &str) -> bool {
        self.weight(a, b).unwrap_or(0) > 0 || self.weight(b, a).unwrap_or(0) > 0
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Every endpoint of every edge.
    pub fn vertices(&self) -> BTreeSet<&SystemId> {
        self.edges.keys().flat_map(|(a, b)| [a, b]).collect()
    }

    /// Sum of weights of edges pointing backward in `ranking` (head ranked
    /// before tail). Edges with an endpoint outside `ranking` are ignored.
    pub fn feedback_cost(&self, ranking: &[SystemId]) -> u64 {
        let position = |id: &str| ranking.iter().position(|v| v == id);
        self.edges
            .iter()
            .filter_map(|((tail, head), &w)| match (position(tail.as_str()), position(head.as_str())) {
                (Some(t), Some(h)) if h < t => Some(w as u64),
                _ => None,
            })
            .sum()
    }
}
