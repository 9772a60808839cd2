/// Per-item ranking pipeline.
///
/// Aggregate -> resolve equalities -> reduce -> solve -> mark ties -> rows.
/// Pure function of the judgments; no state survives between items.
use tracing::debug;

use crate::aggregate::Tally;
use crate::constants::{DEFAULT_MAX_VERTICES, MAX_VERTICES};
use crate::equality::resolve_equalities;
use crate::error::{RankError, Result};
use crate::rows::build_rows;
use crate::solver::solve;
use crate::ties::mark_ties;
use crate::tournament::Tournament;
use crate::types::{ItemId, ItemRanking, Judgment};

/// Options for `rank_item()`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankOptions {
    /// Refuse items with more systems than this. Capped at `MAX_VERTICES`.
    pub max_vertices: usize,
}

impl Default for RankOptions {
    fn default() -> Self {
        RankOptions {
            max_vertices: DEFAULT_MAX_VERTICES,
        }
    }
}

/// Rank the systems of one item from its judgments.
///
/// Every judgment is assumed to belong to `src_id`. Zero judgments yield
/// zero rows.
pub fn rank_item(src_id: ItemId, judgments: &[Judgment], options: &RankOptions) -> Result<ItemRanking> {
    let Tally { mut wins, ties, vertices } = Tally::from_judgments(judgments);

    let limit = options.max_vertices.min(MAX_VERTICES);
    if vertices.len() > limit {
        return Err(RankError::TooManyVertices {
            count: vertices.len(),
            limit,
        });
    }

    let resolved = resolve_equalities(&mut wins, &ties);
    let tournament = Tournament::reduce(&wins);
    let vertices: Vec<_> = vertices.into_iter().collect();

    let solution = solve(&tournament, &vertices)?;
    debug_assert_eq!(solution.order.len(), vertices.len());

    let tie_with_prev = mark_ties(&solution.order, &tournament);
    let rows = build_rows(src_id, &solution.order, &tie_with_prev);

    debug!(
        src_id,
        judgments = judgments.len(),
        systems = vertices.len(),
        edges = tournament.len(),
        resolved_ties = resolved.len(),
        cost = solution.cost,
        expanded = solution.expanded,
        "ranked item"
    );

    Ok(ItemRanking {
        src_id,
        rows,
        cost: solution.cost,
        resolved_ties: resolved.len(),
        expanded: solution.expanded,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn judgments(specs: &[(&str, &str, &str, usize)]) -> Vec<Judgment> {
        specs
            .iter()
            .flat_map(|&(a, b, symbol, times)| {
                std::iter::repeat_with(move || Judgment::parse(1, a, b, symbol).unwrap()).take(times)
            })
            .collect()
    }

    fn order_and_ranks(ranking: &ItemRanking) -> (Vec<&str>, Vec<usize>) {
        (
            ranking.rows.iter().map(|r| r.sys_id.as_str()).collect(),
            ranking.rows.iter().map(|r| r.rank).collect(),
        )
    }

    #[test]
    fn test_cycle_broken_by_majority() {
        let js = judgments(&[("A", "B", "<", 3), ("B", "C", "<", 3), ("C", "A", "<", 1)]);
        let ranking = rank_item(1, &js, &RankOptions::default()).unwrap();
        assert_eq!(order_and_ranks(&ranking), (vec!["A", "B", "C"], vec![1, 2, 3]));
        assert_eq!(ranking.cost, 1);
    }

    #[test]
    fn test_majority_equality_gives_shared_rank() {
        let js = judgments(&[("A", "B", "=", 4), ("A", "B", "<", 1)]);
        let ranking = rank_item(1, &js, &RankOptions::default()).unwrap();
        assert_eq!(order_and_ranks(&ranking).1, vec![1, 1]);
        assert_eq!(ranking.resolved_ties, 1);
    }

    #[test]
    fn test_single_system() {
        let js = judgments(&[("A", "A", "=", 1)]);
        let ranking = rank_item(9, &js, &RankOptions::default()).unwrap();
        assert_eq!(order_and_ranks(&ranking), (vec!["A"], vec![1]));
        assert_eq!(ranking.rows[0].src_id, 9);
    }

    #[test]
    fn test_consistent_total_order() {
        let js = judgments(&[
            ("A", "B", "<", 1), ("A", "C", "<", 1), ("A", "D", "<", 1),
            ("B", "C", "<", 1), ("B", "D", "<", 1), ("C", "D", "<", 1),
        ]);
        let ranking = rank_item(1, &js, &RankOptions::default()).unwrap();
        assert_eq!(order_and_ranks(&ranking), (vec!["A", "B", "C", "D"], vec![1, 2, 3, 4]));
        assert_eq!(ranking.cost, 0);
    }

    #[test]
    fn test_second_better_symbol() {
        let js = judgments(&[("A", "B", ">", 2)]);
        let ranking = rank_item(1, &js, &RankOptions::default()).unwrap();
        assert_eq!(order_and_ranks(&ranking), (vec!["B", "A"], vec![1, 2]));
    }

    #[test]
    fn test_empty_item() {
        let ranking = rank_item(5, &[], &RankOptions::default()).unwrap();
        assert!(ranking.rows.is_empty());
        assert_eq!(ranking.cost, 0);
    }

    #[test]
    fn test_cancelled_pair_marked_tied() {
        // Equal wins each way cancel in the reducer without any tie judgment
        let js = judgments(&[("A", "B", "<", 2), ("B", "A", "<", 2)]);
        let ranking = rank_item(1, &js, &RankOptions::default()).unwrap();
        assert_eq!(order_and_ranks(&ranking).1, vec![1, 1]);
        assert_eq!(ranking.resolved_ties, 0);
    }

    #[test]
    fn test_vertex_limit_enforced() {
        let js = judgments(&[("A", "B", "<", 1), ("C", "D", "<", 1)]);
        let err = rank_item(1, &js, &RankOptions { max_vertices: 3 }).unwrap_err();
        assert_eq!(err, RankError::TooManyVertices { count: 4, limit: 3 });
    }
}
