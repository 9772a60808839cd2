//! Property-based tests using proptest

use std::collections::BTreeSet;

use mfasrank_core::{
    rank_item, resolve_equalities, solve, Judgment, PairCounts, RankOptions, SystemId, Tally,
    Tournament,
};
use proptest::prelude::*;

fn vertex_names(n: usize) -> Vec<SystemId> {
    (0..n).map(|i| format!("sys{i}")).collect()
}

/// Random win counts over `n` systems, each ordered pair 0..4 wins.
fn wins_strategy() -> impl Strategy<Value = (Vec<SystemId>, PairCounts)> {
    (1usize..=6).prop_flat_map(|n| {
        prop::collection::vec(0u32..4, n * n).prop_map(move |counts| {
            let names = vertex_names(n);
            let mut wins = PairCounts::new();
            for a in 0..n {
                for b in 0..n {
                    let w = counts[a * n + b];
                    if a != b && w > 0 {
                        wins.insert((names[a].clone(), names[b].clone()), w);
                    }
                }
            }
            (names, wins)
        })
    })
}

/// Random judgments for one item.
fn judgments_strategy() -> impl Strategy<Value = Vec<Judgment>> {
    prop::collection::vec((0usize..5, 0usize..5, 0usize..3), 0..30).prop_map(|raw| {
        raw.into_iter()
            .map(|(a, b, o)| {
                let symbol = ["<", ">", "="][o];
                Judgment::parse(1, format!("sys{a}"), format!("sys{b}"), symbol).unwrap()
            })
            .collect()
    })
}

/// Minimum feedback cost over every permutation of `vertices`.
fn brute_force_cost(tournament: &Tournament, vertices: &[SystemId]) -> u64 {
    fn permute(items: &mut Vec<SystemId>, k: usize, t: &Tournament, best: &mut u64) {
        if k == items.len() {
            *best = (*best).min(t.feedback_cost(items));
            return;
        }
        for i in k..items.len() {
            items.swap(k, i);
            permute(items, k + 1, t, best);
            items.swap(k, i);
        }
    }
    let mut items = vertices.to_vec();
    let mut best = u64::MAX;
    permute(&mut items, 0, tournament, &mut best);
    best
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_solver_is_optimal((vertices, wins) in wins_strategy()) {
        let tournament = Tournament::reduce(&wins);
        let solution = solve(&tournament, &vertices).unwrap();

        prop_assert_eq!(solution.cost, brute_force_cost(&tournament, &vertices));
        prop_assert_eq!(tournament.feedback_cost(&solution.order), solution.cost);
    }

    #[test]
    fn test_solver_is_deterministic((vertices, wins) in wins_strategy()) {
        let tournament = Tournament::reduce(&wins);
        let first = solve(&tournament, &vertices).unwrap();
        let second = solve(&tournament, &vertices).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_reduce_is_idempotent((_vertices, wins) in wins_strategy()) {
        let once = Tournament::reduce(&wins);
        let twice = Tournament::reduce(once.edges());
        prop_assert_eq!(&once, &twice);

        // At most one direction per pair, all weights positive
        for ((a, b), &w) in once.edges() {
            prop_assert!(w > 0);
            prop_assert!(once.weight(b, a).is_none());
        }
    }

    #[test]
    fn test_ranking_is_complete(judgments in judgments_strategy()) {
        let ranking = rank_item(1, &judgments, &RankOptions::default()).unwrap();
        let expected: BTreeSet<&str> = judgments
            .iter()
            .flat_map(|j| [j.winner.as_str(), j.loser.as_str()])
            .collect();
        let ranked: Vec<&str> = ranking.rows.iter().map(|r| r.sys_id.as_str()).collect();
        let ranked_set: BTreeSet<&str> = ranked.iter().copied().collect();

        prop_assert_eq!(ranked.len(), ranked_set.len());
        prop_assert_eq!(ranked_set, expected);
    }

    #[test]
    fn test_ranks_are_monotone(judgments in judgments_strategy()) {
        let ranking = rank_item(1, &judgments, &RankOptions::default()).unwrap();
        for (i, row) in ranking.rows.iter().enumerate() {
            if i == 0 {
                prop_assert_eq!(row.rank, 1);
                continue;
            }
            let prev = ranking.rows[i - 1].rank;
            prop_assert!(row.rank >= prev);
            // Either a fresh rank at this position or a continued tie
            prop_assert!(row.rank == prev || row.rank == i + 1);
        }
    }

    #[test]
    fn test_equality_majority_drops_edges(
        ab in 0u32..4,
        ba in 0u32..4,
        extra in 1u32..4,
    ) {
        let mut judgments = Vec::new();
        for _ in 0..ab {
            judgments.push(Judgment::parse(1, "A", "B", "<").unwrap());
        }
        for _ in 0..ba {
            judgments.push(Judgment::parse(1, "A", "B", ">").unwrap());
        }
        for _ in 0..(ab + ba + extra) {
            judgments.push(Judgment::parse(1, "A", "B", "=").unwrap());
        }

        let Tally { mut wins, ties, .. } = Tally::from_judgments(&judgments);
        resolve_equalities(&mut wins, &ties);
        let tournament = Tournament::reduce(&wins);
        prop_assert!(!tournament.connects("A", "B"));
    }
}
