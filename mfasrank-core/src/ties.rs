/// Tie marking on a solved order.
///
/// Only adjacent positions are compared. The relation is not transitive:
/// a run A~B~C can be marked even when A and C are joined by an edge.
use crate::tournament::Tournament;
use crate::types::SystemId;

/// `result[i]` is true when `order[i]` is tied with `order[i - 1]`, i.e. the
/// tournament has no positively weighted edge between them in either
/// direction. `result[0]` is always false.
///
/// Pairs resolved as equal before reduction are not consulted; they show up
/// here only because their edges are gone.
pub fn mark_ties(order: &[SystemId], tournament: &Tournament) -> Vec<bool> {
    let mut tie_with_prev = vec![false; order.len()];
    for i in 1..order.len() {
        tie_with_prev[i] = !tournament.connects(&order[i - 1], &order[i]);
    }
    tie_with_prev
}
