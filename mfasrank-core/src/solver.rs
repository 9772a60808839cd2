/// Exact minimum feedback arc set solver.
///
/// Uniform-cost search over subsets of placed vertices. Placing `u` while
/// the set `S` is already placed costs the weight of every edge `u -> v`
/// whose head is still unplaced; those edges end up pointing backward in
/// the final ranking, which is read off the goal's predecessor chain (last
/// placed = best ranked).
///
/// The state space has 2^n states, so this is only meant for the handful
/// of systems compared per segment.
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use tracing::trace;

use crate::constants::MAX_VERTICES;
use crate::error::{RankError, Result};
use crate::tournament::Tournament;
use crate::types::{SystemId, VertexMap};

/// Set of placed vertices, one bit per vertex index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct State(u64);

impl State {
    pub const EMPTY: State = State(0);

    /// State with vertices `0..n` placed.
    pub fn full(n: usize) -> Self {
        debug_assert!(n <= MAX_VERTICES);
        State((1u64 << n) - 1)
    }

    pub fn contains(self, idx: usize) -> bool {
        self.0 & (1 << idx) != 0
    }

    pub fn with(self, idx: usize) -> Self {
        State(self.0 | (1 << idx))
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn bits(self) -> u64 {
        self.0
    }
}

/// Optimal ranking for one tournament.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// Best ranked first.
    pub order: Vec<SystemId>,
    /// Total weight of feedback arcs under `order`.
    pub cost: u64,
    /// Number of states finalized by the search.
    pub expanded: usize,
}

/// Frontier entry. `BinaryHeap` is a max-heap, so the ordering is inverted
/// on cost; among equal costs the larger bitmask pops first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Hypothesis {
    cost: u64,
    state: State,
}

impl Ord for Hypothesis {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| self.state.cmp(&other.state))
    }
}

impl PartialOrd for Hypothesis {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Dense `n x n` weight matrix indexed by vertex index.
fn weight_matrix(tournament: &Tournament, vertex_map: &VertexMap) -> Result<Vec<Vec<u64>>> {
    let n = vertex_map.len();
    let mut weights = vec![vec![0u64; n]; n];
    for ((tail, head), &w) in tournament.edges() {
        let lookup = |vertex: &SystemId| {
            vertex_map.to_idx(vertex).ok_or_else(|| RankError::UnknownVertex {
                tail: tail.clone(),
                head: head.clone(),
                vertex: vertex.clone(),
            })
        };
        let (t, h) = (lookup(tail)?, lookup(head)?);
        weights[t][h] += w as u64;
    }
    Ok(weights)
}

/// Find a vertex order of minimum feedback cost.
///
/// `vertices` fixes the bit index of every vertex. Pass them sorted: equal
/// cost alternatives are broken by index, so a stable index gives a
/// reproducible answer. Every edge endpoint must be in `vertices`.
pub fn solve(tournament: &Tournament, vertices: &[SystemId]) -> Result<Solution> {
    if vertices.len() > MAX_VERTICES {
        return Err(RankError::TooManyVertices {
            count: vertices.len(),
            limit: MAX_VERTICES,
        });
    }
    let vertex_map = VertexMap::from_ids(vertices)?;
    let weights = weight_matrix(tournament, &vertex_map)?;
    let n = vertex_map.len();
    let goal = State::full(n);

    let mut frontier = BinaryHeap::new();
    let mut best_cost: HashMap<State, u64> = HashMap::new();
    // state -> (predecessor state, vertex placed to reach it)
    let mut parent: HashMap<State, (State, usize)> = HashMap::new();
    let mut closed: HashSet<State> = HashSet::new();

    best_cost.insert(State::EMPTY, 0);
    frontier.push(Hypothesis { cost: 0, state: State::EMPTY });

    let mut goal_cost = None;
    while let Some(Hypothesis { cost, state }) = frontier.pop() {
        if !closed.insert(state) {
            continue;
        }
        if state == goal {
            goal_cost = Some(cost);
            break;
        }

        for u in (0..n).filter(|&u| !state.contains(u)) {
            let next = state.with(u);
            let added: u64 = (0..n)
                .filter(|&v| !next.contains(v))
                .map(|v| weights[u][v])
                .sum();
            let next_cost = cost + added;

            if closed.contains(&next) {
                continue;
            }
            let improved = best_cost.get(&next).map_or(true, |&c| next_cost < c);
            if improved {
                best_cost.insert(next, next_cost);
                parent.insert(next, (state, u));
                frontier.push(Hypothesis { cost: next_cost, state: next });
            }
        }
    }

    // The goal is always reachable: every state has a successor until it is full.
    let cost = goal_cost.unwrap_or(0);
    let expanded = closed.len();
    trace!(vertices = n, expanded, cost, "mfas search finished");

    let mut order = Vec::with_capacity(n);
    let mut state = goal;
    while let Some(&(prev, u)) = parent.get(&state) {
        order.push(vertex_map.to_id(u).clone());
        state = prev;
    }

    Ok(Solution { order, cost, expanded })
}
