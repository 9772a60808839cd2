use std::collections::HashMap;

use crate::error::{RankError, Result};

/// Identifier of one input item (a source segment). Judgments are only
/// comparable within the same item.
pub type ItemId = i64;

/// Identifier of a competing system. These are the tournament vertices.
pub type SystemId = String;

/// Outcome of a single pairwise comparison, as written in the answer file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// `<`: the first system is better than the second.
    FirstBetter,
    /// `>`: the second system is better than the first.
    SecondBetter,
    /// `=`: both systems are equally good.
    Equal,
}

impl Outcome {
    pub fn from_symbol(symbol: &str) -> Result<Self> {
        match symbol.trim() {
            "<" => Ok(Outcome::FirstBetter),
            ">" => Ok(Outcome::SecondBetter),
            "=" => Ok(Outcome::Equal),
            other => Err(RankError::InvalidOutcome {
                symbol: other.to_string(),
            }),
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Outcome::FirstBetter => '<',
            Outcome::SecondBetter => '>',
            Outcome::Equal => '=',
        }
    }
}

/// One observed comparison, normalized so that `winner` beat `loser`.
///
/// For equal outcomes `winner`/`loser` carry no preference and `weight` is 0.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Judgment {
    pub item: ItemId,
    pub winner: SystemId,
    pub loser: SystemId,
    /// 1 for a directional judgment, 0 for equality.
    pub weight: u32,
}

impl Judgment {
    pub fn new(
        item: ItemId,
        first: impl Into<SystemId>,
        second: impl Into<SystemId>,
        outcome: Outcome,
    ) -> Self {
        let (first, second) = (first.into(), second.into());
        let (winner, loser, weight) = match outcome {
            Outcome::FirstBetter => (first, second, 1),
            Outcome::SecondBetter => (second, first, 1),
            Outcome::Equal => (second, first, 0),
        };
        Judgment { item, winner, loser, weight }
    }

    /// Parse the outcome symbol and build the judgment in one step.
    pub fn parse(
        item: ItemId,
        first: impl Into<SystemId>,
        second: impl Into<SystemId>,
        symbol: &str,
    ) -> Result<Self> {
        Ok(Self::new(item, first, second, Outcome::from_symbol(symbol)?))
    }

    pub fn is_equal(&self) -> bool {
        self.weight == 0
    }
}

/// One output row: the rank of a system for an item.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankedRow {
    pub src_id: ItemId,
    pub sys_id: SystemId,
    /// 1-indexed; tied systems share the rank of the first member of the tie.
    pub rank: usize,
}

impl RankedRow {
    /// Column names, in the order `to_record` emits the fields.
    pub const HEADER: [&'static str; 3] = ["src_id", "sys_id", "rank"];

    pub fn to_record(&self) -> [String; 3] {
        [self.src_id.to_string(), self.sys_id.clone(), self.rank.to_string()]
    }
}

/// Ranking of a single item plus search diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemRanking {
    pub src_id: ItemId,
    pub rows: Vec<RankedRow>,
    /// Total weight of feedback arcs in the chosen order.
    pub cost: u64,
    /// Unordered pairs whose directional evidence was discarded as a tie.
    pub resolved_ties: usize,
    /// Number of states the solver finalized.
    pub expanded: usize,
}

/// Maps system ids to the stable 0..N vertex indices used by the solver.
///
/// Vertices are indexed in the order given; callers pass them sorted so the
/// index (and therefore tie-breaking) does not depend on input order.
pub(crate) struct VertexMap<'a> {
    ids: &'a [SystemId],
    id_to_idx: HashMap<&'a str, usize>,
}

impl<'a> VertexMap<'a> {
    pub fn from_ids(ids: &'a [SystemId]) -> Result<Self> {
        let mut id_to_idx = HashMap::with_capacity(ids.len());
        for (idx, id) in ids.iter().enumerate() {
            if id_to_idx.insert(id.as_str(), idx).is_some() {
                return Err(RankError::DuplicateVertex { vertex: id.clone() });
            }
        }
        Ok(VertexMap { ids, id_to_idx })
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn to_idx(&self, id: &str) -> Option<usize> {
        self.id_to_idx.get(id).copied()
    }

    pub fn to_id(&self, idx: usize) -> &'a SystemId {
        &self.ids[idx]
    }
}
