/// mfasrank-core: Pure-computation ranking kernel.
///
/// Pairwise judgments → weighted tournament → exact minimum feedback arc set
/// → ranked rows with ties. No IO, no CSV, no CLI — just the algorithm.
///
/// Each input item (segment) is ranked independently. Systems are identified
/// by caller-provided string IDs.
///
/// # Quick start
///
/// ```rust
/// use mfasrank_core::{rank_item, Judgment, RankOptions};
///
/// let judgments = vec![
///     Judgment::parse(1, "sysA", "sysB", "<").unwrap(), // sysA better
///     Judgment::parse(1, "sysB", "sysC", "<").unwrap(),
///     Judgment::parse(1, "sysC", "sysA", ">").unwrap(), // sysA better
/// ];
///
/// let ranking = rank_item(1, &judgments, &RankOptions::default()).unwrap();
///
/// for row in &ranking.rows {
///     println!("{} {} {}", row.src_id, row.sys_id, row.rank);
/// }
/// assert_eq!(ranking.rows[0].sys_id, "sysA");
/// ```

pub mod aggregate;
pub mod constants;
pub mod equality;
pub mod error;
pub mod pipeline;
pub mod rows;
pub mod solver;
pub mod ties;
pub mod tournament;
pub mod types;

// Re-export primary public API at crate root.
pub use aggregate::{PairCounts, Tally};
pub use constants::{DEFAULT_MAX_VERTICES, MAX_VERTICES, TIE_MAJORITY};
pub use equality::resolve_equalities;
pub use error::{RankError, Result};
pub use pipeline::{rank_item, RankOptions};
pub use rows::build_rows;
pub use solver::{solve, Solution, State};
pub use ties::mark_ties;
pub use tournament::Tournament;
pub use types::{ItemId, ItemRanking, Judgment, Outcome, RankedRow, SystemId};
