/// Fraction of tie evidence at which a pair's directional edges are discarded.
/// Majority vote: exactly half counts as a tie.
pub const TIE_MAJORITY: f64 = 0.5;

/// Hard limit on vertices per item. Search states are `u64` bitmasks and the
/// full state must stay representable.
pub const MAX_VERTICES: usize = 63;

/// Default vertex limit for `RankOptions`.
///
/// The search visits up to 2^n states with O(n) work each. Twenty systems is
/// about a million states, which finishes in well under a second; realistic
/// evaluation campaigns compare fewer than fifteen systems per segment.
pub const DEFAULT_MAX_VERTICES: usize = 20;
