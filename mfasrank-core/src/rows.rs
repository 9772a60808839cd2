/// Output row construction.
use crate::types::{ItemId, RankedRow, SystemId};

/// Assign 1-indexed ranks along `order`. A vertex tied with its predecessor
/// reuses the predecessor's rank; otherwise its rank is its position + 1.
pub fn build_rows(src_id: ItemId, order: &[SystemId], tie_with_prev: &[bool]) -> Vec<RankedRow> {
    assert_eq!(
        order.len(),
        tie_with_prev.len(),
        "Tie flags must cover every ranked system"
    );

    let mut rows = Vec::with_capacity(order.len());
    let mut last_rank = 0;
    for (i, (sys_id, &tied)) in order.iter().zip(tie_with_prev).enumerate() {
        let rank = if tied && i > 0 { last_rank } else { i + 1 };
        rows.push(RankedRow {
            src_id,
            sys_id: sys_id.clone(),
            rank,
        });
        last_rank = rank;
    }
    rows
}
