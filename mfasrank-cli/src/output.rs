/// Output formatting: CSV rows, JSON, and a terminal table.
use mfasrank_core::{ItemId, ItemRanking, RankedRow};
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct JsonRankedSystem<'a> {
    sys_id: &'a str,
    rank: usize,
}

#[derive(Serialize)]
struct JsonSegment<'a> {
    src_id: ItemId,
    /// Total weight of feedback arcs in the chosen order.
    cost: u64,
    systems: Vec<JsonRankedSystem<'a>>,
}

/// Write `src_id,sys_id,rank` rows. The header is written once, right before
/// the first data row, so an input with no rankable rows produces no output.
/// Returns the number of data rows written.
pub fn write_csv<W: Write>(rankings: &[ItemRanking], writer: W) -> csv::Result<usize> {
    let mut csv_out = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    let mut written = 0;
    for row in rankings.iter().flat_map(|r| &r.rows) {
        if written == 0 {
            csv_out.write_record(RankedRow::HEADER)?;
        }
        csv_out.write_record(row.to_record())?;
        written += 1;
    }
    csv_out.flush()?;
    Ok(written)
}

/// Write results as a JSON array, one object per segment.
pub fn write_json<W: Write>(rankings: &[ItemRanking], mut writer: W) -> serde_json::Result<()> {
    let segments: Vec<JsonSegment> = rankings
        .iter()
        .filter(|r| !r.rows.is_empty())
        .map(|r| JsonSegment {
            src_id: r.src_id,
            cost: r.cost,
            systems: r
                .rows
                .iter()
                .map(|row| JsonRankedSystem { sys_id: &row.sys_id, rank: row.rank })
                .collect(),
        })
        .collect();

    serde_json::to_writer_pretty(&mut writer, &segments)?;
    writeln!(writer).map_err(serde_json::Error::io)
}

/// Write results as a formatted terminal table.
pub fn write_table<W: Write>(rankings: &[ItemRanking], mut writer: W) -> std::io::Result<()> {
    // Find the widest system name for padding
    let name_width = rankings
        .iter()
        .flat_map(|r| &r.rows)
        .map(|row| row.sys_id.len())
        .max()
        .unwrap_or(6)
        .max(6); // at least "System"

    writeln!(writer, " Segment | Rank | {:<name_width$} | Cost", "System")?;
    writeln!(writer, "---------|------|-{}-|-----", "-".repeat(name_width))?;

    for ranking in rankings {
        for (i, row) in ranking.rows.iter().enumerate() {
            // Only the first row of a segment shows its cost
            let cost = if i == 0 { ranking.cost.to_string() } else { String::new() };
            writeln!(
                writer,
                "{:>8} | {:>4} | {:<name_width$} | {}",
                row.src_id, row.rank, row.sys_id, cost,
            )?;
        }
    }

    let total_rows: usize = rankings.iter().map(|r| r.rows.len()).sum();
    let total_cost: u64 = rankings.iter().map(|r| r.cost).sum();
    writeln!(
        writer,
        "\n{} segments, {} ranked systems, total feedback cost {}",
        rankings.len(),
        total_rows,
        total_cost,
    )
}
