/// Answer file parsing: CSV rows → judgments grouped by segment.
///
/// Any bad row aborts the whole file. There is no partial recovery.
use mfasrank_core::{ItemId, Judgment, RankError};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::config::ColumnConfig;

/// Judgments per segment, in ascending segment order.
pub type Segments = BTreeMap<ItemId, Vec<Judgment>>;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("Missing column {name:?} in header")]
    MissingColumn { name: String },

    #[error("Line {line}: segment id {value:?} is not an integer")]
    BadSegment { line: u64, value: String },

    #[error("Line {line}: {source}")]
    BadOutcome {
        line: u64,
        #[source]
        source: RankError,
    },
}

/// Column positions resolved from the header.
struct ColumnIndices {
    segment: usize,
    system1: usize,
    system2: usize,
    cmp: usize,
}

impl ColumnIndices {
    fn resolve(headers: &csv::StringRecord, columns: &ColumnConfig) -> Result<Self, InputError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| InputError::MissingColumn { name: name.to_string() })
        };
        Ok(ColumnIndices {
            segment: find(&columns.segment)?,
            system1: find(&columns.system1)?,
            system2: find(&columns.system2)?,
            cmp: find(&columns.cmp)?,
        })
    }
}

pub fn read_answer_file(path: &Path, columns: &ColumnConfig) -> Result<Segments, InputError> {
    let file = std::fs::File::open(path).map_err(|source| InputError::Open {
        path: path.display().to_string(),
        source,
    })?;
    read_answers(file, columns)
}

/// Parse an answer CSV from any reader.
pub fn read_answers<R: Read>(reader: R, columns: &ColumnConfig) -> Result<Segments, InputError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let idx = ColumnIndices::resolve(csv_reader.headers()?, columns)?;

    let mut segments = Segments::new();
    let mut rows = 0usize;
    for record in csv_reader.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());
        let field = |i: usize| record.get(i).unwrap_or("");

        let segment_text = field(idx.segment).trim();
        let src_id: ItemId = segment_text.parse().map_err(|_| InputError::BadSegment {
            line,
            value: segment_text.to_string(),
        })?;

        let judgment = Judgment::parse(src_id, field(idx.system1), field(idx.system2), field(idx.cmp))
            .map_err(|source| InputError::BadOutcome { line, source })?;

        segments.entry(src_id).or_default().push(judgment);
        rows += 1;
    }

    info!(rows, segments = segments.len(), "read answer file");
    Ok(segments)
}
