//! CSV ingest.
//!
//! The header row must name all six required columns; anything else in the
//! file is ignored. Rows are never rejected here: blank or absent cells
//! become `None` and are judged later by the row validator.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use agentguard_contracts::{
    error::{GuardError, GuardResult},
    record::{TransactionRecord, REQUIRED_COLUMNS},
};

/// Positions of the required columns within the header row.
struct ColumnMap([usize; REQUIRED_COLUMNS.len()]);

impl ColumnMap {
    /// Locate every required column, or list all that are missing.
    fn from_headers(headers: &csv::StringRecord) -> GuardResult<Self> {
        let mut positions = [0usize; REQUIRED_COLUMNS.len()];
        let mut missing: Vec<String> = Vec::new();

        for (slot, name) in REQUIRED_COLUMNS.iter().enumerate() {
            match headers.iter().position(|h| h == *name) {
                Some(pos) => positions[slot] = pos,
                None => missing.push(name.to_string()),
            }
        }

        if missing.is_empty() {
            Ok(Self(positions))
        } else {
            Err(GuardError::MissingColumns { columns: missing })
        }
    }

    fn cell(&self, row: &csv::StringRecord, slot: usize) -> Option<String> {
        row.get(self.0[slot])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    fn record(&self, row: &csv::StringRecord) -> TransactionRecord {
        TransactionRecord {
            agent_id: self.cell(row, 0),
            agent_name: self.cell(row, 1),
            kyc_status: self.cell(row, 2),
            id_expiry: self.cell(row, 3),
            txn_amount: self.cell(row, 4),
            txn_time: self.cell(row, 5),
        }
    }
}

/// Read every data row of a CSV document.
///
/// Returns `MissingColumns` if the header lacks required columns and
/// `IngestError` if the document is not readable CSV.
pub fn read_records<R: Read>(reader: R) -> GuardResult<Vec<TransactionRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers().map_err(|e| GuardError::IngestError {
        reason: format!("failed to read header row: {}", e),
    })?;
    let columns = ColumnMap::from_headers(headers)?;

    let mut records = Vec::new();
    for result in rdr.records() {
        let row = result.map_err(|e| GuardError::IngestError {
            reason: format!("malformed CSV: {}", e),
        })?;
        records.push(columns.record(&row));
    }

    debug!(rows = records.len(), "csv ingested");
    Ok(records)
}

/// Open `path` and read it with [`read_records`].
///
/// Only files with a `.csv` extension (any case) are accepted.
pub fn read_path(path: &Path) -> GuardResult<Vec<TransactionRecord>> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    if !is_csv {
        return Err(GuardError::InvalidFileType {
            path: path.display().to_string(),
        });
    }

    let file = File::open(path).map_err(|e| GuardError::IngestError {
        reason: format!("failed to open '{}': {}", path.display(), e),
    })?;
    let records = read_records(file)?;

    info!(path = %path.display(), rows = records.len(), "transaction file loaded");
    Ok(records)
}
