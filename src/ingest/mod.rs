//! Report ingestion.
//!
//! Parser strategies are tried in a fixed order and the first success wins:
//! spreadsheet (xlsx/xls) first, then delimited text decoded as UTF-8, cp949
//! and euc-kr. Only when every strategy fails does ingestion error out, with
//! the per-strategy failures collected into the message.

mod delimited;
mod spreadsheet;

use crate::error::{RollupError, RollupResult};
use crate::types::RawTable;
use tracing::{debug, warn};

/// Leading title/header rows skipped before the column-name row.
pub const HEADER_SKIP_ROWS: usize = 2;

/// Read raw report bytes into a table of strings.
///
/// Returns the table together with a format label ("xlsx", "csv(utf-8)", ...)
/// describing which strategy succeeded. Pure given identical bytes; the
/// filename hint is only used for logging.
pub fn load(bytes: &[u8], filename_hint: &str) -> RollupResult<(RawTable, String)> {
    let mut failures: Vec<String> = Vec::new();

    match spreadsheet::read(bytes) {
        Ok(table) => {
            debug!(hint = filename_hint, rows = table.row_count(), "parsed as xlsx");
            return Ok((table, "xlsx".to_string()));
        }
        Err(e) => failures.push(format!("xlsx: {e}")),
    }

    for (label, encoding) in delimited::ENCODINGS {
        match delimited::read(bytes, encoding) {
            Ok(table) => {
                debug!(
                    hint = filename_hint,
                    encoding = label,
                    rows = table.row_count(),
                    "parsed as delimited text"
                );
                return Ok((table, format!("csv({label})")));
            }
            Err(e) => failures.push(format!("csv({label}): {e}")),
        }
    }

    warn!(hint = filename_hint, "no parser strategy succeeded");
    Err(RollupError::UnreadableFile(failures.join("; ")))
}
