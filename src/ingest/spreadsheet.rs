//! Spreadsheet ingestion strategy (xlsx/xls via calamine).

use super::HEADER_SKIP_ROWS;
use crate::types::RawTable;
use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use std::io::Cursor;

/// Parse workbook bytes into a raw table, skipping the leading title rows.
/// The error is a plain message so the caller can fold it into the combined
/// strategy report.
pub(super) fn read(bytes: &[u8]) -> Result<RawTable, String> {
    let mut workbook =
        open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|e| e.to_string())?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| "workbook has no sheets".to_string())?
        .map_err(|e| e.to_string())?;
    from_range(&range)
}

fn from_range(range: &Range<Data>) -> Result<RawTable, String> {
    let mut rows = range.rows().skip(HEADER_SKIP_ROWS);
    let header = rows
        .next()
        .ok_or_else(|| "sheet ends before the header row".to_string())?;

    let columns: Vec<String> = header.iter().map(cell_text).collect();
    if columns.iter().all(|c| c.trim().is_empty()) {
        return Err("header row is empty".to_string());
    }

    let mut table = RawTable::new(columns);
    for row in rows {
        table.push_row(row.iter().map(cell_text).collect());
    }
    Ok(table)
}

/// Stringify a cell. Integral floats drop the trailing `.0` so a quantity
/// cell of 1000 comes out as "1000", and date cells render in a form the
/// normalizer's date parser accepts.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(_) => String::new(),
    }
}
