//! Delimited-text ingestion strategy.
//!
//! Bytes are decoded strictly with one of the supported encodings before CSV
//! parsing; a decode error fails the strategy so the next encoding gets its
//! turn.

use super::HEADER_SKIP_ROWS;
use crate::types::RawTable;
use encoding_rs::{Encoding, EUC_KR, UTF_8};

/// Encoding fallback order. encoding_rs maps both Korean labels to the
/// windows-949 decoder; the labels are kept separate so format reports match
/// the encodings seen in the field.
pub(super) const ENCODINGS: &[(&str, &'static Encoding)] =
    &[("utf-8", UTF_8), ("cp949", EUC_KR), ("euc-kr", EUC_KR)];

pub(super) fn read(bytes: &[u8], encoding: &'static Encoding) -> Result<RawTable, String> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(format!("not valid {}", encoding.name()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = reader.records().skip(HEADER_SKIP_ROWS);
    let header = records
        .next()
        .ok_or_else(|| "input ends before the header row".to_string())?
        .map_err(|e| e.to_string())?;

    let columns: Vec<String> = header.iter().map(|c| c.to_string()).collect();
    if columns.iter().all(|c| c.trim().is_empty()) {
        return Err("header row is empty".to_string());
    }

    let mut table = RawTable::new(columns);
    for record in records {
        let record = record.map_err(|e| e.to_string())?;
        table.push_row(record.iter().map(|c| c.to_string()).collect());
    }
    Ok(table)
}
