//! Row normalization.
//!
//! Turns the raw string table into typed rows, in a fixed pass order:
//! subtotal rows are dropped, the date column is forward-filled (merged cells
//! only print the date on the first row of a block), missing specifications
//! get a placeholder, dates become `YYYY-MM` periods and quantity/amount
//! cells are coerced to numbers. Bad values become defaults; the only
//! normalization error is the missing-column check done by `ReportSchema`.

pub mod date;
pub mod number;

use crate::schema::ReportSchema;
use crate::types::{NormalizedRow, RawTable, SPEC_PLACEHOLDER, SUBTOTAL_MARKER};
use serde::Serialize;
use tracing::debug;

/// Diagnostics from one normalization run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NormalizeStats {
    pub rows_in: usize,
    pub subtotal_rows_dropped: usize,
    pub dates_unparseable: usize,
}

pub fn normalize(table: &RawTable, schema: &ReportSchema) -> (Vec<NormalizedRow>, NormalizeStats) {
    let mut stats = NormalizeStats {
        rows_in: table.row_count(),
        ..Default::default()
    };
    let mut rows = Vec::with_capacity(table.row_count());
    let mut last_date: Option<String> = None;

    for row in table.rows() {
        let spec_raw = row[schema.specification].trim();
        if spec_raw.contains(SUBTOTAL_MARKER) {
            stats.subtotal_rows_dropped += 1;
            continue;
        }

        // Forward-fill: an empty date cell inherits the nearest preceding
        // non-empty one.
        let date_raw = row[schema.date].trim();
        let date_cell = if date_raw.is_empty() {
            last_date.clone()
        } else {
            last_date = Some(date_raw.to_string());
            last_date.clone()
        };

        let parsed = date_cell.as_deref().and_then(date::parse_date);
        if parsed.is_none() && date_cell.is_some() {
            stats.dates_unparseable += 1;
        }

        let specification = if spec_raw.is_empty() {
            SPEC_PLACEHOLDER.to_string()
        } else {
            spec_raw.to_string()
        };

        let unit = schema.unit.and_then(|idx| {
            let u = row[idx].trim();
            (!u.is_empty()).then(|| u.to_string())
        });

        rows.push(NormalizedRow {
            period: parsed.map(date::period_of),
            specification,
            quantity: schema.quantity.map_or(0.0, |idx| number::coerce(&row[idx])),
            amount: schema.amount.map_or(0.0, |idx| number::coerce(&row[idx])),
            unit,
        });
    }

    debug!(
        rows_in = stats.rows_in,
        subtotal_rows_dropped = stats.subtotal_rows_dropped,
        dates_unparseable = stats.dates_unparseable,
        "normalized report rows"
    );
    (rows, stats)
}
