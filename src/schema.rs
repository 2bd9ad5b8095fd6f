//! Report schema detection.
//!
//! Column presence is resolved once, right after ingestion, instead of
//! re-checking names throughout the pipeline. The date and specification
//! columns are the only hard requirement; everything else is optional.

use crate::error::{RollupError, RollupResult};
use crate::types::{RawTable, AMOUNT_COL, DATE_COL, QTY_COL, SPEC_COL, UNIT_COL};

/// Column positions for one ingested report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSchema {
    pub date: usize,
    pub specification: usize,
    pub quantity: Option<usize>,
    pub amount: Option<usize>,
    pub unit: Option<usize>,
}

impl ReportSchema {
    /// Resolve recognized columns against a raw table.
    ///
    /// Fails with `MissingColumns` naming whichever of the required columns
    /// (delivery date, specification) is absent.
    pub fn detect(table: &RawTable) -> RollupResult<Self> {
        let date = table.column_index(DATE_COL);
        let specification = table.column_index(SPEC_COL);

        match (date, specification) {
            (Some(date), Some(specification)) => Ok(Self {
                date,
                specification,
                quantity: table.column_index(QTY_COL),
                amount: table.column_index(AMOUNT_COL),
                unit: table.column_index(UNIT_COL),
            }),
            _ => {
                let mut missing = Vec::new();
                if date.is_none() {
                    missing.push(DATE_COL.to_string());
                }
                if specification.is_none() {
                    missing.push(SPEC_COL.to_string());
                }
                Err(RollupError::MissingColumns(missing))
            }
        }
    }
}
