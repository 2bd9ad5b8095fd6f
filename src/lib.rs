//! Rollup - monthly per-specification totals for delivery reports
//!
//! This library ingests a tabular delivery report (xlsx or delimited text in
//! UTF-8/cp949/euc-kr), normalizes the messy human-produced data, and
//! aggregates quantity/amount per (month, specification) pair.
//!
//! # Features
//!
//! - Parser-strategy fallback: spreadsheet first, then delimited text per encoding
//! - Forward-fill for merged date cells, subtotal-row exclusion
//! - Locale-number coercion ("1,234" → 1234, malformed → 0)
//! - Deterministic (period, specification) ordering
//! - Styled Excel export of the finished summary
//!
//! # Example
//!
//! ```no_run
//! use delivery_rollup::pipeline;
//!
//! let bytes = std::fs::read("deliveries.xlsx")?;
//! let summary = pipeline::summarize(&bytes, "deliveries.xlsx")?;
//!
//! for row in &summary.table.rows {
//!     println!("{} / {}: {}", row.period, row.specification, row.quantity);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod aggregate;
pub mod cli;
pub mod error;
pub mod export;
pub mod ingest;
pub mod normalize;
pub mod pipeline;
pub mod schema;
pub mod types;

// Re-export commonly used types
pub use error::{RollupError, RollupResult};
pub use pipeline::{summarize, Pipeline, Summary};
pub use schema::ReportSchema;
pub use types::{NormalizedRow, RawTable, SummaryRow, SummaryTable};
