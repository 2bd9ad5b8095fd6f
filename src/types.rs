use serde::Serialize;

//==============================================================================
// Recognized report columns
//==============================================================================

/// Delivery date column (required).
pub const DATE_COL: &str = "납품일";
/// Specification column (required). The interior space is how the reports
/// actually spell it.
pub const SPEC_COL: &str = "규 격";
/// Quantity column (optional).
pub const QTY_COL: &str = "수량";
/// Total amount column (optional).
pub const AMOUNT_COL: &str = "합계금액";
/// Unit column (optional).
pub const UNIT_COL: &str = "단위";

/// Header label for the derived year-month column.
pub const PERIOD_LABEL: &str = "월";

/// Substituted when a row has no specification cell.
pub const SPEC_PLACEHOLDER: &str = "규격 미기재";

/// Rows whose specification contains this marker are pre-existing subtotal
/// rows and must not be counted again.
pub const SUBTOTAL_MARKER: &str = "합계";

/// Default output file stem for the exported workbook.
pub const DEFAULT_EXPORT_STEM: &str = "monthly_specification_summary";

//==============================================================================
// Raw table (ingestion output)
//==============================================================================

/// A rectangular table of strings as read from the source file, header rows
/// already skipped. Column names are stored trimmed; every cell is a string,
/// including originally-numeric ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(columns: Vec<String>) -> Self {
        let columns = columns.into_iter().map(|c| c.trim().to_string()).collect();
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a data row, padding or truncating to the header width.
    pub fn push_row(&mut self, mut row: Vec<String>) {
        row.resize(self.columns.len(), String::new());
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a column by its trimmed name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

//==============================================================================
// Normalized rows
//==============================================================================

/// One delivery line item after normalization. `period` is `None` when the
/// date cell could not be parsed (such rows are excluded from aggregation).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRow {
    pub period: Option<String>,
    pub specification: String,
    pub quantity: f64,
    pub amount: f64,
    pub unit: Option<String>,
}

//==============================================================================
// Summary table (aggregation output)
//==============================================================================

/// One aggregated group, keyed by (period, specification).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub period: String,
    pub specification: String,
    pub unit: Option<String>,
    pub quantity: f64,
    pub amount: f64,
}

/// Ordered aggregation result. Rows are sorted by period then specification.
/// The `has_*` flags record which optional columns existed in the input so
/// consumers emit only those.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryTable {
    pub has_unit: bool,
    pub has_quantity: bool,
    pub has_amount: bool,
    pub rows: Vec<SummaryRow>,
}

impl SummaryTable {
    /// Output header labels: period and specification, then the optional
    /// columns that exist, in fixed [unit, quantity, amount] order.
    pub fn headers(&self) -> Vec<&'static str> {
        let mut headers = vec![PERIOD_LABEL, SPEC_COL];
        if self.has_unit {
            headers.push(UNIT_COL);
        }
        if self.has_quantity {
            headers.push(QTY_COL);
        }
        if self.has_amount {
            headers.push(AMOUNT_COL);
        }
        headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_table_trims_column_names() {
        let table = RawTable::new(vec!["  납품일 ".to_string(), "규 격".to_string()]);
        assert_eq!(table.columns(), &["납품일", "규 격"]);
        assert_eq!(table.column_index("납품일"), Some(0));
        assert_eq!(table.column_index("규 격"), Some(1));
    }

    #[test]
    fn test_raw_table_pads_short_rows() {
        let mut table = RawTable::new(vec!["a".to_string(), "b".to_string(), "c".to_string()]);
        table.push_row(vec!["1".to_string()]);
        assert_eq!(table.rows()[0], vec!["1", "", ""]);
    }

    #[test]
    fn test_raw_table_truncates_long_rows() {
        let mut table = RawTable::new(vec!["a".to_string()]);
        table.push_row(vec!["1".to_string(), "overflow".to_string()]);
        assert_eq!(table.rows()[0], vec!["1"]);
    }

    #[test]
    fn test_summary_headers_follow_fixed_order() {
        let table = SummaryTable {
            has_unit: true,
            has_quantity: true,
            has_amount: true,
            rows: Vec::new(),
        };
        assert_eq!(
            table.headers(),
            vec![PERIOD_LABEL, SPEC_COL, UNIT_COL, QTY_COL, AMOUNT_COL]
        );
    }

    #[test]
    fn test_summary_headers_skip_absent_columns() {
        let table = SummaryTable {
            has_unit: false,
            has_quantity: true,
            has_amount: false,
            rows: Vec::new(),
        };
        assert_eq!(table.headers(), vec![PERIOD_LABEL, SPEC_COL, QTY_COL]);
    }
}
