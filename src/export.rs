//! Styled workbook export.
//!
//! The exporter is presentation only: thin borders everywhere, gray bold
//! centered header, numeric columns right-aligned with thousands grouping,
//! everything else centered, column widths sized from rendered text. None of
//! this affects the aggregation semantics.

use crate::error::{RollupError, RollupResult};
use crate::types::{SummaryRow, SummaryTable};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet};
use std::path::Path;

const HEADER_FILL: u32 = 0xE0E0E0;
const SHEET_NAME: &str = "Sheet1";

/// Excel exporter for a finished summary table.
pub struct SummaryExporter<'a> {
    table: &'a SummaryTable,
}

impl<'a> SummaryExporter<'a> {
    pub fn new(table: &'a SummaryTable) -> Self {
        Self { table }
    }

    /// Write the styled workbook to a file.
    pub fn write_to_path(&self, path: &Path) -> RollupResult<()> {
        let mut workbook = self.build()?;
        workbook
            .save(path)
            .map_err(|e| RollupError::Export(format!("Failed to save Excel file: {}", e)))?;
        Ok(())
    }

    /// Render the styled workbook into an in-memory xlsx buffer.
    pub fn write_to_buffer(&self) -> RollupResult<Vec<u8>> {
        let mut workbook = self.build()?;
        workbook
            .save_to_buffer()
            .map_err(|e| RollupError::Export(format!("Failed to render Excel buffer: {}", e)))
    }

    fn build(&self) -> RollupResult<Workbook> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(SHEET_NAME)
            .map_err(|e| RollupError::Export(format!("Failed to set worksheet name: {}", e)))?;

        let header_format = Format::new()
            .set_bold()
            .set_background_color(Color::RGB(HEADER_FILL))
            .set_border(FormatBorder::Thin)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter);
        let text_format = Format::new()
            .set_border(FormatBorder::Thin)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter);
        let number_format = Format::new()
            .set_border(FormatBorder::Thin)
            .set_align(FormatAlign::Right)
            .set_align(FormatAlign::VerticalCenter)
            .set_num_format("#,##0");

        let headers = self.table.headers();
        for (col_idx, header) in headers.iter().enumerate() {
            worksheet
                .write_string_with_format(0, col_idx as u16, *header, &header_format)
                .map_err(|e| RollupError::Export(format!("Failed to write header: {}", e)))?;
        }

        for (row_idx, row) in self.table.rows.iter().enumerate() {
            let excel_row = (row_idx + 1) as u32;
            let mut col: u16 = 0;

            write_text(worksheet, excel_row, &mut col, &row.period, &text_format)?;
            write_text(worksheet, excel_row, &mut col, &row.specification, &text_format)?;
            if self.table.has_unit {
                let unit = row.unit.as_deref().unwrap_or("");
                write_text(worksheet, excel_row, &mut col, unit, &text_format)?;
            }
            if self.table.has_quantity {
                write_number(worksheet, excel_row, &mut col, row.quantity, &number_format)?;
            }
            if self.table.has_amount {
                write_number(worksheet, excel_row, &mut col, row.amount, &number_format)?;
            }
        }

        for (col_idx, width) in self.column_widths(&headers).into_iter().enumerate() {
            worksheet
                .set_column_width(col_idx as u16, width)
                .map_err(|e| RollupError::Export(format!("Failed to set column width: {}", e)))?;
        }

        Ok(workbook)
    }

    /// Width per column from the longest rendered cell, padded the same way
    /// the reports have historically been sized: (max_len + 2) * 1.2.
    fn column_widths(&self, headers: &[&str]) -> Vec<f64> {
        let mut max_lens: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.table.rows {
            for (col_idx, text) in self.rendered_cells(row).into_iter().enumerate() {
                let len = text.chars().count();
                if len > max_lens[col_idx] {
                    max_lens[col_idx] = len;
                }
            }
        }
        max_lens
            .into_iter()
            .map(|len| (len + 2) as f64 * 1.2)
            .collect()
    }

    fn rendered_cells(&self, row: &SummaryRow) -> Vec<String> {
        let mut cells = vec![row.period.clone(), row.specification.clone()];
        if self.table.has_unit {
            cells.push(row.unit.clone().unwrap_or_default());
        }
        if self.table.has_quantity {
            cells.push(format_grouped(row.quantity));
        }
        if self.table.has_amount {
            cells.push(format_grouped(row.amount));
        }
        cells
    }
}

fn write_text(
    worksheet: &mut Worksheet,
    row: u32,
    col: &mut u16,
    value: &str,
    format: &Format,
) -> RollupResult<()> {
    worksheet
        .write_string_with_format(row, *col, value, format)
        .map_err(|e| RollupError::Export(format!("Failed to write text: {}", e)))?;
    *col += 1;
    Ok(())
}

fn write_number(
    worksheet: &mut Worksheet,
    row: u32,
    col: &mut u16,
    value: f64,
    format: &Format,
) -> RollupResult<()> {
    worksheet
        .write_number_with_format(row, *col, value, format)
        .map_err(|e| RollupError::Export(format!("Failed to write number: {}", e)))?;
    *col += 1;
    Ok(())
}

/// Thousands-grouped rendering of a total, fraction kept only when present.
/// Mirrors the `#,##0` number format so width estimation matches what Excel
/// displays.
pub fn format_grouped(value: f64) -> String {
    let rounded = (value * 1e6).round() / 1e6;
    let negative = rounded < 0.0;
    let abs = rounded.abs();
    let int_part = abs.trunc() as u64;
    let frac = format!("{:.6}", abs.fract())
        .trim_start_matches('0')
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string();

    let digits = int_part.to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    out.push_str(&frac);
    out
}
