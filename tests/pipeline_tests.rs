//! End-to-end pipeline tests across input formats

use delivery_rollup::error::RollupError;
use delivery_rollup::pipeline::{summarize, Pipeline};
use pretty_assertions::assert_eq;
use rust_xlsxwriter::Workbook;

const CSV_REPORT: &str = "\
월별 납품 현황,,,,
작성일: 2024-03-02,,,,
납품일,규 격,단위,수량,합계금액
2024-01-05,A,EA,\"1,000\",\"10,000\"
,A,EA,500,\"5,000\"
2024-02-01,합계,EA,999,999
";

// ═══════════════════════════════════════════════════════════════════════════
// DELIMITED TEXT
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_csv_utf8_end_to_end() {
    let summary = summarize(CSV_REPORT.as_bytes(), "report.csv").unwrap();

    assert_eq!(summary.format, "csv(utf-8)");
    assert_eq!(summary.stats.rows_in, 3);
    assert_eq!(summary.stats.subtotal_rows_dropped, 1);
    assert_eq!(summary.table.len(), 1);

    let row = &summary.table.rows[0];
    assert_eq!(row.period, "2024-01");
    assert_eq!(row.specification, "A");
    assert_eq!(row.quantity, 1500.0);
    assert_eq!(row.amount, 15_000.0);
    assert_eq!(row.unit.as_deref(), Some("EA"));
}

#[test]
fn test_csv_cp949_end_to_end() {
    let (encoded, _, had_errors) = encoding_rs::EUC_KR.encode(CSV_REPORT);
    assert!(!had_errors);

    let summary = summarize(&encoded, "report.csv").unwrap();
    assert_eq!(summary.format, "csv(cp949)");
    assert_eq!(summary.table.len(), 1);
    assert_eq!(summary.table.rows[0].quantity, 1500.0);
}

#[test]
fn test_csv_without_amount_column() {
    let report = "\
제목,,
,,
납품일,규 격,수량
2024-01-05,A,10
2024-01-20,A,5
";
    let summary = summarize(report.as_bytes(), "report.csv").unwrap();
    assert!(summary.table.has_quantity);
    assert!(!summary.table.has_amount);
    assert!(!summary.table.has_unit);
    assert_eq!(summary.table.headers(), vec!["월", "규 격", "수량"]);
    assert_eq!(summary.table.rows[0].quantity, 15.0);
}

#[test]
fn test_missing_spec_rows_group_under_placeholder() {
    let report = "\
제목,,
,,
납품일,규 격,수량
2024-01-05,,10
2024-01-06,,5
";
    let summary = summarize(report.as_bytes(), "report.csv").unwrap();
    assert_eq!(summary.table.len(), 1);
    assert_eq!(summary.table.rows[0].specification, "규격 미기재");
    assert_eq!(summary.table.rows[0].quantity, 15.0);
}

#[test]
fn test_unparseable_dates_are_excluded_and_counted() {
    let report = "\
제목,,
,,
납품일,규 격,수량
미정,A,10
2024-01-05,A,5
";
    let summary = summarize(report.as_bytes(), "report.csv").unwrap();
    assert_eq!(summary.stats.dates_unparseable, 1);
    assert_eq!(summary.table.rows[0].quantity, 5.0);
}

// ═══════════════════════════════════════════════════════════════════════════
// SPREADSHEET
// ═══════════════════════════════════════════════════════════════════════════

fn xlsx_report_bytes() -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    // two title rows, then the header row
    sheet.write_string(0, 0, "월별 납품 현황").unwrap();
    sheet.write_string(1, 0, "작성일: 2024-03-02").unwrap();
    for (col, name) in ["납품일", "규 격", "단위", "수량", "합계금액"]
        .iter()
        .enumerate()
    {
        sheet.write_string(2, col as u16, *name).unwrap();
    }

    sheet.write_string(3, 0, "2024-01-05").unwrap();
    sheet.write_string(3, 1, "A").unwrap();
    sheet.write_string(3, 2, "EA").unwrap();
    sheet.write_number(3, 3, 1000.0).unwrap();
    sheet.write_number(3, 4, 10_000.0).unwrap();

    // merged-cell style continuation: no date, same spec
    sheet.write_string(4, 1, "A").unwrap();
    sheet.write_string(4, 2, "EA").unwrap();
    sheet.write_number(4, 3, 500.0).unwrap();
    sheet.write_number(4, 4, 5000.0).unwrap();

    workbook.save_to_buffer().unwrap()
}

#[test]
fn test_xlsx_end_to_end() {
    let bytes = xlsx_report_bytes();
    let summary = summarize(&bytes, "report.xlsx").unwrap();

    assert_eq!(summary.format, "xlsx");
    assert_eq!(summary.table.len(), 1);

    let row = &summary.table.rows[0];
    assert_eq!(row.period, "2024-01");
    assert_eq!(row.quantity, 1500.0);
    assert_eq!(row.amount, 15_000.0);
    assert_eq!(row.unit.as_deref(), Some("EA"));
}

// ═══════════════════════════════════════════════════════════════════════════
// ERRORS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_missing_required_columns() {
    let report = "\
제목,,
,,
품명,수량,금액
부품,10,100
";
    match summarize(report.as_bytes(), "report.csv") {
        Err(RollupError::MissingColumns(cols)) => {
            assert_eq!(cols, vec!["납품일".to_string(), "규 격".to_string()]);
        }
        other => panic!("expected MissingColumns, got {:?}", other),
    }
}

#[test]
fn test_unreadable_input() {
    let bytes = vec![0xff; 16];
    match summarize(&bytes, "garbage.bin") {
        Err(RollupError::UnreadableFile(_)) => {}
        other => panic!("expected UnreadableFile, got {:?}", other),
    }
}

#[test]
fn test_unreadable_error_carries_attempted_strategies() {
    let bytes = vec![0xff; 16];
    let err = summarize(&bytes, "garbage.bin").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("xlsx"));
    assert!(message.contains("csv(utf-8)"));
    assert!(message.contains("csv(cp949)"));
}

// ═══════════════════════════════════════════════════════════════════════════
// CACHING & DETERMINISM
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_cached_and_uncached_agree() {
    let mut cached = Pipeline::with_cache();
    let mut plain = Pipeline::new();

    let a = cached.run(CSV_REPORT.as_bytes(), "report.csv").unwrap();
    let b = cached.run(CSV_REPORT.as_bytes(), "report.csv").unwrap();
    let c = plain.run(CSV_REPORT.as_bytes(), "report.csv").unwrap();

    assert_eq!(a, b);
    assert_eq!(a, c);
}

#[test]
fn test_identical_input_identical_output() {
    let first = summarize(CSV_REPORT.as_bytes(), "report.csv").unwrap();
    let second = summarize(CSV_REPORT.as_bytes(), "report.csv").unwrap();
    assert_eq!(first, second);
}
