use clap::{Parser, Subcommand};
use delivery_rollup::cli;
use delivery_rollup::error::RollupResult;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rollup")]
#[command(about = "Monthly per-specification rollup for delivery reports.")]
#[command(long_about = "Rollup - Monthly & per-specification delivery totals

Reads a delivery report (.xlsx or delimited text in utf-8/cp949/euc-kr),
buckets rows by month and specification, sums quantity and amount, and
exports a styled Excel summary.

INPUT EXPECTATIONS:
  Two title rows are skipped; row 3 holds the column names.
  Required columns: 납품일 (delivery date), 규 격 (specification)
  Optional columns: 단위 (unit), 수량 (quantity), 합계금액 (amount)

COMMANDS:
  summarize  - Aggregate a report and export the summary workbook
  check      - Verify a report is summarizable without exporting
  watch      - Re-summarize whenever the report file changes

EXAMPLES:
  rollup summarize deliveries.xlsx
  rollup summarize deliveries.csv -o summary.xlsx --json
  rollup check deliveries.xlsx
  rollup watch deliveries.xlsx -o summary.xlsx")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Aggregate a delivery report into monthly per-spec totals.

Rows whose specification contains 합계 are pre-existing subtotals and are
dropped. Empty date cells inherit the nearest preceding date (merged cells).
Rows whose date cannot be parsed are excluded from the totals and reported.

The output workbook defaults to monthly_specification_summary.xlsx.")]
    /// Aggregate a report and export the summary workbook
    Summarize {
        /// Path to the report file (.xlsx or delimited text)
        input: PathBuf,

        /// Output Excel file path (.xlsx)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the aggregated table as JSON instead of the text preview
        #[arg(long)]
        json: bool,

        /// Show verbose processing steps
        #[arg(short, long)]
        verbose: bool,
    },

    #[command(long_about = "Check that a report can be summarized.

Runs ingestion, the required-column check and normalization, then reports
row counts and diagnostics without writing any output file.")]
    /// Verify a report is summarizable without exporting
    Check {
        /// Path to the report file
        input: PathBuf,

        /// Show verbose processing steps
        #[arg(short, long)]
        verbose: bool,
    },

    #[command(long_about = "Watch a report file and re-summarize on changes.

Monitors the file's directory and re-runs the summarize pipeline each time
the file is written, exporting the workbook anew.

Press Ctrl+C to stop watching.")]
    /// Re-summarize whenever the report file changes
    Watch {
        /// Path to the report file to watch
        input: PathBuf,

        /// Output Excel file path (.xlsx)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> RollupResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Summarize {
            input,
            output,
            json,
            verbose,
        } => cli::summarize(input, output, json, verbose),

        Commands::Check { input, verbose } => cli::check(input, verbose),

        Commands::Watch {
            input,
            output,
            verbose,
        } => cli::watch(input, output, verbose),
    }
}
