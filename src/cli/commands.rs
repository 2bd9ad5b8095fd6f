use crate::error::{RollupError, RollupResult};
use crate::export::{format_grouped, SummaryExporter};
use crate::pipeline::{self, Summary};
use crate::types::DEFAULT_EXPORT_STEM;
use colored::Colorize;
use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebouncedEventKind};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::time::Duration;

/// Execute the summarize command
pub fn summarize(
    input: PathBuf,
    output: Option<PathBuf>,
    json: bool,
    verbose: bool,
) -> RollupResult<()> {
    println!("{}", "📊 Rollup - Monthly per-spec summary".bold().green());
    println!("   Input: {}\n", input.display());

    let summary = summarize_internal(&input, verbose)?;

    if json {
        let rendered = serde_json::to_string_pretty(&summary.table)
            .map_err(|e| RollupError::Process(format!("JSON rendering failed: {}", e)))?;
        println!("{rendered}");
    } else {
        print_preview(&summary);
    }

    let output = output.unwrap_or_else(|| PathBuf::from(format!("{DEFAULT_EXPORT_STEM}.xlsx")));
    SummaryExporter::new(&summary.table).write_to_path(&output)?;

    println!("{}", "✅ Summary exported!".bold().green());
    println!("   Excel file: {}\n", output.display());
    Ok(())
}

/// Execute the check command - ingest and normalize without exporting
pub fn check(input: PathBuf, verbose: bool) -> RollupResult<()> {
    println!("{}", "🔎 Rollup - Report check".bold().green());
    println!("   File: {}\n", input.display());

    match summarize_internal(&input, verbose) {
        Ok(summary) => {
            println!(
                "   {} groups across {} source rows",
                summary.table.len().to_string().bold(),
                summary.stats.rows_in
            );
            if summary.stats.dates_unparseable > 0 {
                println!(
                    "{}",
                    format!(
                        "⚠️  {} row(s) have unparseable delivery dates and would be excluded",
                        summary.stats.dates_unparseable
                    )
                    .yellow()
                );
            }
            println!("\n{}", "✅ Report is summarizable!".bold().green());
            Ok(())
        }
        Err(e) => {
            println!("{} {}", "❌ Report check failed:".bold().red(), e);
            Err(e)
        }
    }
}

/// Execute the watch command - re-summarize whenever the input file changes
pub fn watch(input: PathBuf, output: Option<PathBuf>, verbose: bool) -> RollupResult<()> {
    println!("{}", "👁️  Rollup - Watch Mode".bold().green());
    println!("   Watching: {}", input.display());
    println!("   Press {} to stop\n", "Ctrl+C".bold().yellow());

    if !input.exists() {
        return Err(RollupError::Process(format!(
            "File not found: {}",
            input.display()
        )));
    }

    let canonical_path = input.canonicalize().map_err(RollupError::Io)?;
    let parent_dir = canonical_path
        .parent()
        .ok_or_else(|| RollupError::Process("Cannot determine parent directory".to_string()))?;

    let (tx, rx) = channel();

    // Debounce so editors that write in several bursts trigger once
    let mut debouncer = new_debouncer(Duration::from_millis(200), tx)
        .map_err(|e| RollupError::Process(format!("Failed to create file watcher: {}", e)))?;

    debouncer
        .watcher()
        .watch(parent_dir, RecursiveMode::NonRecursive)
        .map_err(|e| RollupError::Process(format!("Failed to watch directory: {}", e)))?;

    if verbose {
        println!(
            "   {} {}",
            "Watching directory:".cyan(),
            parent_dir.display()
        );
    }

    println!("{}", "🔄 Initial run...".cyan());
    run_watch_action(&input, output.as_deref(), verbose);
    println!();

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let relevant = events.iter().any(|event| {
                    if event.kind != DebouncedEventKind::Any {
                        return false;
                    }
                    if let Ok(event_canonical) = event.path.canonicalize() {
                        if event_canonical == canonical_path {
                            return true;
                        }
                    }
                    match (event.path.file_name(), canonical_path.file_name()) {
                        (Some(changed), Some(ours)) => changed == ours,
                        _ => false,
                    }
                });

                if relevant {
                    println!(
                        "\n{} {}",
                        "🔄 Change detected at".cyan(),
                        timestamp().cyan()
                    );
                    run_watch_action(&input, output.as_deref(), verbose);
                    println!();
                }
            }
            Ok(Err(error)) => {
                eprintln!("{} Watch error: {}", "❌".red(), error);
            }
            Err(e) => {
                eprintln!("{} Channel error: {}", "❌".red(), e);
                break;
            }
        }
    }

    Ok(())
}

/// Run the pipeline on a file and report progress
fn summarize_internal(input: &Path, verbose: bool) -> RollupResult<Summary> {
    if verbose {
        println!("{}", "📖 Reading report...".cyan());
    }
    let bytes = fs::read(input)?;
    let hint = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string());

    let summary = pipeline::summarize(&bytes, &hint)?;

    if verbose {
        println!("   Format: {}", summary.format.cyan());
        println!("   Rows read: {}", summary.stats.rows_in);
        println!(
            "   Subtotal rows dropped: {}",
            summary.stats.subtotal_rows_dropped
        );
        println!(
            "   Unparseable dates: {}\n",
            summary.stats.dates_unparseable
        );
    }
    Ok(summary)
}

fn run_watch_action(input: &Path, output: Option<&Path>, verbose: bool) {
    let result = summarize_internal(input, verbose).and_then(|summary| {
        let output = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(format!("{DEFAULT_EXPORT_STEM}.xlsx")));
        SummaryExporter::new(&summary.table).write_to_path(&output)?;
        Ok((summary, output))
    });

    match result {
        Ok((summary, output)) => println!(
            "{} {} groups → {}",
            "✅".green(),
            summary.table.len(),
            output.display()
        ),
        Err(e) => println!("{} {}", "❌ Summarize failed:".bold().red(), e),
    }
}

/// Print the aggregated table to the terminal
fn print_preview(summary: &Summary) {
    let table = &summary.table;
    println!(
        "{}",
        format!("✅ Aggregated {} group(s) [{}]", table.len(), summary.format)
            .bold()
            .green()
    );
    if summary.stats.subtotal_rows_dropped > 0 {
        println!(
            "   {} pre-existing subtotal row(s) excluded",
            summary.stats.subtotal_rows_dropped
        );
    }
    if summary.stats.dates_unparseable > 0 {
        println!(
            "{}",
            format!(
                "   ⚠️  {} row(s) without a parseable date were excluded",
                summary.stats.dates_unparseable
            )
            .yellow()
        );
    }
    println!();

    for row in &table.rows {
        let mut line = format!(
            "   {} {}",
            row.period.bright_blue().bold(),
            row.specification.cyan()
        );
        if table.has_unit {
            line.push_str(&format!(" [{}]", row.unit.as_deref().unwrap_or("-")));
        }
        if table.has_quantity {
            line.push_str(&format!("  qty {}", format_grouped(row.quantity).bold()));
        }
        if table.has_amount {
            line.push_str(&format!("  amt {}", format_grouped(row.amount).bold()));
        }
        println!("{line}");
    }
    println!();
}

fn timestamp() -> String {
    use std::time::SystemTime;
    let now = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default();
    let secs = now.as_secs();
    let hours = (secs / 3600) % 24;
    let minutes = (secs / 60) % 60;
    let seconds = secs % 60;
    format!("{:02}:{:02}:{:02} UTC", hours, minutes, seconds)
}
