use std::path::Path;

use colored::Colorize;

use finvoice_payments::batch::BatchReport;

/// Summary line written after the per-file errors.
const SUMMARY_RULE: &str = "---[Summary]-------------------------------------";

/// Per-file errors in red, then the totals.
///
/// `saved_to` is the written CSV path, or `None` when nothing was written.
/// Goes to stderr when stdout carries the CSV.
pub fn print_summary(report: &BatchReport, saved_to: Option<&Path>, to_stderr: bool) {
    for line in summary_lines(report, saved_to) {
        if to_stderr {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }
}

fn summary_lines(report: &BatchReport, saved_to: Option<&Path>) -> Vec<String> {
    let mut lines: Vec<String> = report
        .failures
        .iter()
        .map(|f| format!("Error while processing file {}: {}", f.file_name, f.error).red().to_string())
        .collect();

    lines.push(SUMMARY_RULE.to_string());
    let generated = report.generated();
    lines.push(match saved_to {
        Some(path) if generated > 0 => format!("Generated {generated} payments and saved them to {}", path.display())
            .green()
            .to_string(),
        _ if generated > 0 => format!("Generated {generated} payments").green().to_string(),
        _ => "Found 0 payments to generate".yellow().to_string(),
    });
    lines.push(
        format!("Skipped {} duplicate invoices", report.duplicates)
            .yellow()
            .to_string(),
    );
    lines.push(
        format!("Skipped {} invoices because of errors", report.error_count())
            .red()
            .to_string(),
    );
    lines
}
