//! Report formatting and printing utilities.
//!
//! This module provides functions to display issues in cargo-style format.
//! Separate from core logic to allow intlkeys to be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{
    CommandResult, CommandSummary, GenerateOutcome, GenerateSummary, InitSummary, KeysSummary,
    ResolveSummary,
};
use crate::config::CONFIG_FILE_NAME;
use crate::issues::{Issue, Report, ReportLocation, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format to stdout.
///
/// Issues are sorted and displayed with severity, location, source context,
/// and details.
pub fn report(issues: &[Issue]) {
    report_to(issues, &mut io::stdout().lock());
}

/// Print issues to a custom writer.
///
/// Useful for testing or redirecting output.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort();

    // Calculate max line number width for alignment
    let max_line_width = calculate_max_line_width(&sorted);

    for issue in &sorted {
        print_issue(issue, writer, max_line_width);
    }

    print_summary(&sorted, writer);
}

/// Print a success message to a custom writer.
pub fn print_success_to<W: Write>(locale_files: usize, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Checked {} locale {} - no issues found",
            locale_files,
            plural(locale_files, "file", "files")
        )
        .green()
    );
}

pub fn print(result: &CommandResult) {
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    print_to(result, &mut stdout, &mut stderr);
}

/// Print a command result: issues and results to `out`, command errors to `err`.
pub fn print_to<W: Write, E: Write>(result: &CommandResult, out: &mut W, err: &mut E) {
    report_to(&result.issues, out);

    match &result.summary {
        CommandSummary::Check => {
            if result.issues.is_empty() {
                print_success_to(result.locale_files_checked, out);
            }
        }
        CommandSummary::Generate(summary) => print_generate(summary, out),
        CommandSummary::Keys(summary) => print_keys(summary, out),
        CommandSummary::Resolve(summary) => print_resolve(summary, out, err),
        CommandSummary::Init(summary) => print_init(summary, out, err),
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let loc = issue.location();
    let (file_path, line, col, source_line) = extract_location_info(&loc);

    // Print severity and message (cargo-style)
    let severity = issue.report_severity();
    let severity_str = match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    // Print clickable location: --> path:line:col
    match line {
        Some(line) => {
            let _ = writeln!(writer, "  {} {}:{}:{}", "-->".blue(), file_path, line, col);
        }
        None => {
            let _ = writeln!(writer, "  {} {}", "-->".blue(), file_path);
        }
    }

    // Print source context if available
    if let (Some(line), Some(source_line)) = (line, source_line) {
        let caret_char = match severity {
            Severity::Error => "^".red(),
            Severity::Warning => "^".yellow(),
        };

        let _ = writeln!(
            writer,
            "{:>width$} {}",
            "",
            "|".blue(),
            width = max_line_width
        );
        let _ = writeln!(
            writer,
            "{:>width$} {} {}",
            line.to_string().blue(),
            "|".blue(),
            source_line,
            width = max_line_width
        );

        // Caret pointing to the column (col is 1-based)
        let prefix: String = source_line.chars().take(col.saturating_sub(1)).collect();
        let caret_padding = UnicodeWidthStr::width(prefix.as_str());
        let _ = writeln!(
            writer,
            "{:>width$} {} {:>padding$}{}",
            "",
            "|".blue(),
            "",
            caret_char,
            width = max_line_width,
            padding = caret_padding
        );
    }

    // Print details if present (cargo-style note)
    if let Some(details) = issue.details() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            details,
            width = max_line_width
        );
    }

    // Print hint if present
    if let Some(hint) = issue.hint() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "hint:".bold().cyan(),
            hint,
            width = max_line_width
        );
    }

    let _ = writeln!(writer); // Empty line between issues
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Warning)
        .count();
    let total_problems = total_errors + total_warnings;

    if total_problems > 0 {
        let _ = writeln!(
            writer,
            "{} {} {} ({} {}, {} {})",
            FAILURE_MARK.red(),
            total_problems,
            plural(total_problems, "problem", "problems"),
            total_errors,
            plural(total_errors, "error", "errors").red(),
            total_warnings,
            plural(total_warnings, "warning", "warnings").yellow()
        );
    }
}

fn print_generate<W: Write>(summary: &GenerateSummary, writer: &mut W) {
    let path = summary.output.display();
    let keys = format!(
        "{} {}",
        summary.key_count,
        plural(summary.key_count, "key", "keys")
    );
    let _ = match summary.outcome {
        GenerateOutcome::Written => writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Generated {} ({}, {})", path, keys, summary.target).green()
        ),
        GenerateOutcome::Unchanged => writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("{} is up to date ({})", path, keys).green()
        ),
        GenerateOutcome::Stale => writeln!(
            writer,
            "{} {} is out of date (run {} to update it)",
            FAILURE_MARK.red(),
            path,
            "intlkeys generate".cyan()
        ),
        GenerateOutcome::Missing => writeln!(
            writer,
            "{} {} does not exist (run {} to create it)",
            FAILURE_MARK.red(),
            path,
            "intlkeys generate".cyan()
        ),
        GenerateOutcome::Aborted => writeln!(
            writer,
            "{} Not writing {}: fix the errors above first",
            FAILURE_MARK.red(),
            path
        ),
    };
}

fn print_keys<W: Write>(summary: &KeysSummary, writer: &mut W) {
    for key in &summary.keys {
        let _ = writeln!(writer, "{}", key);
    }
}

fn print_resolve<W: Write, E: Write>(summary: &ResolveSummary, out: &mut W, err: &mut E) {
    match &summary.result {
        Ok(message) => {
            let _ = writeln!(out, "{}", message);
        }
        Err(error) => {
            let _ = writeln!(
                err,
                "{}: {} ({} in {})",
                "error".bold().red(),
                error,
                summary.key,
                summary.locale
            );
        }
    }
}

fn print_init<W: Write, E: Write>(summary: &InitSummary, out: &mut W, err: &mut E) {
    if summary.created {
        let _ = writeln!(
            out,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
    if let Some(error) = &summary.error {
        let _ = writeln!(err, "Error: {}", error);
    }
}

fn plural(count: usize, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 { one } else { many }
}

/// File path, line, column and source line of an issue's location.
///
/// File-level issues have no line.
fn extract_location_info<'a>(
    loc: &'a ReportLocation<'a>,
) -> (&'a str, Option<usize>, usize, Option<&'a str>) {
    match loc {
        ReportLocation::Message(ctx) => (
            ctx.file_path(),
            Some(ctx.line()),
            ctx.col(),
            Some(ctx.source_line.as_str()).filter(|line| !line.is_empty()),
        ),
        ReportLocation::File { path } => (*path, None, 0, None),
    }
}

fn calculate_max_line_width(issues: &[Issue]) -> usize {
    issues
        .iter()
        .filter_map(|i| match i.location() {
            ReportLocation::Message(ctx) => Some(ctx.line()),
            ReportLocation::File { .. } => None,
        })
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

// ============================================================
// Tests
// ============================================================
