//! Report formatting and printing utilities.
//!
//! Displays translate-pass issues in cargo-style format. Separate from the
//! engine so weft can be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::issues::{Issue, Report, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format to stdout.
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
    sorted.sort_by(|a, b| {
        (a.location(), a.rule())
            .partial_cmp(&(b.location(), b.rule()))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    // Gutter width for source context lines.
    let max_line_width = sorted
        .iter()
        .map(|issue| issue.location().line.to_string().len())
        .max()
        .unwrap_or(1);

    for issue in &sorted {
        print_issue(issue, writer, max_line_width);
    }

    print_summary(&sorted, writer);
}

/// Print a success message when nothing was reported.
pub fn print_success(source_files: usize, rewritten: usize, locales: usize) {
    print_success_to(source_files, rewritten, locales, &mut io::stdout().lock());
}

/// Print a success message to a custom writer.
pub fn print_success_to<W: Write>(
    source_files: usize,
    rewritten: usize,
    locales: usize,
    writer: &mut W,
) {
    let msg = format!(
        "Translated {} of {} source {} against {} {}",
        rewritten,
        source_files,
        if source_files == 1 { "file" } else { "files" },
        locales,
        if locales == 1 { "locale" } else { "locales" },
    );
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), msg.green());
}

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let location = issue.location();

    let severity = issue.severity();
    let severity_str = match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: {}  {}",
        severity_str,
        issue.message(),
        issue.rule().to_string().dimmed().cyan()
    );

    // Clickable location: --> path:line:col
    if location.line > 0 {
        let _ = writeln!(
            writer,
            "  {} {}:{}:{}",
            "-->".blue(),
            location.file_path,
            location.line,
            location.col
        );
    } else {
        let _ = writeln!(writer, "  {} {}", "-->".blue(), location.file_path);
    }

    if let Some(source_line) = &location.source_line {
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
            location.line.to_string().blue(),
            "|".blue(),
            source_line,
            width = max_line_width
        );

        // Caret pointing to the column (col is 1-based).
        let prefix = if location.col > 1 {
            source_line
                .chars()
                .take(location.col - 1)
                .collect::<String>()
        } else {
            String::new()
        };
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

    let _ = writeln!(writer);
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let errors = issues
        .iter()
        .filter(|issue| issue.severity() == Severity::Error)
        .count();
    let warnings = issues.len() - errors;

    let mut parts = Vec::new();
    if errors > 0 {
        parts.push(format!(
            "{} {}",
            errors,
            if errors == 1 { "error" } else { "errors" }
        ));
    }
    if warnings > 0 {
        parts.push(format!(
            "{} {}",
            warnings,
            if warnings == 1 { "warning" } else { "warnings" }
        ));
    }

    let summary = format!("Found {}", parts.join(", "));
    let mark = if errors > 0 {
        FAILURE_MARK.red()
    } else {
        FAILURE_MARK.yellow()
    };
    let _ = writeln!(writer, "{} {}", mark, summary.bold());
}
