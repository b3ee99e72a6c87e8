//! Output formatting for tally reports.
//!
//! Provides functions to render a [`TallyReport`] as a plain-text table, a Markdown
//! table, or JSON. Rows are ordered by extension; the totals row comes last.

use crate::{TallyError, TallyReport, TallySnapshot};
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

const HEADERS: [&str; 6] = ["File Type", "Files", "Lines", "Code", "Comments", "Blanks"];

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Markdown,
    Json,
}

/// Formats the report into a string.
///
/// `elapsed`, when given, is printed after the table (or added as `elapsed_ms`
/// in JSON).
pub fn format_result(
    report: &TallyReport,
    format: OutputFormat,
    pretty: bool,
    elapsed: Option<Duration>,
) -> Result<String, TallyError> {
    match format {
        OutputFormat::Table => Ok(format_table(report, elapsed)),
        OutputFormat::Markdown => Ok(format_markdown(report, elapsed)),
        OutputFormat::Json => format_json(report, pretty, elapsed),
    }
}

/// Writes the formatted report to a file.
pub fn write_result_to_file(
    report: &TallyReport,
    format: OutputFormat,
    path: impl AsRef<Path>,
    pretty: bool,
    elapsed: Option<Duration>,
) -> Result<(), TallyError> {
    let content = format_result(report, format, pretty, elapsed)?;
    fs::write(&path, content).map_err(|e| TallyError::Write {
        path: path.as_ref().to_path_buf(),
        source: e,
    })?;
    Ok(())
}

/// Formats a number with thousands separators.
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

// ----------------------- Internal formatting -----------------------

fn row(label: &str, tally: &TallySnapshot) -> [String; 6] {
    [
        label.to_string(),
        format_number(tally.files),
        format_number(tally.lines),
        format_number(tally.code),
        format_number(tally.comments),
        format_number(tally.blanks),
    ]
}

fn rows(report: &TallyReport) -> Vec<[String; 6]> {
    report
        .extensions
        .iter()
        .map(|(ext, tally)| row(ext, tally))
        .collect()
}

fn push_footer(out: &mut String, report: &TallyReport, elapsed: Option<Duration>) {
    out.push_str(&format!(
        "Searched {} directories\n",
        format_number(report.directories)
    ));
    if let Some(elapsed) = elapsed {
        out.push_str(&format!("Took: {:?}\n", elapsed));
    }
    if !report.skipped.is_empty() {
        out.push_str(&format!("Skipped {} paths:\n", report.skipped.len()));
        for skipped in &report.skipped {
            out.push_str(&format!("  {}\n", skipped.reason));
        }
    }
}

fn format_table(report: &TallyReport, elapsed: Option<Duration>) -> String {
    let body = rows(report);
    let total = row("Total", &report.total);
    let mut widths = HEADERS.map(str::len);
    for cells in body.iter().chain(std::iter::once(&total)) {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.len());
        }
    }
    let line_width = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
    let rule = "-".repeat(line_width);
    let render = |cells: &[String; 6]| {
        let mut line = format!("{:<w$}", cells[0], w = widths[0]);
        for (cell, width) in cells.iter().zip(widths).skip(1) {
            line.push_str(&format!("  {:>w$}", cell, w = width));
        }
        line.push('\n');
        line
    };

    let mut out = String::with_capacity(1024);
    out.push_str(&render(&HEADERS.map(String::from)));
    out.push_str(&rule);
    out.push('\n');
    for cells in &body {
        out.push_str(&render(cells));
    }
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&render(&total));
    out.push('\n');
    push_footer(&mut out, report, elapsed);
    out
}

fn format_markdown(report: &TallyReport, elapsed: Option<Duration>) -> String {
    let mut out = String::with_capacity(1024);
    out.push_str(&format!("| {} |\n", HEADERS.join(" | ")));
    out.push_str("|---|---:|---:|---:|---:|---:|\n");
    for cells in rows(report) {
        out.push_str(&format!("| `{}` | {} |\n", cells[0], cells[1..].join(" | ")));
    }
    let total = row("Total", &report.total);
    out.push_str(&format!("| **{}** | {} |\n", total[0], total[1..].join(" | ")));
    out.push('\n');
    push_footer(&mut out, report, elapsed);
    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    report: &'a TallyReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    elapsed_ms: Option<u64>,
}

fn format_json(
    report: &TallyReport,
    pretty: bool,
    elapsed: Option<Duration>,
) -> Result<String, TallyError> {
    let json = JsonReport {
        report,
        elapsed_ms: elapsed.map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX)),
    };
    let out = if pretty {
        serde_json::to_string_pretty(&json)?
    } else {
        serde_json::to_string(&json)?
    };
    Ok(out)
}
