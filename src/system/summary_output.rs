use std::time::Duration;

use serde::Serialize;

use crate::args::OutputFormat;
use crate::error::AppResult;
use crate::metrics::RunResult;

const TABLE_HEADER: [&str; 7] = ["URL", "STATUS", "TIMES", "AVG", "MIN", "MAX", "TOTAL AVG"];

#[derive(Debug, Serialize)]
pub(crate) struct ResultSummary<'res> {
    pub(crate) name: Option<&'res str>,
    pub(crate) url: &'res str,
    pub(crate) attempts: u64,
    pub(crate) waves: u64,
    pub(crate) total_elapsed_secs: f64,
    pub(crate) average_elapsed_secs: f64,
    pub(crate) min_elapsed_secs: f64,
    pub(crate) max_elapsed_secs: f64,
    pub(crate) statuses: Vec<StatusSummary>,
}

#[derive(Debug, Serialize)]
pub(crate) struct StatusSummary {
    pub(crate) status: u16,
    pub(crate) count: u64,
    pub(crate) cumulative_elapsed_secs: f64,
    pub(crate) average_elapsed_secs: f64,
}

impl<'res> ResultSummary<'res> {
    pub(crate) fn new(result: &'res RunResult, name: Option<&'res str>) -> Self {
        let statuses = result
            .status_buckets()
            .iter()
            .map(|(status, bucket)| StatusSummary {
                status: *status,
                count: bucket.total_count(),
                cumulative_elapsed_secs: bucket.cumulative_elapsed_secs(),
                average_elapsed_secs: bucket.average_elapsed().as_secs_f64(),
            })
            .collect();
        Self {
            name,
            url: result.target_url().as_str(),
            attempts: result.attempts(),
            waves: result.waves(),
            total_elapsed_secs: result.total_elapsed_secs(),
            average_elapsed_secs: result.average_elapsed_secs(),
            min_elapsed_secs: result.min_elapsed_secs(),
            max_elapsed_secs: result.max_elapsed_secs(),
            statuses,
        }
    }
}

/// Writes one finished run to stdout in the requested format.
///
/// # Errors
///
/// Returns an error when the JSON summary cannot be serialized.
pub(crate) fn print_result(
    result: &RunResult,
    name: Option<&str>,
    format: OutputFormat,
) -> AppResult<()> {
    match format {
        OutputFormat::Text => {
            if let Some(name) = name {
                println!("Case: {}", name);
            }
            for line in result_table_lines(result) {
                println!("{}", line);
            }
        }
        OutputFormat::Json => {
            let summary = ResultSummary::new(result, name);
            println!("{}", serde_json::to_string(&summary)?);
        }
    }
    Ok(())
}

/// Renders the status table: one row per status code, run-wide min/max and
/// average on the first row, elapsed wall time in the footer.
pub(crate) fn result_table_lines(result: &RunResult) -> Vec<String> {
    let mut rows: Vec<[String; 7]> = Vec::with_capacity(result.status_buckets().len());
    for (idx, (status, bucket)) in result.status_buckets().iter().enumerate() {
        let row = if idx == 0 {
            [
                result.target_url().to_string(),
                status.to_string(),
                bucket.total_count().to_string(),
                format_secs(bucket.average_elapsed()),
                format_secs(result.min_elapsed().unwrap_or_default()),
                format_secs(result.max_elapsed().unwrap_or_default()),
                format_secs(result.average_elapsed()),
            ]
        } else {
            [
                String::new(),
                status.to_string(),
                bucket.total_count().to_string(),
                format_secs(bucket.average_elapsed()),
                String::new(),
                String::new(),
                String::new(),
            ]
        };
        rows.push(row);
    }
    let footer = format!("ELAPSED {}", format_secs(result.total_elapsed()));

    let mut widths = TABLE_HEADER.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }
    if let Some(first) = widths.first_mut() {
        *first = (*first).max(footer.chars().count());
    }

    let separator = separator_line(&widths);
    let mut lines = Vec::with_capacity(rows.len().saturating_add(5));
    lines.push(separator.clone());
    lines.push(table_line(&widths, TABLE_HEADER.iter().copied()));
    lines.push(separator.clone());
    for row in &rows {
        lines.push(table_line(&widths, row.iter().map(String::as_str)));
    }
    lines.push(separator.clone());
    lines.push(table_line(
        &widths,
        std::iter::once(footer.as_str()).chain(std::iter::repeat_n("", 6)),
    ));
    lines.push(separator);
    lines
}

pub(crate) fn format_secs(duration: Duration) -> String {
    format!("{:.2}s", duration.as_secs_f64())
}

fn separator_line(widths: &[usize]) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.push_str(&"-".repeat(width.saturating_add(2)));
        line.push('+');
    }
    line
}

fn table_line<'cell>(widths: &[usize], cells: impl Iterator<Item = &'cell str>) -> String {
    let mut line = String::from("|");
    for (width, cell) in widths.iter().zip(cells) {
        line.push(' ');
        line.push_str(cell);
        line.push_str(&" ".repeat(width.saturating_sub(cell.chars().count())));
        line.push_str(" |");
    }
    line
}
