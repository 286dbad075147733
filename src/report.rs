use crate::grader::{CellResult, FailureReason, ScoreReport};
use crate::operations::OperationType;
use crate::time_format::format_elapsed;
use colored::Colorize;

/// Short annotation for a graded cell, e.g. "✗ (Correct: 21)"
pub fn cell_verdict(cell: &CellResult) -> String {
    match cell.failure_reason {
        FailureReason::None => "✓".to_string(),
        FailureReason::NotNumeric => "✗ (Invalid Input)".to_string(),
        FailureReason::Unanswerable => "✗ (Undefined)".to_string(),
        FailureReason::Empty | FailureReason::WrongValue => {
            format!("✗ (Correct: {})", cell.expected)
        }
    }
}

/// One result line: "12 + 9 = 20 ✗ (Correct: 21)"; blanks show as "?"
pub fn render_cell(cell: &CellResult, operation: OperationType, use_color: bool) -> String {
    let answer = cell.user_raw_text.trim();
    let line = format!(
        "{} {} {} = {} {}",
        cell.row_value,
        operation.symbol(),
        cell.col_value,
        if answer.is_empty() { "?" } else { answer },
        cell_verdict(cell)
    );

    if !use_color {
        line
    } else if cell.is_correct {
        line.green().to_string()
    } else {
        line.red().to_string()
    }
}

pub fn render_score(report: &ScoreReport) -> String {
    format!("Score: {}", report.score_text())
}

pub fn render_time(report: &ScoreReport) -> String {
    format!("Time Taken: {}", format_elapsed(report.elapsed_seconds))
}

/// Plain-text grid of labels with an empty body, column labels on top
pub fn render_matrix(row_values: &[i64], col_values: &[i64], operation: OperationType) -> String {
    let width = row_values
        .iter()
        .chain(col_values)
        .map(|value| value.to_string().len())
        .max()
        .unwrap_or(1);

    let mut header = format!("{:>width$} |", operation.symbol(), width = width);
    for col_value in col_values {
        header.push_str(&format!(" {:>width$}", col_value, width = width));
    }

    let separator = "-".repeat(header.chars().count());
    let mut lines = vec![header, separator];
    for row_value in row_values {
        lines.push(format!("{:>width$} |", row_value, width = width));
    }

    lines.join("\n")
}

/// Full results block: header, one line per cell, score and time
pub fn render_report(report: &ScoreReport, use_color: bool) -> String {
    let mut lines = Vec::with_capacity(report.cell_results.len() + 3);

    let header = format!("Results ({})", report.operation.name());
    lines.push(if use_color {
        header.bold().to_string()
    } else {
        header
    });

    for cell in &report.cell_results {
        lines.push(render_cell(cell, report.operation, use_color));
    }

    let score = render_score(report);
    lines.push(if use_color {
        score.cyan().bold().to_string()
    } else {
        score
    });
    lines.push(render_time(report));

    lines.join("\n")
}
