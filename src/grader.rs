use crate::answer_parser::{ParseOutcome, ParsedValue, parse_decimal, parse_integer};
use crate::operations::{ExpectedValue, OperationType};
use log::{debug, info};
use std::collections::HashMap;

/// Maximum distance between a division answer and the rounded quotient
pub const DECIMAL_TOLERANCE: f64 = 0.01;

// 3.51 - 3.5 evaluates to 0.00999..., which must still count as a full hundredth off
const FLOAT_SLACK: f64 = 1e-9;

/// Raw text typed into each cell, keyed by 0-based (row, column)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnswerSheet {
    entries: HashMap<(usize, usize), String>,
}

impl AnswerSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a sheet from a row-major table of inputs
    pub fn from_rows(rows: &[Vec<String>]) -> Self {
        let mut sheet = Self::new();
        for (i, row) in rows.iter().enumerate() {
            for (j, text) in row.iter().enumerate() {
                sheet.set(i, j, text.clone());
            }
        }
        sheet
    }

    pub fn set(&mut self, row: usize, col: usize, text: impl Into<String>) {
        self.entries.insert((row, col), text.into());
    }

    /// Missing cells read as empty
    pub fn get(&self, row: usize, col: usize) -> &str {
        self.entries
            .get(&(row, col))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    None,
    Empty,
    NotNumeric,
    WrongValue,
    /// Division by zero or overflow; no answer is accepted
    Unanswerable,
}

impl FailureReason {
    pub fn as_str(&self) -> &str {
        match self {
            FailureReason::None => "none",
            FailureReason::Empty => "empty",
            FailureReason::NotNumeric => "not_numeric",
            FailureReason::WrongValue => "wrong_value",
            FailureReason::Unanswerable => "unanswerable",
        }
    }
}

/// Outcome of grading a single cell
#[derive(Debug, Clone, PartialEq)]
pub struct CellResult {
    pub row: usize,
    pub col: usize,
    pub row_value: i64,
    pub col_value: i64,
    pub expected: ExpectedValue,
    pub user_raw_text: String,
    pub is_correct: bool,
    pub failure_reason: FailureReason,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreReport {
    pub operation: OperationType,
    /// Row-major, one entry per cell
    pub cell_results: Vec<CellResult>,
    pub correct_count: usize,
    pub total: usize,
    pub elapsed_seconds: f64,
}

impl ScoreReport {
    pub fn incorrect_count(&self) -> usize {
        self.total - self.correct_count
    }

    pub fn accuracy_percentage(&self) -> f64 {
        if self.total > 0 {
            (self.correct_count as f64 / self.total as f64) * 100.0
        } else {
            0.0
        }
    }

    /// "correct / total"
    pub fn score_text(&self) -> String {
        format!("{} / {}", self.correct_count, self.total)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&CellResult> {
        self.cell_results
            .iter()
            .find(|cell| cell.row == row && cell.col == col)
    }
}

/// Grades every cell of the matrix; never stops early
pub fn grade(
    row_values: &[i64],
    col_values: &[i64],
    operation: OperationType,
    answers: &AnswerSheet,
    elapsed_seconds: f64,
) -> ScoreReport {
    let mut cell_results = Vec::with_capacity(row_values.len() * col_values.len());

    for (i, &r) in row_values.iter().enumerate() {
        for (j, &c) in col_values.iter().enumerate() {
            let cell = grade_cell(i, j, r, c, operation, answers.get(i, j));
            debug!(
                "Cell ({}, {}): {} {} {} = {:?} -> {}",
                i,
                j,
                r,
                operation.symbol(),
                c,
                cell.user_raw_text,
                cell.failure_reason.as_str()
            );
            cell_results.push(cell);
        }
    }

    let correct_count = cell_results.iter().filter(|cell| cell.is_correct).count();
    let total = cell_results.len();
    let elapsed_seconds = if elapsed_seconds.is_finite() {
        elapsed_seconds.max(0.0)
    } else {
        0.0
    };

    info!(
        "Graded {} matrix: {}/{} correct in {:.2}s",
        operation.name(),
        correct_count,
        total,
        elapsed_seconds
    );

    ScoreReport {
        operation,
        cell_results,
        correct_count,
        total,
        elapsed_seconds,
    }
}

/// Grades one cell against `row op col`
pub fn grade_cell(
    row: usize,
    col: usize,
    row_value: i64,
    col_value: i64,
    operation: OperationType,
    raw_text: &str,
) -> CellResult {
    let expected = operation.apply(row_value, col_value);

    let failure_reason = if !expected.is_defined() {
        FailureReason::Unanswerable
    } else {
        let parsed = if operation.expects_decimal() {
            parse_decimal(raw_text)
        } else {
            parse_integer(raw_text)
        };

        match parsed {
            ParseOutcome::Empty => FailureReason::Empty,
            ParseOutcome::Invalid => FailureReason::NotNumeric,
            ParseOutcome::Parsed(value) => {
                if matches_expected(value, expected) {
                    FailureReason::None
                } else {
                    FailureReason::WrongValue
                }
            }
        }
    };

    CellResult {
        row,
        col,
        row_value,
        col_value,
        expected,
        user_raw_text: raw_text.to_string(),
        is_correct: failure_reason == FailureReason::None,
        failure_reason,
    }
}

fn matches_expected(value: ParsedValue, expected: ExpectedValue) -> bool {
    match (value, expected) {
        (ParsedValue::Integer(answer), ExpectedValue::Integer(correct)) => answer == correct,
        (ParsedValue::Decimal(answer), ExpectedValue::Decimal(correct)) => {
            (answer - correct).abs() < DECIMAL_TOLERANCE - FLOAT_SLACK
        }
        _ => false,
    }
}
