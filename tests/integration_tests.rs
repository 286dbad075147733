use matrix_practice::clock::ManualClock;
use matrix_practice::error::{GenerationError, SessionError};
use matrix_practice::grader::{AnswerSheet, FailureReason, grade};
use matrix_practice::number_generator::{
    BandPolicy, GenerationRequest, GeneratorConfig, NumberGenerator, NumberRange, SamplingPolicy,
};
use matrix_practice::operations::{ExpectedValue, Level, OperationType};
use matrix_practice::session::PracticeSession;
use chrono::{Duration, TimeZone, Utc};
use std::collections::HashSet;
use std::sync::Arc;

fn seeded_session(seed: u64) -> (PracticeSession, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap(),
    ));
    let config = GeneratorConfig {
        seed: Some(seed),
        ..GeneratorConfig::default()
    };
    (
        PracticeSession::with_clock(config, Box::new(clock.clone())),
        clock,
    )
}

#[test]
fn test_every_offered_option_generates_distinct_values_or_reports_exhaustion() {
    for operation in OperationType::ALL {
        for &level in operation.levels() {
            for &digits in operation.digit_options(level) {
                let range = NumberRange::for_digits(digits, level, BandPolicy::Thirds).unwrap();

                for size in 2..=10 {
                    let mut generator = NumberGenerator::new(GeneratorConfig {
                        seed: Some(size as u64 * 31 + digits as u64),
                        ..GeneratorConfig::default()
                    });

                    match generator.generate(size, digits, level) {
                        Ok(values) => {
                            assert_eq!(values.len(), size);
                            assert!(values.iter().all(|v| range.contains(*v)));
                            let unique: HashSet<_> = values.iter().collect();
                            assert_eq!(unique.len(), size);
                        }
                        Err(GenerationError::RangeExhausted { min, max, requested }) => {
                            assert!(range.len() < size as u64);
                            assert_eq!((min, max, requested), (range.min, range.max, size));
                        }
                        Err(e) => panic!("unexpected error: {}", e),
                    }
                }
            }
        }
    }
}

#[test]
fn test_with_replacement_allows_full_band() {
    let mut generator = NumberGenerator::new(GeneratorConfig {
        sampling: SamplingPolicy::WithReplacement,
        bands: BandPolicy::capped(),
        seed: Some(99),
    });

    let values = generator.generate(10, 2, Level::Easy).unwrap();
    assert_eq!(values.len(), 10);
    assert!(values.iter().all(|v| (10..=30).contains(v)));
}

#[test]
fn test_addition_scenario_from_grid() {
    let mut answers = AnswerSheet::new();
    answers.set(0, 0, "15");
    answers.set(0, 1, "21");
    answers.set(0, 2, "33");

    let report = grade(
        &[12, 45, 7],
        &[3, 9, 21],
        OperationType::Addition,
        &answers,
        12.5,
    );

    assert_eq!(report.correct_count, 3);
    assert_eq!(report.total, 9);
    assert_eq!(report.elapsed_seconds, 12.5);
    assert!(
        report
            .cell_results
            .iter()
            .filter(|cell| cell.row > 0)
            .all(|cell| cell.failure_reason == FailureReason::Empty)
    );
}

#[test]
fn test_division_examples() {
    let cases = [
        ("3.50", true, FailureReason::None),
        ("3.5", true, FailureReason::None),
        ("3.51", false, FailureReason::WrongValue),
        ("3.5.1", false, FailureReason::NotNumeric),
        ("", false, FailureReason::Empty),
    ];

    for (input, correct, reason) in cases {
        let mut answers = AnswerSheet::new();
        answers.set(0, 0, input);
        let report = grade(&[7], &[2], OperationType::Division, &answers, 0.0);
        let cell = &report.cell_results[0];

        assert_eq!(cell.expected, ExpectedValue::Decimal(3.5));
        assert_eq!(cell.is_correct, correct, "input {:?}", input);
        assert_eq!(cell.failure_reason, reason, "input {:?}", input);
    }
}

#[test]
fn test_full_session_round_trip() {
    let (mut session, clock) = seeded_session(2024);
    let request = GenerationRequest {
        size: 4,
        digits_row: 2,
        digits_col: 2,
        operation: OperationType::Multiplication,
        level: Level::Hard,
    };

    let grid = session.generate(&request).unwrap().clone();
    assert!(grid.row_values.iter().all(|v| (70..=99).contains(v)));

    let mut answers = AnswerSheet::new();
    for (i, r) in grid.row_values.iter().enumerate() {
        for (j, c) in grid.col_values.iter().enumerate() {
            // Get the diagonal wrong on purpose
            let answer = if i == j { r * c + 1 } else { r * c };
            answers.set(i, j, answer.to_string());
        }
    }

    clock.advance(Duration::seconds(42));
    let report = session.submit(&answers).unwrap();

    assert_eq!(report.correct_count, 12);
    assert_eq!(report.total, 16);
    assert_eq!(report.elapsed_seconds, 42.0);
    assert_eq!(
        session.submit(&answers).unwrap_err(),
        SessionError::NoActiveGrid
    );
}

#[test]
fn test_seeded_sessions_produce_the_same_grid() {
    let request = GenerationRequest {
        size: 5,
        digits_row: 3,
        digits_col: 2,
        operation: OperationType::Subtraction,
        level: Level::Medium,
    };

    let (mut a, _) = seeded_session(7);
    let (mut b, _) = seeded_session(7);
    let grid_a = a.generate(&request).unwrap().clone();
    let grid_b = b.generate(&request).unwrap().clone();

    assert_eq!(grid_a.row_values, grid_b.row_values);
    assert_eq!(grid_a.col_values, grid_b.col_values);
}

#[test]
fn test_regenerating_discards_ungraded_sheet() {
    let (mut session, clock) = seeded_session(3);
    let request = GenerationRequest {
        size: 2,
        digits_row: 1,
        digits_col: 1,
        operation: OperationType::Addition,
        level: Level::Easy,
    };

    session.generate(&request).unwrap();
    clock.advance(Duration::seconds(100));
    session.generate(&request).unwrap();
    clock.advance(Duration::seconds(5));

    let report = session.submit(&AnswerSheet::new()).unwrap();
    assert_eq!(report.elapsed_seconds, 5.0);
}
