use crate::clock::{Clock, SystemClock, seconds_between};
use crate::error::{GenerationError, SessionError};
use crate::grader::{AnswerSheet, ScoreReport, grade};
use crate::number_generator::{GenerationRequest, GeneratorConfig, NumberGenerator};
use chrono::{DateTime, Utc};
use log::{info, warn};

/// Row and column labels of the matrix currently being answered
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationResult {
    pub request: GenerationRequest,
    pub row_values: Vec<i64>,
    pub col_values: Vec<i64>,
    pub generated_at: DateTime<Utc>,
}

impl GenerationResult {
    pub fn size(&self) -> usize {
        self.row_values.len()
    }
}

/// One user's practice state: at most one ungraded matrix at a time
pub struct PracticeSession {
    generator: NumberGenerator,
    clock: Box<dyn Clock>,
    current: Option<GenerationResult>,
}

impl PracticeSession {
    pub fn new(config: GeneratorConfig) -> Self {
        Self::with_clock(config, Box::new(SystemClock))
    }

    pub fn with_clock(config: GeneratorConfig, clock: Box<dyn Clock>) -> Self {
        Self {
            generator: NumberGenerator::new(config),
            clock,
            current: None,
        }
    }

    /// Draws a new matrix, discarding any ungraded one.
    ///
    /// On failure the previous matrix, if any, is left untouched.
    pub fn generate(
        &mut self,
        request: &GenerationRequest,
    ) -> Result<&GenerationResult, GenerationError> {
        if let Err(e) = request.validate() {
            warn!("Rejected generation request {:?}: {}", request, e);
            return Err(e);
        }

        let col_values = self
            .generator
            .generate(request.size, request.digits_col, request.level)?;
        let row_values = self
            .generator
            .generate(request.size, request.digits_row, request.level)?;
        let generated_at = self.clock.now();

        info!(
            "Generated {}x{} {} matrix ({}): rows {:?}, columns {:?}",
            request.size,
            request.size,
            request.operation.name(),
            request.level.name(),
            row_values,
            col_values
        );

        Ok(&*self.current.insert(GenerationResult {
            request: request.clone(),
            row_values,
            col_values,
            generated_at,
        }))
    }

    pub fn current(&self) -> Option<&GenerationResult> {
        self.current.as_ref()
    }

    pub fn has_active_grid(&self) -> bool {
        self.current.is_some()
    }

    /// Seconds since the current matrix was generated, for live timers
    pub fn elapsed_seconds(&self) -> Option<f64> {
        self.current
            .as_ref()
            .map(|current| seconds_between(current.generated_at, self.clock.now()))
    }

    /// Grades the current matrix and clears it
    pub fn submit(&mut self, answers: &AnswerSheet) -> Result<ScoreReport, SessionError> {
        let current = self.current.take().ok_or(SessionError::NoActiveGrid)?;
        let elapsed = seconds_between(current.generated_at, self.clock.now());

        Ok(grade(
            &current.row_values,
            &current.col_values,
            current.request.operation,
            answers,
            elapsed,
        ))
    }

    /// Drops the current matrix without grading it
    pub fn reset(&mut self) {
        self.current = None;
    }
}
