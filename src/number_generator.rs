use crate::error::GenerationError;
use crate::operations::{Level, OperationType};
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};

pub const MIN_SIZE: usize = 2;
pub const MAX_SIZE: usize = 10;
pub const MAX_DIGITS: u32 = 9;

/// Parameters chosen by the user before a matrix is generated
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub size: usize,
    pub digits_row: u32,
    pub digits_col: u32,
    pub operation: OperationType,
    pub level: Level,
}

impl GenerationRequest {
    /// Checks the request against the options offered for its operation
    pub fn validate(&self) -> Result<(), GenerationError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&self.size) {
            return Err(GenerationError::InvalidSize {
                size: self.size,
                min: MIN_SIZE,
                max: MAX_SIZE,
            });
        }

        if !self.operation.offers_level(self.level) {
            return Err(GenerationError::UnsupportedLevel {
                operation: self.operation,
                level: self.level,
            });
        }

        let offered = self.operation.digit_options(self.level);
        for digits in [self.digits_row, self.digits_col] {
            if !offered.contains(&digits) {
                return Err(GenerationError::UnsupportedDigits {
                    operation: self.operation,
                    level: self.level,
                    digits,
                });
            }
        }

        Ok(())
    }
}

/// How a difficulty level narrows the digit-determined range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandPolicy {
    /// Three equal-width bands; Hard absorbs the remainder
    Thirds,
    /// Easy and Medium cap the upper bound at fixed ceilings; Hard uses the full range
    Capped { easy_ceiling: i64, medium_ceiling: i64 },
}

impl BandPolicy {
    pub fn capped() -> Self {
        BandPolicy::Capped {
            easy_ceiling: 30,
            medium_ceiling: 60,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SamplingPolicy {
    /// Values within one sequence are pairwise distinct
    #[default]
    WithoutReplacement,
    /// Independent draws; duplicates allowed
    WithReplacement,
}

/// Inclusive interval a difficulty level draws values from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberRange {
    pub min: i64,
    pub max: i64,
}

impl NumberRange {
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// Computes the band for `digits`-digit numbers at `level`
    pub fn for_digits(
        digits: u32,
        level: Level,
        bands: BandPolicy,
    ) -> Result<Self, GenerationError> {
        if digits == 0 || digits > MAX_DIGITS {
            return Err(GenerationError::InvalidDigits {
                digits,
                max: MAX_DIGITS,
            });
        }

        let full_min = 10_i64.pow(digits - 1);
        let full_max = 10_i64.pow(digits) - 1;

        let range = match bands {
            BandPolicy::Thirds => {
                let chunk = (full_max - full_min + 1) / 3;
                match level {
                    Level::Easy => NumberRange::new(full_min, full_min + chunk - 1),
                    Level::Medium => NumberRange::new(full_min + chunk, full_min + 2 * chunk - 1),
                    Level::Hard => NumberRange::new(full_min + 2 * chunk, full_max),
                }
            }
            BandPolicy::Capped {
                easy_ceiling,
                medium_ceiling,
            } => match level {
                Level::Easy => NumberRange::new(full_min, full_max.min(easy_ceiling)),
                Level::Medium => NumberRange::new(full_min, full_max.min(medium_ceiling)),
                Level::Hard => NumberRange::new(full_min, full_max),
            },
        };

        Ok(range)
    }

    /// Number of distinct integers in the band (0 when empty)
    pub fn len(&self) -> u64 {
        if self.max < self.min {
            0
        } else {
            (self.max - self.min) as u64 + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Fails with `RangeExhausted` unless the band holds at least `count` values
    pub fn ensure_capacity(&self, count: usize) -> Result<(), GenerationError> {
        if self.len() < count as u64 {
            return Err(GenerationError::RangeExhausted {
                min: self.min,
                max: self.max,
                requested: count,
            });
        }
        Ok(())
    }
}

/// Configuration for number generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub sampling: SamplingPolicy,
    pub bands: BandPolicy,
    /// Random seed for reproducible grids (None for entropy)
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            sampling: SamplingPolicy::WithoutReplacement,
            bands: BandPolicy::Thirds,
            seed: None,
        }
    }
}

/// Draws row and column labels for a practice matrix
pub struct NumberGenerator {
    config: GeneratorConfig,
    rng: StdRng,
}

impl NumberGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, rng }
    }

    /// Draws `count` values with `digits` digits from the band for `level`
    pub fn generate(
        &mut self,
        count: usize,
        digits: u32,
        level: Level,
    ) -> Result<Vec<i64>, GenerationError> {
        let range = NumberRange::for_digits(digits, level, self.config.bands)?;

        if let Err(e) = range.ensure_capacity(count) {
            warn!("{}", e);
            return Err(e);
        }

        let values: Vec<i64> = match self.config.sampling {
            SamplingPolicy::WithoutReplacement => {
                index::sample(&mut self.rng, range.len() as usize, count)
                    .into_iter()
                    .map(|offset| range.min + offset as i64)
                    .collect()
            }
            SamplingPolicy::WithReplacement => (0..count)
                .map(|_| self.rng.gen_range(range.min..=range.max))
                .collect(),
        };

        debug!(
            "Drew {} value(s) from {}-{} ({:?}): {:?}",
            count, range.min, range.max, self.config.sampling, values
        );

        Ok(values)
    }
}
