use crate::error::GenerationError;
use crate::number_generator::{BandPolicy, GenerationRequest, GeneratorConfig, SamplingPolicy};
use crate::operations::{Level, OperationType};
use clap::Parser;

/// Largest size the narrowest default band (1-digit Easy, 1..=3) can fill
pub const DEFAULT_SIZE: usize = 3;

/// Matrix arithmetic drills: fill an n×n grid of row/column results
#[derive(Parser, Debug, Clone)]
#[command(name = "Matrix Math Practice")]
#[command(about = "Practice arithmetic on a grid of random numbers", long_about = None)]
#[command(version)]
pub struct Args {
    /// Operation applied to each row/column pair
    #[arg(
        long,
        value_name = "OPERATION",
        value_parser = parse_operation,
        default_value = "addition",
        help = "addition, subtraction, multiplication or division"
    )]
    pub operation: OperationType,

    /// Difficulty level (defaults to the first level offered for the operation)
    #[arg(long, value_name = "LEVEL", value_parser = parse_level, help = "easy, medium or hard")]
    pub level: Option<Level>,

    /// Matrix size n for an n×n grid
    #[arg(
        long,
        default_value_t = DEFAULT_SIZE,
        help = "Matrix size n (2-10); 1-digit Easy labels only hold 3 distinct values"
    )]
    pub size: usize,

    /// Digit count of the row labels
    #[arg(long, value_name = "DIGITS")]
    pub digits_row: Option<u32>,

    /// Digit count of the column labels
    #[arg(long, value_name = "DIGITS")]
    pub digits_col: Option<u32>,

    /// Seed for reproducible grids
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Allow repeated labels within a row or column sequence
    #[arg(long, help = "Draw labels with replacement (duplicates allowed)")]
    pub with_replacement: bool,

    /// Cap Easy/Medium upper bounds at 30/60 instead of splitting the range in thirds
    #[arg(long, help = "Use fixed Easy/Medium ceilings instead of thirds")]
    pub capped_bands: bool,

    /// Disable coloured terminal output
    #[arg(long, help = "Disable colored output")]
    pub no_color: bool,
}

fn parse_operation(s: &str) -> Result<OperationType, String> {
    OperationType::from_str(s).ok_or_else(|| {
        format!(
            "Unknown operation '{}'. Expected addition, subtraction, multiplication or division",
            s
        )
    })
}

fn parse_level(s: &str) -> Result<Level, String> {
    Level::from_str(s)
        .ok_or_else(|| format!("Unknown level '{}'. Expected easy, medium or hard", s))
}

impl Args {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }

    /// Level to use, falling back to the first one offered for the operation
    pub fn effective_level(&self) -> Level {
        self.level
            .unwrap_or_else(|| self.operation.levels()[0])
    }

    /// Builds and validates the generation request described by the arguments
    pub fn generation_request(&self) -> Result<GenerationRequest, GenerationError> {
        let level = self.effective_level();
        let default_digits = self.operation.digit_options(level)[0];

        let request = GenerationRequest {
            size: self.size,
            digits_row: self.digits_row.unwrap_or(default_digits),
            digits_col: self.digits_col.unwrap_or(default_digits),
            operation: self.operation,
            level,
        };
        request.validate()?;
        Ok(request)
    }

    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            sampling: if self.with_replacement {
                SamplingPolicy::WithReplacement
            } else {
                SamplingPolicy::WithoutReplacement
            },
            bands: if self.capped_bands {
                BandPolicy::capped()
            } else {
                BandPolicy::Thirds
            },
            seed: self.seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::PracticeSession;

    fn args() -> Args {
        Args {
            operation: OperationType::Addition,
            level: None,
            size: DEFAULT_SIZE,
            digits_row: None,
            digits_col: None,
            seed: None,
            with_replacement: false,
            capped_bands: false,
            no_color: false,
        }
    }

    #[test]
    fn test_parse_no_args() {
        let args = Args::try_parse_from(["matrix_practice"]).unwrap();
        assert_eq!(args.operation, OperationType::Addition);
        assert_eq!(args.level, None);
        assert_eq!(args.size, 3);
        assert!(args.seed.is_none());
        assert!(!args.with_replacement);
        assert!(!args.no_color);
    }

    #[test]
    fn test_parse_all_args() {
        let args = Args::try_parse_from([
            "matrix_practice",
            "--operation",
            "Multiplication",
            "--level",
            "hard",
            "--size",
            "4",
            "--digits-row",
            "3",
            "--digits-col",
            "2",
            "--seed",
            "42",
            "--with-replacement",
            "--capped-bands",
            "--no-color",
        ])
        .unwrap();

        assert_eq!(args.operation, OperationType::Multiplication);
        assert_eq!(args.level, Some(Level::Hard));
        assert_eq!(args.size, 4);
        assert_eq!(args.digits_row, Some(3));
        assert_eq!(args.digits_col, Some(2));
        assert_eq!(args.seed, Some(42));
        assert!(args.with_replacement);
        assert!(args.capped_bands);
        assert!(args.no_color);
    }

    #[test]
    fn test_parse_unknown_operation() {
        let result = Args::try_parse_from(["matrix_practice", "--operation", "modulo"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_effective_level_defaults_per_operation() {
        let mut args = args();
        assert_eq!(args.effective_level(), Level::Easy);

        args.operation = OperationType::Multiplication;
        assert_eq!(args.effective_level(), Level::Medium);

        args.operation = OperationType::Division;
        assert_eq!(args.effective_level(), Level::Hard);
    }

    #[test]
    fn test_generation_request_defaults() {
        let mut args = args();
        args.operation = OperationType::Subtraction;
        args.level = Some(Level::Hard);

        let request = args.generation_request().unwrap();
        assert_eq!(request.level, Level::Hard);
        assert_eq!(request.digits_row, 3);
        assert_eq!(request.digits_col, 3);
        assert_eq!(request.size, 3);
    }

    #[test]
    fn test_default_arguments_generate_a_matrix() {
        let args = Args::try_parse_from(["matrix_practice"]).unwrap();
        let request = args.generation_request().unwrap();
        assert_eq!(request.level, Level::Easy);
        assert_eq!(request.digits_row, 1);

        let mut session = PracticeSession::new(args.generator_config());
        let result = session.generate(&request).unwrap();
        assert_eq!(result.size(), DEFAULT_SIZE);
    }

    #[test]
    fn test_generation_request_rejects_unsupported_level() {
        let mut args = args();
        args.operation = OperationType::Division;
        args.level = Some(Level::Easy);

        let result = args.generation_request();
        assert!(matches!(
            result,
            Err(GenerationError::UnsupportedLevel { .. })
        ));
    }

    #[test]
    fn test_generation_request_rejects_unsupported_digits() {
        let mut args = args();
        args.digits_row = Some(4);

        assert!(matches!(
            args.generation_request(),
            Err(GenerationError::UnsupportedDigits { digits: 4, .. })
        ));
    }

    #[test]
    fn test_generator_config() {
        let mut args = args();
        assert_eq!(args.generator_config(), GeneratorConfig::default());

        args.with_replacement = true;
        args.capped_bands = true;
        args.seed = Some(7);
        let config = args.generator_config();
        assert_eq!(config.sampling, SamplingPolicy::WithReplacement);
        assert_eq!(config.bands, BandPolicy::capped());
        assert_eq!(config.seed, Some(7));
    }
}
