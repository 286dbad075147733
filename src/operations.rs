use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationType {
    Addition,
    Subtraction,
    Multiplication,
    Division,
}

impl OperationType {
    pub const ALL: [OperationType; 4] = [
        OperationType::Addition,
        OperationType::Subtraction,
        OperationType::Multiplication,
        OperationType::Division,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            OperationType::Addition => "ADD",
            OperationType::Subtraction => "SUBTRACT",
            OperationType::Multiplication => "MULTIPLY",
            OperationType::Division => "DIVIDE",
        }
    }

    pub fn name(&self) -> &str {
        match self {
            OperationType::Addition => "Addition",
            OperationType::Subtraction => "Subtraction",
            OperationType::Multiplication => "Multiplication",
            OperationType::Division => "Division",
        }
    }

    pub fn symbol(&self) -> &str {
        match self {
            OperationType::Addition => "+",
            OperationType::Subtraction => "-",
            OperationType::Multiplication => "×",
            OperationType::Division => "÷",
        }
    }

    /// Accepts either the stored code ("ADD") or the display name ("addition")
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim();
        OperationType::ALL
            .into_iter()
            .find(|op| op.as_str().eq_ignore_ascii_case(s) || op.name().eq_ignore_ascii_case(s))
    }

    /// Difficulty levels offered for this operation
    pub fn levels(&self) -> &'static [Level] {
        match self {
            OperationType::Addition | OperationType::Subtraction => {
                &[Level::Easy, Level::Medium, Level::Hard]
            }
            OperationType::Multiplication => &[Level::Medium, Level::Hard],
            OperationType::Division => &[Level::Hard],
        }
    }

    /// Digit counts offered for this operation at the given level
    pub fn digit_options(&self, level: Level) -> &'static [u32] {
        match (self, level) {
            (OperationType::Addition | OperationType::Subtraction, Level::Easy) => &[1, 2],
            (OperationType::Addition | OperationType::Subtraction, Level::Medium) => &[2, 3],
            (OperationType::Addition | OperationType::Subtraction, Level::Hard) => &[3, 4],
            (OperationType::Multiplication, Level::Medium) => &[1, 2],
            (OperationType::Multiplication, _) => &[2, 3, 4],
            (OperationType::Division, _) => &[1, 2],
        }
    }

    pub fn offers_level(&self, level: Level) -> bool {
        self.levels().contains(&level)
    }

    /// Integer answers for +, -, ×; two-decimal answers for ÷
    pub fn expects_decimal(&self) -> bool {
        matches!(self, OperationType::Division)
    }

    /// Computes the expected cell value for `row op col`
    pub fn apply(&self, row: i64, col: i64) -> ExpectedValue {
        let integer = match self {
            OperationType::Addition => row.checked_add(col),
            OperationType::Subtraction => row.checked_sub(col),
            OperationType::Multiplication => row.checked_mul(col),
            OperationType::Division if col == 0 => return ExpectedValue::Undefined,
            OperationType::Division => {
                return ExpectedValue::Decimal(round_to_hundredths(row as f64 / col as f64));
            }
        };

        integer.map_or(ExpectedValue::Undefined, ExpectedValue::Integer)
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Easy,
    Medium,
    Hard,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Easy, Level::Medium, Level::Hard];

    pub fn name(&self) -> &str {
        match self {
            Level::Easy => "Easy",
            Level::Medium => "Medium",
            Level::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim();
        Level::ALL
            .into_iter()
            .find(|level| level.name().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Expected answer of a single cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExpectedValue {
    Integer(i64),
    Decimal(f64),
    /// Division by zero or arithmetic overflow; no answer can match
    Undefined,
}

impl ExpectedValue {
    pub fn is_defined(&self) -> bool {
        !matches!(self, ExpectedValue::Undefined)
    }
}

impl fmt::Display for ExpectedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpectedValue::Integer(value) => write!(f, "{}", value),
            ExpectedValue::Decimal(value) => write!(f, "{}", value),
            ExpectedValue::Undefined => f.write_str("undefined"),
        }
    }
}

/// Rounds the exact binary value to two decimal places, ties to even.
///
/// Scaling by 100 in floating point can turn 0.97499... (78 / 80) into an
/// exact tie, so the scaled value is computed on the integer mantissa.
fn round_to_hundredths(value: f64) -> f64 {
    if !value.is_finite() || value == 0.0 {
        return value;
    }

    let bits = value.abs().to_bits();
    let biased_exponent = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1u64 << 52) - 1);
    let (mantissa, exponent) = if biased_exponent == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), biased_exponent - 1075)
    };

    // |value| = mantissa * 2^exponent; at or above 2^52 it is already whole
    if exponent >= 0 {
        return value;
    }

    let scaled = u128::from(mantissa) * 100;
    let shift = exponent.unsigned_abs();
    let hundredths = if shift >= 128 {
        0
    } else {
        let floor = scaled >> shift;
        let remainder = scaled & ((1u128 << shift) - 1);
        let half = 1u128 << (shift - 1);
        if remainder > half || (remainder == half && floor % 2 == 1) {
            floor + 1
        } else {
            floor
        }
    };

    let rounded = hundredths as f64 / 100.0;
    if value.is_sign_negative() { -rounded } else { rounded }
}
