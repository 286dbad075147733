/// A successfully parsed answer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParsedValue {
    Integer(i64),
    Decimal(f64),
}

/// Result of parsing one raw answer field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParseOutcome {
    Parsed(ParsedValue),
    /// Nothing but whitespace
    Empty,
    /// Text that is not a number in the expected domain
    Invalid,
}

/// Parses a plain run of decimal digits: no sign, no point, no separators
pub fn parse_integer(text: &str) -> ParseOutcome {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return ParseOutcome::Empty;
    }

    if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return ParseOutcome::Invalid;
    }

    match trimmed.parse::<i64>() {
        Ok(value) => ParseOutcome::Parsed(ParsedValue::Integer(value)),
        Err(_) => ParseOutcome::Invalid,
    }
}

/// Parses digits with at most one decimal point ("3", "3.5", ".5", "3.")
pub fn parse_decimal(text: &str) -> ParseOutcome {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return ParseOutcome::Empty;
    }

    let without_point = trimmed.replacen('.', "", 1);
    if without_point.is_empty() || !without_point.bytes().all(|b| b.is_ascii_digit()) {
        return ParseOutcome::Invalid;
    }

    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => ParseOutcome::Parsed(ParsedValue::Decimal(value)),
        _ => ParseOutcome::Invalid,
    }
}
