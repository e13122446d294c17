use std::collections::HashSet;
use std::sync::LazyLock;

/// Phrases that stand in for a quantity without measuring anything
static AMBIGUOUS_QUANTITIES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HashSet::from([
        "pinch",
        "a pinch",
        "dash",
        "a dash",
        "to taste",
        "taste",
        "handful",
        "a handful",
        "some",
        "sprinkle",
        "a sprinkle",
        "as needed",
    ])
});

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QuantityError {
    #[error("quantity is empty")]
    Empty,

    #[error("quantity is not measurable: {0}")]
    Ambiguous(String),

    #[error("invalid number format: {0}")]
    InvalidNumber(String),

    #[error("invalid fraction format: {0}")]
    InvalidFraction(String),

    #[error("denominator cannot be zero")]
    ZeroDenominator,

    #[error("negative quantities are not allowed")]
    Negative,

    #[error("quantity is not finite")]
    NotFinite,
}

/// Check if a quantity string names an unmeasured amount ("a pinch", "to taste")
pub fn is_ambiguous_quantity(quantity_str: &str) -> bool {
    let normalized = quantity_str.trim().to_lowercase();

    if AMBIGUOUS_QUANTITIES.contains(normalized.as_str()) {
        return true;
    }

    if AMBIGUOUS_QUANTITIES
        .iter()
        .any(|keyword| normalized.starts_with(keyword) || normalized.ends_with(keyword))
    {
        return true;
    }

    !normalized
        .chars()
        .any(|c| c.is_ascii_digit() || c == '/' || c == '.')
}

/// Parse a free-text quantity into a non-negative finite number
///
/// Supports formats:
/// - Whole numbers: "2"
/// - Decimals: "0.5"
/// - Pure fractions: "1/2"
/// - Mixed fractions: "1 1/2"
pub fn parse_quantity(quantity_str: &str) -> Result<f64, QuantityError> {
    let trimmed = quantity_str.trim();

    if trimmed.is_empty() {
        return Err(QuantityError::Empty);
    }

    if is_ambiguous_quantity(trimmed) {
        return Err(QuantityError::Ambiguous(trimmed.to_string()));
    }

    // Mixed fraction: "1 1/2"
    if trimmed.contains(' ') && trimmed.contains('/') {
        let parts: Vec<&str> = trimmed.split_whitespace().collect();
        let [whole, fraction] = parts.as_slice() else {
            return Err(QuantityError::InvalidFraction(trimmed.to_string()));
        };

        let whole = parse_component(whole)?;
        let fraction = parse_fraction(fraction)?;
        return check_measure(whole + fraction);
    }

    if trimmed.contains('/') {
        return check_measure(parse_fraction(trimmed)?);
    }

    let value: f64 = trimmed
        .parse()
        .map_err(|_| QuantityError::InvalidNumber(trimmed.to_string()))?;

    check_measure(value)
}

/// Accept a decoded JSON number as a quantity
pub fn check_measure(value: f64) -> Result<f64, QuantityError> {
    if !value.is_finite() {
        return Err(QuantityError::NotFinite);
    }

    if value < 0.0 {
        return Err(QuantityError::Negative);
    }

    Ok(value)
}

fn parse_fraction(text: &str) -> Result<f64, QuantityError> {
    let Some((numerator, denominator)) = text.split_once('/') else {
        return Err(QuantityError::InvalidFraction(text.to_string()));
    };

    let numerator = parse_component(numerator)?;
    let denominator = parse_component(denominator)?;

    if denominator == 0.0 {
        return Err(QuantityError::ZeroDenominator);
    }

    Ok(numerator / denominator)
}

fn parse_component(text: &str) -> Result<f64, QuantityError> {
    let value: f64 = text
        .trim()
        .parse()
        .map_err(|_| QuantityError::InvalidFraction(text.to_string()))?;

    check_measure(value)
}
