use rust_decimal::Decimal;
use tax_core::calculations::common::round_to_rupee;
use thiserror::Error;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid decimal '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Normalizes input for decimal parsing: trims whitespace, drops a leading
/// rupee sign and removes commas (thousands and lakh separators).
fn normalize_decimal_input(s: &str) -> String {
    s.trim().trim_start_matches('₹').trim().replace(',', "")
}

/// Parses a string into a [`Decimal`].
///
/// Handles Indian and western digit grouping (e.g. `"12,00,000"` or
/// `"1,200,000"`). Empty or whitespace-only input is treated as 0.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| ParseDecimalError {
        input: s.to_string(),
        source: e,
    })
}

/// Parses an income amount, coercing anything unusable to zero.
///
/// Invalid numeric entries and negative amounts both become 0 with a warning,
/// so the result is always safe to hand to the tax engine.
pub fn parse_amount(s: &str) -> Decimal {
    let value = parse_decimal(s).unwrap_or_else(|e| {
        tracing::warn!(input = %s, "invalid numeric entry treated as zero: {}", e);
        Decimal::ZERO
    });

    if value < Decimal::ZERO {
        tracing::warn!(input = %s, "negative amount treated as zero");
        return Decimal::ZERO;
    }
    value
}

/// Inserts Indian digit grouping: the last three digits, then pairs.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

/// Formats an amount as whole rupees in en-IN style, e.g. `₹12,00,000`.
pub fn format_inr(amount: Decimal) -> String {
    let rounded = round_to_rupee(amount);
    let digits = rounded.abs().trunc().to_string();
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };

    format!("{sign}₹{}", group_indian(&digits))
}

/// Formats a fractional rate as a whole percentage, `NIL` for zero.
pub fn format_rate(rate: Decimal) -> String {
    if rate.is_zero() {
        return "NIL".to_string();
    }
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}
