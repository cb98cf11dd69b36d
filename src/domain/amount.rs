use std::fmt;

/// Amounts are plain `f64` values in the ledger's currency unit (usually yen),
/// matching the numbers stored in the JSON document.
pub type Amount = f64;

/// Format an amount as whole units with `,` thousands separators.
/// Example: 298000.0 -> "298,000", -1200.0 -> "-1,200"
pub fn format_amount(amount: Amount) -> String {
    let rounded = amount.round();
    // -0.0 must not print as "-0"
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}{}", sign, grouped)
}

/// Parse user-entered amount text.
/// Example: "1200" -> 1200.0, "1,200.5" -> 1200.5
pub fn parse_amount(input: &str) -> Result<Amount, ParseAmountError> {
    let cleaned: String = input.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return Err(ParseAmountError::Empty);
    }

    let value: Amount = cleaned
        .parse()
        .map_err(|_| ParseAmountError::InvalidFormat)?;
    if !value.is_finite() {
        return Err(ParseAmountError::NotFinite);
    }
    Ok(value)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    Empty,
    InvalidFormat,
    NotFinite,
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::Empty => write!(f, "amount is empty"),
            ParseAmountError::InvalidFormat => write!(f, "invalid amount format"),
            ParseAmountError::NotFinite => write!(f, "amount must be a finite number"),
        }
    }
}

impl std::error::Error for ParseAmountError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(298000.0), "298,000");
        assert_eq!(format_amount(-1200.0), "-1,200");
        assert_eq!(format_amount(1234567.0), "1,234,567");
        assert_eq!(format_amount(999.0), "999");
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(-0.4), "0");
        assert_eq!(format_amount(1499.5), "1,500");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1200"), Ok(1200.0));
        assert_eq!(parse_amount(" 1,200 "), Ok(1200.0));
        assert_eq!(parse_amount("12.5"), Ok(12.5));
        assert_eq!(parse_amount("300,000"), Ok(300000.0));
        assert_eq!(parse_amount("-50"), Ok(-50.0));
    }

    #[test]
    fn test_parse_amount_invalid() {
        assert_eq!(parse_amount(""), Err(ParseAmountError::Empty));
        assert_eq!(parse_amount("  "), Err(ParseAmountError::Empty));
        assert_eq!(parse_amount("abc"), Err(ParseAmountError::InvalidFormat));
        assert_eq!(parse_amount("12.3.4"), Err(ParseAmountError::InvalidFormat));
        assert_eq!(parse_amount("inf"), Err(ParseAmountError::NotFinite));
        assert_eq!(parse_amount("NaN"), Err(ParseAmountError::NotFinite));
    }
}
