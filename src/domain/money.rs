use super::LedgerError;

/// Money is held as integer cents so the balance arithmetic stays exact.
/// `30.00` is stored as `3000`.
pub type Cents = i64;

/// Render cents as a decimal amount with two places.
/// Example: 3000 -> "30.00", -1234 -> "-12.34"
pub fn format_cents(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let magnitude = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, magnitude / 100, magnitude % 100)
}

/// Parse a decimal amount such as "30", "30.5", "30.50" or ".50" into cents.
/// More than two decimal places is rejected instead of being truncated.
pub fn parse_cents(input: &str) -> Result<Cents, LedgerError> {
    let trimmed = input.trim();
    let invalid = || {
        LedgerError::validation(format!(
            "Invalid amount '{}': expected a number like 12.50",
            trimmed
        ))
    };

    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let (units, fraction) = body.split_once('.').unwrap_or((body, ""));

    let is_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if (units.is_empty() && fraction.is_empty()) || !is_digits(units) || !is_digits(fraction) {
        return Err(invalid());
    }
    if fraction.len() > 2 {
        return Err(LedgerError::validation(format!(
            "Invalid amount '{}': at most two decimal places are allowed",
            trimmed
        )));
    }

    let units: i64 = if units.is_empty() {
        0
    } else {
        units.parse().map_err(|_| invalid())?
    };
    let fraction_cents: i64 = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
        _ => fraction.parse().map_err(|_| invalid())?,
    };

    let cents = units
        .checked_mul(100)
        .and_then(|c| c.checked_add(fraction_cents))
        .ok_or_else(|| LedgerError::validation(format!("Amount '{}' is too large", trimmed)))?;
    Ok(if negative { -cents } else { cents })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(3000), "30.00");
        assert_eq!(format_cents(1234), "12.34");
        assert_eq!(format_cents(5), "0.05");
        assert_eq!(format_cents(0), "0.00");
        assert_eq!(format_cents(-1234), "-12.34");
        assert_eq!(format_cents(i64::MIN), "-92233720368547758.08");
    }

    #[test]
    fn test_parse_cents() {
        assert_eq!(parse_cents("30"), Ok(3000));
        assert_eq!(parse_cents("30.5"), Ok(3050));
        assert_eq!(parse_cents("30.50"), Ok(3050));
        assert_eq!(parse_cents(".50"), Ok(50));
        assert_eq!(parse_cents("12."), Ok(1200));
        assert_eq!(parse_cents(" 100.00 "), Ok(10000));
        assert_eq!(parse_cents("+7"), Ok(700));
        assert_eq!(parse_cents("-5.25"), Ok(-525));
    }

    #[test]
    fn test_parse_cents_rejects_garbage() {
        for input in ["", ".", "abc", "1.2.3", "1,50", "--4", "1e3"] {
            assert!(
                matches!(parse_cents(input), Err(LedgerError::Validation(_))),
                "expected '{}' to be rejected",
                input
            );
        }
    }

    #[test]
    fn test_parse_cents_rejects_extra_precision() {
        let err = parse_cents("10.999").unwrap_err();
        assert!(err.to_string().contains("two decimal places"));
    }

    #[test]
    fn test_parse_cents_rejects_overflow() {
        assert!(parse_cents("99999999999999999999").is_err());
        assert!(parse_cents("92233720368547758.08").is_err());
    }
}
