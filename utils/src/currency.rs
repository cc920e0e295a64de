//! Turkish-locale currency formatting.
//!
//! Grouping uses `.` for thousands and `,` for the decimal separator
//! (`1234.5` renders as `"1.234,50"`). Unparsable input falls back to the
//! literal `"0,00"` rather than an error; display code never fails.

use cep_types::Amount;

/// Fallback rendering for input that does not parse to a finite number.
const ZERO_FALLBACK: &str = "0,00";

/// Format a float with 2 fraction digits, grouped Turkish style.
///
/// Non-finite input returns `"0,00"`.
pub fn format_currency(value: f64) -> String {
    match Amount::from_f64(value) {
        Some(amount) => format_amount(amount),
        None => ZERO_FALLBACK.to_string(),
    }
}

/// Parse a numeric string, then format it. Unparsable input returns `"0,00"`.
pub fn format_currency_str(input: &str) -> String {
    match input.trim().parse::<f64>() {
        Ok(value) => format_currency(value),
        Err(_) => ZERO_FALLBACK.to_string(),
    }
}

/// Format an exact amount without a float round trip.
pub fn format_amount(amount: Amount) -> String {
    let minor = amount.minor();
    let abs = minor.unsigned_abs();
    let sign = if minor < 0 { "-" } else { "" };
    format!("{}{},{:02}", sign, group_thousands(abs / 100), abs % 100)
}

/// Abbreviate large magnitudes: `1_500_000` → `"1,5M"`, `2_500` → `"2,5K"`.
///
/// Below 1000 this delegates to [`format_currency`]. Non-finite input
/// returns `"0,00"`.
pub fn format_compact_currency(value: f64) -> String {
    if !value.is_finite() {
        return ZERO_FALLBACK.to_string();
    }
    let abs = value.abs();
    if abs >= 1_000_000.0 {
        compact(value / 1_000_000.0, "M")
    } else if abs >= 1_000.0 {
        compact(value / 1_000.0, "K")
    } else {
        format_currency(value)
    }
}

/// One fraction digit, comma decimal, unit suffix.
fn compact(scaled: f64, suffix: &str) -> String {
    format!("{:.1}{}", scaled, suffix).replace('.', ",")
}

/// Insert a `.` every 3 digits from the right.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_grouping_and_comma() {
        assert_eq!(format_currency(1234.5), "1.234,50");
        assert_eq!(format_currency(1000.0), "1.000,00");
        assert_eq!(format_currency(999.99), "999,99");
        assert_eq!(format_currency(0.0), "0,00");
        assert_eq!(format_currency(1_234_567.89), "1.234.567,89");
    }

    #[test]
    fn formats_negative_values() {
        assert_eq!(format_currency(-1234.5), "-1.234,50");
        assert_eq!(format_currency(-0.5), "-0,50");
    }

    #[test]
    fn non_finite_falls_back_to_zero() {
        assert_eq!(format_currency(f64::NAN), "0,00");
        assert_eq!(format_currency(f64::INFINITY), "0,00");
    }

    #[test]
    fn string_input_parses_or_falls_back() {
        assert_eq!(format_currency_str("1234.5"), "1.234,50");
        assert_eq!(format_currency_str("abc"), "0,00");
        assert_eq!(format_currency_str(""), "0,00");
    }

    #[test]
    fn format_amount_is_exact() {
        assert_eq!(format_amount(Amount::from_minor(123_456)), "1.234,56");
        assert_eq!(format_amount(Amount::from_minor(-5)), "-0,05");
    }

    #[test]
    fn compact_millions_and_thousands() {
        assert_eq!(format_compact_currency(1_500_000.0), "1,5M");
        assert_eq!(format_compact_currency(2_500.0), "2,5K");
        assert_eq!(format_compact_currency(2_000_000.0), "2,0M");
        assert_eq!(format_compact_currency(-1_500_000.0), "-1,5M");
    }

    #[test]
    fn compact_below_thousand_uses_full_form() {
        assert_eq!(format_compact_currency(999.99), "999,99");
        assert_eq!(format_compact_currency(0.0), "0,00");
    }

    #[test]
    fn compact_non_finite_falls_back() {
        assert_eq!(format_compact_currency(f64::NAN), "0,00");
    }
}
