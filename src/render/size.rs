//! Human-readable byte sizes
//!
//! Decimal scaling (1 kB = 1000 B) with four significant digits.

const UNITS: [&str; 9] = ["B", "kB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];
const BASE: f64 = 1000.0;
const PRECISION: usize = 4;

/// Format a byte count, e.g. `1500` as `1.5kB`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn human_size(bytes: i64) -> String {
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= BASE && unit < UNITS.len() - 1 {
        size /= BASE;
        unit += 1;
    }
    format!("{}{}", format_significant(size, PRECISION), UNITS[unit])
}

/// `%g`-style formatting: `precision` significant digits, trailing zeros
/// removed, exponent form only for very large or small magnitudes.
#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
fn format_significant(value: f64, precision: usize) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    // Rounds first, so the exponent reflects carries like 999.96 -> 1.000e3
    let sci = format!("{:.*e}", precision - 1, value);
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);

    if exp < -4 || exp >= precision as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        return format!("{}e{sign}{:02}", trim_fraction(mantissa), exp.abs());
    }

    let decimals = (precision as i32 - 1 - exp).max(0) as usize;
    trim_fraction(&format!("{value:.decimals$}")).to_string()
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_counts_are_bytes() {
        assert_eq!(human_size(0), "0B");
        assert_eq!(human_size(1), "1B");
        assert_eq!(human_size(100), "100B");
        assert_eq!(human_size(999), "999B");
    }

    #[test]
    fn test_kilobyte_boundary() {
        assert_eq!(human_size(1000), "1kB");
        assert_eq!(human_size(1500), "1.5kB");
        assert_eq!(human_size(999_999), "1000kB");
    }

    #[test]
    fn test_four_significant_digits() {
        assert_eq!(human_size(1_234_567), "1.235MB");
        assert_eq!(human_size(2_811_969), "2.812MB");
        assert_eq!(human_size(45_600_000_000), "45.6GB");
    }

    #[test]
    fn test_largest_unit_is_capped() {
        assert_eq!(human_size(i64::MAX), "9.223EB");
    }

    #[test]
    fn test_negative_counts_are_not_scaled() {
        assert_eq!(human_size(-5), "-5B");
        assert_eq!(human_size(-50_000), "-5e+04B");
    }

    #[test]
    fn test_trim_fraction() {
        assert_eq!(trim_fraction("1.500"), "1.5");
        assert_eq!(trim_fraction("2.000"), "2");
        assert_eq!(trim_fraction("100"), "100");
    }
}
