//! Formatting of the provider's decimal-bearing and integer-bearing strings.
//!
//! Quote fields arrive as text (`"150.2300"`, `"1234567"`). These helpers
//! turn them into table cells without losing precision through `f64`.

use rust_decimal::prelude::*;

/// Trims trailing fractional zeros, adds thousands separators.
pub fn group_digits(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };

    let trimmed = if unsigned.contains('.') {
        unsigned.trim_end_matches('0').trim_end_matches('.')
    } else {
        unsigned
    };

    let (integer, fraction) = match trimmed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (trimmed, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (idx, ch) in integer.chars().enumerate() {
        if idx > 0 && (integer.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

/// Format an integer-bearing volume string. `None` when it is not an integer.
pub fn display_volume(raw: &str) -> Option<String> {
    let volume = raw.trim().parse::<u64>().ok()?;
    Some(group_digits(&volume.to_string()))
}

/// Format a decimal-bearing price string rounded to `decimals` places.
///
/// Keeps at least two decimals so `"150.0000"` reads `"150.00"`.
pub fn display_price(raw: &str, decimals: u32) -> Option<String> {
    let value = Decimal::from_str(raw.trim()).ok()?;
    let rounded = value.round_dp(decimals);
    Some(format!("{:.1$}", rounded, decimals.max(2) as usize))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_digits_integers() {
        assert_eq!(group_digits("0"), "0");
        assert_eq!(group_digits("123"), "123");
        assert_eq!(group_digits("1000"), "1,000");
        assert_eq!(group_digits("1234567890"), "1,234,567,890");
    }

    #[test]
    fn test_group_digits_trailing_zeros_trimmed() {
        assert_eq!(group_digits("1.500"), "1.5");
        assert_eq!(group_digits("1000.00"), "1,000");
        assert_eq!(group_digits("1234.5600"), "1,234.56");
    }

    #[test]
    fn test_group_digits_negative() {
        assert_eq!(group_digits("-1"), "-1");
        assert_eq!(group_digits("-123456.7"), "-123,456.7");
    }

    #[test]
    fn test_display_volume() {
        assert_eq!(display_volume("1234567").as_deref(), Some("1,234,567"));
        assert_eq!(display_volume(" 42 ").as_deref(), Some("42"));
        assert_eq!(display_volume("n/a"), None);
        assert_eq!(display_volume("12.5"), None);
    }

    #[test]
    fn test_display_price() {
        assert_eq!(display_price("150.0000", 2).as_deref(), Some("150.00"));
        assert_eq!(display_price("149.5", 2).as_deref(), Some("149.50"));
        assert_eq!(display_price("0.123456", 4).as_deref(), Some("0.1235"));
        assert_eq!(display_price("abc", 2), None);
    }
}
