//! Number formatting for table cells

/// Formats a number with a thousands separator (comma) and the given number
/// of decimal places.
///
/// ```text
/// format_number_with_decimals(1234.567, 2) == "1,234.57"
/// ```
pub fn format_number_with_decimals(value: f64, decimals: u8) -> String {
    let formatted = match decimals {
        0 => format!("{:.0}", value),
        1 => format!("{:.1}", value),
        2 => format!("{:.2}", value),
        3 => format!("{:.3}", value),
        _ => format!("{:.2}", value),
    };

    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (formatted.as_str(), None),
    };

    // Insert a separator every 3 digits from the right
    let mut result = String::new();
    let chars: Vec<char> = integer_part.chars().rev().collect();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && i % 3 == 0 && *c != '-' {
            result.push(',');
        }
        result.push(*c);
    }
    let formatted_integer = result.chars().rev().collect::<String>();

    match decimal_part {
        Some(d) => format!("{}.{}", formatted_integer, d),
        None => formatted_integer,
    }
}

/// Defect quantity: integer with separators
pub fn format_quantity(value: u32) -> String {
    format_number_with_decimals(value as f64, 0)
}

/// Loss amount in KRW; fractions are only shown when present.
pub fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{} KRW", format_number_with_decimals(value, 0))
    } else {
        format!("{} KRW", format_number_with_decimals(value, 2))
    }
}

/// Reads a quantity field. Leading digits count, anything else is 0,
/// so "12pcs" gives 12 and "-3" gives 0.
pub fn parse_quantity_input(raw: &str) -> u32 {
    let digits: String = raw.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

/// Reads an amount field; negative, non-finite or malformed input gives 0.
pub fn parse_amount_input(raw: &str) -> f64 {
    raw.trim()
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_with_decimals() {
        assert_eq!(format_number_with_decimals(1234.567, 0), "1,235");
        assert_eq!(format_number_with_decimals(1234.567, 2), "1,234.57");
        assert_eq!(format_number_with_decimals(-1234.0, 0), "-1,234");
        assert_eq!(format_number_with_decimals(0.0, 0), "0");
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(5), "5");
        assert_eq!(format_quantity(1_234_567), "1,234,567");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(12000.0), "12,000 KRW");
        assert_eq!(format_amount(12000.5), "12,000.50 KRW");
    }

    #[test]
    fn test_parse_quantity_input() {
        assert_eq!(parse_quantity_input("5"), 5);
        assert_eq!(parse_quantity_input(" 12pcs"), 12);
        assert_eq!(parse_quantity_input("-3"), 0);
        assert_eq!(parse_quantity_input(""), 0);
    }

    #[test]
    fn test_parse_amount_input() {
        assert_eq!(parse_amount_input("1,500.5"), 1500.5);
        assert_eq!(parse_amount_input("-1"), 0.0);
        assert_eq!(parse_amount_input("abc"), 0.0);
        assert_eq!(parse_amount_input("NaN"), 0.0);
    }
}
