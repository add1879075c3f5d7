//! KPI number formatting.

/// Shown in place of a metric that has no data behind it.
pub const NO_DATA: &str = "N/A";

/// `1234567.891` -> `$1,234,567.89`
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return NO_DATA.to_string();
    }
    let formatted = format!("{:.2}", value.abs());
    let (whole, frac) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));
    let sign = if value < 0.0 && formatted != "0.00" { "-" } else { "" };
    format!("{}${}.{}", sign, group_thousands(whole), frac)
}

/// `1234.0` -> `1,234`
pub fn format_units(value: f64) -> String {
    let formatted = format!("{:.0}", value.abs());
    let sign = if value < 0.0 && formatted != "0" { "-" } else { "" };
    format!("{}{}", sign, group_thousands(&formatted))
}

/// Average price with two decimals, or the no-data marker.
pub fn format_avg_price(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("${:.2}", v),
        _ => NO_DATA.to_string(),
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(150.0), "$150.00");
        assert_eq!(format_currency(1234567.891), "$1,234,567.89");
        assert_eq!(format_currency(-2500.5), "-$2,500.50");
    }

    #[test]
    fn test_currency_non_finite() {
        assert_eq!(format_currency(f64::INFINITY), NO_DATA);
        assert_eq!(format_currency(f64::NEG_INFINITY), NO_DATA);
        assert_eq!(format_currency(f64::NAN), NO_DATA);
    }

    #[test]
    fn test_units() {
        assert_eq!(format_units(999.0), "999");
        assert_eq!(format_units(1000.0), "1,000");
        assert_eq!(format_units(99067.0), "99,067");
    }

    #[test]
    fn test_avg_price_sentinel() {
        assert_eq!(format_avg_price(Some(83.658)), "$83.66");
        assert_eq!(format_avg_price(None), NO_DATA);
    }
}
