// Rounding and number formatting shared by the calculators and the console.
use num_format::{Locale, ToFormattedString};

/// Round half away from zero to two decimals.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Percentages are always shown with exactly two decimals (`"6.67"`).
pub fn format_pct(x: f64) -> String {
    format!("{:.2}", x)
}

/// Parse a user-typed amount such as `1,250,000.50` or ` 850000 `.
///
/// Thousands separators are stripped; anything with letters is rejected.
pub fn parse_amount(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() || s.chars().any(|c| c.is_alphabetic()) {
        return None;
    }
    s.replace(',', "").parse::<f64>().ok()
}

pub fn format_number(n: f64, decimals: usize) -> String {
    // Fixed decimals with locale thousands separators, e.g. `1,234,567.89`.
    let neg = n.is_sign_negative() && n != 0.0;
    let s = format!("{:.*}", decimals, n.abs());
    let mut parts = s.split('.');
    let int_part = parts.next().unwrap_or("0");
    let frac_part = parts.next();
    let int_val: i64 = int_part.parse().unwrap_or(0);
    let mut res = int_val.to_formatted_string(&Locale::en);
    if let Some(frac) = frac_part {
        res.push('.');
        res.push_str(frac);
    }
    if neg {
        format!("-{}", res)
    } else {
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round2(6.666_666), 6.67);
        assert_eq!(round2(-9.090_909), -9.09);
        assert_eq!(round2(0.125), 0.13);
    }

    #[test]
    fn pct_has_two_decimals() {
        assert_eq!(format_pct(10.0), "10.00");
        assert_eq!(format_pct(-9.09), "-9.09");
        assert_eq!(format_pct(0.0), "0.00");
    }

    #[test]
    fn amounts() {
        assert_eq!(parse_amount(" 1,250,000.50 "), Some(1_250_000.5));
        assert_eq!(parse_amount("850000"), Some(850_000.0));
        assert_eq!(parse_amount("mil"), None);
        assert_eq!(parse_amount(""), None);
    }

    #[test]
    fn thousands_separators() {
        assert_eq!(format_number(1_234_567.891, 2), "1,234,567.89");
        assert_eq!(format_number(-1500.0, 0), "-1,500");
        assert_eq!(format_number(0.0, 2), "0.00");
    }
}
