//! Number formatting shared by the metrics table and the preview.

/// Placeholder shown for any value that is absent or cannot be formatted.
pub const NOT_AVAILABLE: &str = "N/A";

/// Insert `,` between thousands in the integer part of a plain decimal string.
///
/// `"-1234567.891"` → `"-1,234,567.891"`.
pub fn group_thousands(s: &str) -> String {
    let (sign, unsigned) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s),
    };
    let (int_part, frac_part) = match unsigned.find('.') {
        Some(idx) => unsigned.split_at(idx),
        None => (unsigned, ""),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}{frac_part}")
}

/// `1234.5` with 2 decimals → `"1,234.50"`.
pub fn format_grouped(value: f64, decimals: usize) -> String {
    group_thousands(&format!("{value:.decimals$}"))
}

/// Dollar amount with thousands separators: `2.95e12` → `"$2,950,000,000,000"`.
pub fn format_currency_grouped(value: f64, decimals: usize) -> String {
    format!("${}", format_grouped(value, decimals))
}

/// Dollar amount without separators: `199.62` → `"$199.62"`.
pub fn format_currency(value: f64, decimals: usize) -> String {
    format!("${value:.decimals$}")
}

/// Fraction rendered as a percentage: `0.0044` → `"0.44%"`.
pub fn format_percent(fraction: f64, decimals: usize) -> String {
    format!("{:.decimals$}%", fraction * 100.0)
}

/// Fixed-point number: `28.5079` → `"28.51"`.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}

/// Apply `f` to a finite value, otherwise return the placeholder.
pub fn or_not_available(value: Option<f64>, f: impl FnOnce(f64) -> String) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(v) => f(v),
        None => NOT_AVAILABLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grouping() {
        assert_eq!(group_thousands("0"), "0");
        assert_eq!(group_thousands("999"), "999");
        assert_eq!(group_thousands("1000"), "1,000");
        assert_eq!(group_thousands("1234567"), "1,234,567");
        assert_eq!(group_thousands("-1234567.891"), "-1,234,567.891");
        assert_eq!(group_thousands("123456.00"), "123,456.00");
    }

    #[test]
    fn currency_formats() {
        assert_eq!(format_currency_grouped(2_950_000_000_000.0, 0), "$2,950,000,000,000");
        assert_eq!(format_currency_grouped(0.0, 0), "$0");
        assert_eq!(format_currency(199.62, 2), "$199.62");
        assert_eq!(format_currency(1234.5, 2), "$1234.50");
    }

    #[test]
    fn percent_and_fixed() {
        assert_eq!(format_percent(0.0044, 2), "0.44%");
        assert_eq!(format_percent(0.0, 2), "0.00%");
        assert_eq!(format_fixed(28.5079, 2), "28.51");
    }

    #[test]
    fn grouped_volume() {
        assert_eq!(format_grouped(112_117_500.0, 0), "112,117,500");
    }

    #[test]
    fn non_finite_is_placeholder() {
        assert_eq!(or_not_available(None, |v| format_fixed(v, 2)), "N/A");
        assert_eq!(or_not_available(Some(f64::NAN), |v| format_fixed(v, 2)), "N/A");
        assert_eq!(or_not_available(Some(1.0), |v| format_fixed(v, 2)), "1.00");
    }
}
