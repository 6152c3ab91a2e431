//! Display formatting for currency amounts

const NOT_AVAILABLE: &str = "N/A";

/// Formats a currency amount with B/M suffixes for large magnitudes
///
/// Amounts of at least one billion use one decimal and a `B` suffix, at
/// least one million a `M` suffix. Smaller amounts are printed as-is.
/// Negative amounts keep their sign in front of the currency symbol.
/// Amounts the API left out are shown as `N/A`.
pub fn format_large_number(amount: f64) -> String {
    if amount.is_nan() {
        return NOT_AVAILABLE.to_string();
    }
    let sign = if amount < 0.0 { "-" } else { "" };
    let magnitude = amount.abs();

    if magnitude >= 1e9 {
        format!("{}${:.1}B", sign, magnitude / 1e9)
    } else if magnitude >= 1e6 {
        format!("{}${:.1}M", sign, magnitude / 1e6)
    } else {
        format!("{}${}", sign, magnitude)
    }
}

/// Formats earnings per share
pub fn format_eps(eps: f64) -> String {
    if eps.is_nan() {
        return NOT_AVAILABLE.to_string();
    }
    if eps < 0.0 {
        format!("-${}", eps.abs())
    } else {
        format!("${}", eps)
    }
}

/// Footer text for the filter panel
pub fn filtered_count_label(hidden: usize) -> String {
    let noun = if hidden == 1 { "statement" } else { "statements" };
    format!("Filtering {} {}", hidden, noun)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_billions() {
        assert_eq!(format_large_number(383_285_000_000.0), "$383.3B");
        assert_eq!(format_large_number(1e9), "$1.0B");
    }

    #[test]
    fn test_format_millions() {
        assert_eq!(format_large_number(2_500_000.0), "$2.5M");
        assert_eq!(format_large_number(999_999_999.0), "$1000.0M");
    }

    #[test]
    fn test_format_small_amounts() {
        assert_eq!(format_large_number(123_456.0), "$123456");
        assert_eq!(format_large_number(0.0), "$0");
    }

    #[test]
    fn test_format_negative_amounts() {
        assert_eq!(format_large_number(-3_200_000_000.0), "-$3.2B");
        assert_eq!(format_large_number(-42.0), "-$42");
    }

    #[test]
    fn test_format_missing_amounts() {
        assert_eq!(format_large_number(f64::NAN), "N/A");
        assert_eq!(format_eps(f64::NAN), "N/A");
    }

    #[test]
    fn test_format_eps() {
        assert_eq!(format_eps(6.16), "$6.16");
        assert_eq!(format_eps(-0.5), "-$0.5");
    }

    #[test]
    fn test_filtered_count_label() {
        assert_eq!(filtered_count_label(0), "Filtering 0 statements");
        assert_eq!(filtered_count_label(1), "Filtering 1 statement");
        assert_eq!(filtered_count_label(3), "Filtering 3 statements");
    }
}
