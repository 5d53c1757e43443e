//! Rupee formatting with Indian digit grouping
//!
//! The last three integer digits form one group and every group above that
//! holds two digits (lakh/crore): 1161695 renders as `₹11,61,695`.

/// Currency symbol prefixed to every formatted amount
pub const CURRENCY_SYMBOL: &str = "₹";

/// Format an amount as rupees with no fractional digits, e.g. `₹11,61,695`
///
/// Rounds halves away from zero. Negative amounts render as `-₹1,234`.
/// Non-finite values should be filtered by the caller; they render as-is.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return format!("{}{}", CURRENCY_SYMBOL, value);
    }
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}{}{}", sign, CURRENCY_SYMBOL, group_indian(rounded.abs()))
}

/// Format an amount with Indian grouping and no currency symbol, e.g. `11,61,695`
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}{}", sign, group_indian(rounded.abs()))
}

/// Group the digits of a non-negative whole number
fn group_indian(whole: f64) -> String {
    let digits = format!("{:.0}", whole);
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    let mut out = groups.join(",");
    out.push(',');
    out.push_str(tail);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1_161_695.0), "₹11,61,695");
        assert_eq!(format_currency(0.0), "₹0");
        assert_eq!(format_currency(999.0), "₹999");
        assert_eq!(format_currency(1_000.0), "₹1,000");
        assert_eq!(format_currency(100_000.0), "₹1,00,000");
        assert_eq!(format_currency(10_000_000.0), "₹1,00,00,000");
        assert_eq!(format_currency(123_456_789.0), "₹12,34,56,789");
    }

    #[test]
    fn test_rounding() {
        assert_eq!(format_currency(1_161_695.28), "₹11,61,695");
        assert_eq!(format_currency(2_499.5), "₹2,500");
        assert_eq!(format_currency(0.4), "₹0");
    }

    #[test]
    fn test_negative_amounts() {
        assert_eq!(format_currency(-12_345.0), "-₹12,345");
        // Rounds to zero, so no sign
        assert_eq!(format_currency(-0.2), "₹0");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(5_000.0), "5,000");
        assert_eq!(format_amount(310_585.0), "3,10,585");
        assert_eq!(format_amount(-561_695.0), "-5,61,695");
    }
}
