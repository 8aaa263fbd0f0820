/// Rupees to minor units (paise). Gateway orders are denominated in minor
/// units.
pub fn to_minor_units(rupees: i64) -> i64 {
    rupees.saturating_mul(100)
}

/// Indian-style digit grouping with the rupee sign: 123456 -> "₹1,23,456".
/// Last three digits form a group, every two digits after that.
pub fn format_rupees(amount: i64) -> String {
    let negative = amount < 0;
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::new();

    let head_len = if digits.len() > 3 {
        (digits.len() - 3) % 2
    } else {
        0
    };
    let mut taken = 0;
    if head_len > 0 {
        grouped.push_str(&digits[..head_len]);
        taken = head_len;
    }
    while taken < digits.len() {
        let chunk = if digits.len() - taken > 3 { 2 } else { digits.len() - taken };
        if !grouped.is_empty() {
            grouped.push(',');
        }
        grouped.push_str(&digits[taken..taken + chunk]);
        taken += chunk;
    }

    if negative {
        format!("-₹{}", grouped)
    } else {
        format!("₹{}", grouped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minor_units() {
        assert_eq!(to_minor_units(999), 99_900);
        assert_eq!(to_minor_units(0), 0);
    }

    #[test]
    fn indian_grouping() {
        assert_eq!(format_rupees(0), "₹0");
        assert_eq!(format_rupees(999), "₹999");
        assert_eq!(format_rupees(1_000), "₹1,000");
        assert_eq!(format_rupees(123_456), "₹1,23,456");
        assert_eq!(format_rupees(12_345_678), "₹1,23,45,678");
        assert_eq!(format_rupees(-2_500), "-₹2,500");
    }
}
