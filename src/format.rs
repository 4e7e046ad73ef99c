/// Compact rendering for chart labels: `1_234_567 → "1.2M"`,
/// `45_000 → "45.0K"`, smaller values as plain digits.
pub fn abbreviate(value: u64) -> String {
    if value >= 1_000_000 {
        format!("{:.1}M", value as f64 / 1_000_000.0)
    } else if value >= 1_000 {
        format!("{:.1}K", value as f64 / 1_000.0)
    } else {
        value.to_string()
    }
}

/// Always in millions, as the yearly trend labels are.
pub fn millions(value: u64) -> String {
    format!("{:.1}M", value as f64 / 1_000_000.0)
}

/// Digits grouped by thousands with `,`.
pub fn thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
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
    fn test_abbreviate() {
        assert_eq!(abbreviate(1_234_567), "1.2M");
        assert_eq!(abbreviate(45_000), "45.0K");
        assert_eq!(abbreviate(1_000), "1.0K");
        assert_eq!(abbreviate(999), "999");
        assert_eq!(abbreviate(0), "0");
    }

    #[test]
    fn test_millions() {
        assert_eq!(millions(6_700_000), "6.7M");
        assert_eq!(millions(45_000), "0.0M");
    }

    #[test]
    fn test_thousands() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1_000), "1,000");
        assert_eq!(thousands(1_234_567), "1,234,567");
    }
}
