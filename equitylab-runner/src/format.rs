//! Human-readable number formatting for reports and terminal output.

/// Group an integer string with thousands separators.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn with_separators(value: f64, decimals: usize) -> String {
    let text = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };
    let mut out = String::new();
    if value < 0.0 && text.chars().any(|c| c.is_ascii_digit() && c != '0') {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(f) = frac_part {
        out.push('.');
        out.push_str(f);
    }
    out
}

/// `$1,234,567` (whole dollars).
pub fn money(value: f64) -> String {
    format!("${}", with_separators(value, 0))
}

/// `$1,234.56`.
pub fn money_cents(value: f64) -> String {
    format!("${}", with_separators(value, 2))
}

/// `1,234,567`.
pub fn count(value: u64) -> String {
    group_thousands(&value.to_string())
}

/// ROI percentage, or "∞" when exercise is free.
pub fn roi(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{}%", with_separators(v, 1)),
        None => "∞".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_money() {
        assert_eq!(money(1_111_111.11), "$1,111,111");
        assert_eq!(money(999.0), "$999");
        assert_eq!(money(0.0), "$0");
        assert_eq!(money_cents(1234.5), "$1,234.50");
        assert_eq!(money_cents(-1234.5), "$-1,234.50");
    }

    #[test]
    fn formats_counts() {
        assert_eq!(count(0), "0");
        assert_eq!(count(1_000), "1,000");
        assert_eq!(count(10_000_000), "10,000,000");
    }

    #[test]
    fn formats_roi() {
        assert_eq!(roi(Some(12_345.67)), "12,345.7%");
        assert_eq!(roi(None), "∞");
    }
}
