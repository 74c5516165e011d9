//! Display formatting shared by detail views and cards.

use chrono::NaiveDate;

pub const NOT_AVAILABLE: &str = "N/A";

/// `125` -> `"2h 5m"`, `45` -> `"45m"`; zero or unknown is `"N/A"`.
pub fn format_runtime(minutes: Option<u32>) -> String {
    match minutes {
        None | Some(0) => NOT_AVAILABLE.to_string(),
        Some(m) if m >= 60 => format!("{}h {}m", m / 60, m % 60),
        Some(m) => format!("{m}m"),
    }
}

/// Whole US dollars with thousands separators: `"$63,000,000"`.
pub fn format_currency(amount: Option<u64>) -> String {
    match amount {
        None | Some(0) => NOT_AVAILABLE.to_string(),
        Some(amount) => format!("${}", group_thousands(amount)),
    }
}

/// `"2021-03-05"` -> `"March 5, 2021"`.
pub fn format_date(raw: Option<&str>) -> String {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
        .map(|d| d.format("%B %-d, %Y").to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn group_thousands(value: u64) -> String {
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
    fn runtime_formats() {
        assert_eq!(format_runtime(Some(125)), "2h 5m");
        assert_eq!(format_runtime(Some(60)), "1h 0m");
        assert_eq!(format_runtime(Some(45)), "45m");
        assert_eq!(format_runtime(Some(0)), "N/A");
        assert_eq!(format_runtime(None), "N/A");
    }

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency(Some(63_000_000)), "$63,000,000");
        assert_eq!(format_currency(Some(999)), "$999");
        assert_eq!(format_currency(Some(1_000)), "$1,000");
        assert_eq!(format_currency(Some(0)), "N/A");
    }

    #[test]
    fn date_formats_long_form() {
        assert_eq!(format_date(Some("2021-03-05")), "March 5, 2021");
        assert_eq!(format_date(Some("")), "N/A");
        assert_eq!(format_date(Some("soon")), "N/A");
        assert_eq!(format_date(None), "N/A");
    }
}
