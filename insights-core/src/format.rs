//! Display formatting for table cells

use crate::schema::risk;
use chrono::NaiveDate;

/// `1234.5` → `$1,234.50`
pub fn currency(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, cents)
}

/// `0.1234` → `12.34%`
pub fn percentage(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

/// `2025-01-05` → `Jan 5, 2025`; anything else is returned unchanged
pub fn short_date(raw: &str) -> String {
    match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
        Ok(date) => date.format("%b %-d, %Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Badge style for a stored risk label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Danger,
    Warning,
    Success,
}

impl Badge {
    pub fn for_risk(label: &str) -> Option<Badge> {
        match label {
            risk::HIGH => Some(Badge::Danger),
            risk::MEDIUM => Some(Badge::Warning),
            risk::LOW => Some(Badge::Success),
            _ => None,
        }
    }
}

/// Risk label decorated with its badge marker, e.g. `High Risk (!!)`
pub fn risk_badge(label: &str) -> String {
    match Badge::for_risk(label) {
        Some(Badge::Danger) => format!("{} (!!)", label),
        Some(Badge::Warning) => format!("{} (!)", label),
        Some(Badge::Success) | None => label.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency() {
        assert_eq!(currency(0.0), "$0.00");
        assert_eq!(currency(141.9), "$141.90");
        assert_eq!(currency(1234.5), "$1,234.50");
        assert_eq!(currency(34_000.0), "$34,000.00");
        assert_eq!(currency(1_234_567.891), "$1,234,567.89");
        assert_eq!(currency(-7000.0), "-$7,000.00");
        assert_eq!(currency(-0.001), "$0.00");
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(0.706516), "70.65%");
        assert_eq!(percentage(0.0), "0.00%");
    }

    #[test]
    fn test_short_date() {
        assert_eq!(short_date("2025-01-05"), "Jan 5, 2025");
        assert_eq!(short_date("2024-12-31"), "Dec 31, 2024");
        assert_eq!(short_date("soon"), "soon");
    }

    #[test]
    fn test_badges() {
        assert_eq!(Badge::for_risk("High Risk"), Some(Badge::Danger));
        assert_eq!(Badge::for_risk("Medium Risk"), Some(Badge::Warning));
        assert_eq!(Badge::for_risk("Unknown"), None);
        assert_eq!(risk_badge("High Risk"), "High Risk (!!)");
        assert_eq!(risk_badge("Low Risk"), "Low Risk");
        assert_eq!(risk_badge("Whatever"), "Whatever");
    }
}
